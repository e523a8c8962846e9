use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CoinError, Result};
use crate::models::{CandidateCircle, Contour, DetectionResult};

/// Data that flows through the pipeline
///
/// `image` holds the raster of the most recent stage (grayscale, denoised,
/// edge map, ...). The color input stays available in `original` so the
/// annotation stage can draw on a copy of it.
#[derive(Clone)]
pub struct PipelineData {
    pub image: DynamicImage,

    /// Color input shared by every stage of one run
    pub original: Arc<RgbImage>,

    /// Every external contour, filled by contour detection
    pub contours: Vec<Contour>,

    /// Contours admitted by the radius filter
    pub candidates: Vec<CandidateCircle>,
}

impl PipelineData {
    /// Create PipelineData for a color input image
    pub fn from_image(image: RgbImage) -> Self {
        let original = Arc::new(image);
        Self {
            image: DynamicImage::ImageRgb8((*original).clone()),
            original,
            contours: Vec::new(),
            candidates: Vec::new(),
        }
    }

    /// Assemble the caller-facing result from the final stage
    pub fn into_result(self) -> DetectionResult {
        let annotated = match self.image {
            DynamicImage::ImageRgb8(img) => img,
            other => other.to_rgb8(),
        };
        DetectionResult {
            annotated,
            count: self.candidates.len(),
            contours: self.contours,
            candidates: self.candidates,
        }
    }
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform the data of one stage into the next
    fn process(&self, data: PipelineData) -> Result<PipelineData>;

    /// Human-readable name for this step (used in logs and debug dump folders)
    fn name(&self) -> &str;
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    fn save(&self, dir_name: &str, image: &DynamicImage) -> Result<()> {
        let step_dir = self.output_dir.join(dir_name);
        std::fs::create_dir_all(&step_dir)?;
        let path = step_dir.join("01.png");
        image.save(&path).map_err(|source| CoinError::Save {
            path: path.clone(),
            source,
        })?;
        log::debug!("saved debug image {}", path.display());
        Ok(())
    }
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    debug: Option<DebugConfig>,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            debug: None,
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        if output_dir.exists() {
            let mut entries = std::fs::read_dir(&output_dir)?;
            if entries.next().is_some() {
                return Err(CoinError::invalid(format!(
                    "debug directory is not empty: {}",
                    output_dir.display()
                )));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step on an input image
    pub fn run(&self, input: RgbImage) -> Result<PipelineData> {
        self.run_partial(input, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: RgbImage, num_steps: usize) -> Result<PipelineData> {
        let mut data = PipelineData::from_image(input);

        if let Some(debug) = &self.debug {
            debug.save("00_input", &data.image)?;
        }

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            log::debug!("running step {}: {}", step_idx + 1, step.name());
            data = step.process(data)?;
            log::debug!(
                "  -> {}x{} raster, {} contours, {} candidates",
                data.image.width(),
                data.image.height(),
                data.contours.len(),
                data.candidates.len()
            );

            if let Some(debug) = &self.debug {
                let step_dir_name = format!(
                    "{:02}_{}",
                    step_idx + 1,
                    step.name().to_lowercase().replace(' ', "_")
                );
                debug.save(&step_dir_name, &data.image)?;
            }
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
