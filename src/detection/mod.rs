pub mod annotate;
pub mod circles;
pub mod contours;
pub mod params;
pub mod preprocessing;
pub mod steps;

use std::path::Path;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use crate::error::{CoinError, Result};
use crate::models::DetectionResult;
use crate::pipeline::Pipeline;
use crate::transform::{self, ResizeTarget};
use params::DetectionParams;

/// Width every photo is resized to before detection, so the radius bounds
/// mean the same thing regardless of the camera resolution.
pub const DEFAULT_WORKING_WIDTH: u32 = 255;

/// Decode compressed image bytes (PNG, JPEG, ...)
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(CoinError::DecodeFailure)
}

/// Normalize a decoded image to RGB at the working width.
///
/// `None` keeps the original size.
pub fn prepare_image(image: &DynamicImage, working_width: Option<u32>) -> Result<RgbImage> {
    let resized = transform::resize(
        image,
        working_width.map(ResizeTarget::Width),
        FilterType::Triangle,
    )?;
    Ok(resized.to_rgb8())
}

/// Build the standard detection pipeline for a parameter set
pub fn build_standard_pipeline(params: &DetectionParams) -> Pipeline {
    use steps::*;

    Pipeline::new()
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(DenoiseStep {
            method: params.method,
        }))
        .add_step(Arc::new(EdgeDetectionStep {
            low_threshold: params.canny.low,
            high_threshold: params.canny.high,
        }))
        .add_step(Arc::new(ContourDetectionStep))
        .add_step(Arc::new(CircleFilterStep {
            bounds: params.radius,
        }))
        .add_step(Arc::new(AnnotateStep {
            color: params.color,
            stroke_width: params.stroke_width,
        }))
}

/// Coin detector for one parameter set.
///
/// Holds no per-image state: `detect` can be called any number of times,
/// from any thread, and always returns a fresh result.
pub struct CoinDetector {
    params: DetectionParams,
    pipeline: Pipeline,
}

impl CoinDetector {
    pub fn new(params: DetectionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            pipeline: build_standard_pipeline(&params),
            params,
        })
    }

    /// Dump every stage's raster under `dir` (must be empty or absent)
    pub fn with_debug(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        self.pipeline = self.pipeline.with_debug(dir)?;
        Ok(self)
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Run the full detection pipeline on an already prepared RGB image
    pub fn detect(&self, image: &RgbImage) -> Result<DetectionResult> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CoinError::invalid(format!(
                "image must have a positive area, got {}x{}",
                image.width(),
                image.height()
            )));
        }

        let result = self.pipeline.run(image.clone())?.into_result();
        log::info!(
            "found {} coins among {} contours",
            result.count,
            result.contours.len()
        );
        for (i, c) in result.candidates.iter().enumerate() {
            log::debug!(
                "  coin {}: center=({:.1}, {:.1}) radius={:.1}",
                i + 1,
                c.center.0,
                c.center.1,
                c.radius
            );
        }
        Ok(result)
    }
}

/// One-shot detection with the given parameters
pub fn detect_coins(image: &RgbImage, params: &DetectionParams) -> Result<DetectionResult> {
    CoinDetector::new(*params)?.detect(image)
}
