use crate::detection::params::{DenoiseMethod, RadiusBounds};
use crate::detection::{annotate, circles, contours, preprocessing};
use crate::error::Result;
use crate::models::Color;
use crate::pipeline::{PipelineData, PipelineStep};
use image::DynamicImage;

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        data.image = DynamicImage::ImageLuma8(preprocessing::to_grayscale(&data.image));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Smooth the grayscale image with the selected filter
pub struct DenoiseStep {
    pub method: DenoiseMethod,
}

impl PipelineStep for DenoiseStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        data.image = DynamicImage::ImageLuma8(preprocessing::denoise(&gray, self.method));
        Ok(data)
    }

    fn name(&self) -> &str {
        match self.method {
            DenoiseMethod::Median => "Median Blur",
            DenoiseMethod::Gaussian => "Gaussian Blur",
        }
    }
}

/// Detect edges using Canny
pub struct EdgeDetectionStep {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl PipelineStep for EdgeDetectionStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let edges = preprocessing::detect_edges(&gray, self.low_threshold, self.high_threshold);
        data.image = DynamicImage::ImageLuma8(edges);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Trace external contours in the edge map
///
/// The raster becomes a rendering of the traced contours.
pub struct ContourDetectionStep;

impl PipelineStep for ContourDetectionStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        let edges = data.image.to_luma8();
        data.contours = contours::find_external_contours(&edges);
        data.candidates.clear();
        data.image = DynamicImage::ImageLuma8(annotate::render_contours(
            edges.width(),
            edges.height(),
            &data.contours,
        ));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Contour Detection"
    }
}

/// Keep contours whose minimum enclosing circle is coin-sized
///
/// The raster becomes a rendering of the admitted contours only.
pub struct CircleFilterStep {
    pub bounds: RadiusBounds,
}

impl PipelineStep for CircleFilterStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        data.candidates = circles::filter_candidates(&data.contours, &self.bounds);
        let admitted = data.candidates.iter().map(|c| &data.contours[c.contour_index]);
        data.image = DynamicImage::ImageLuma8(annotate::render_contours(
            data.image.width(),
            data.image.height(),
            admitted,
        ));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Circle Filtering"
    }
}

/// Draw admitted circles on a copy of the color input
pub struct AnnotateStep {
    pub color: Color,
    pub stroke_width: u32,
}

impl PipelineStep for AnnotateStep {
    fn process(&self, mut data: PipelineData) -> Result<PipelineData> {
        let annotated = annotate::draw_candidates(
            &data.original,
            &data.candidates,
            self.color,
            self.stroke_width,
        );
        data.image = DynamicImage::ImageRgb8(annotated);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Annotation"
    }
}
