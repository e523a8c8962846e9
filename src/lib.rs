pub mod detection;
pub mod error;
pub mod histogram;
pub mod mask;
pub mod models;
pub mod pipeline;
pub mod transform;

pub use detection::params::{CannyThresholds, DenoiseMethod, DetectionParams, RadiusBounds};
pub use detection::{
    CoinDetector, DEFAULT_WORKING_WIDTH, build_standard_pipeline, decode_image, detect_coins,
    prepare_image,
};
pub use error::{CoinError, Result};
pub use histogram::{Histogram, compute_histogram};
pub use mask::{Masked, apply_mask, circle_mask, rectangle_mask};
pub use models::{CandidateCircle, Color, Contour, DetectionResult};
pub use pipeline::{Pipeline, PipelineData, PipelineStep};
pub use transform::{ResizeTarget, resize, rotate, translate};
