use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::filter::{gaussian_blur_f32, median_filter};

use super::params::{DenoiseMethod, GAUSSIAN_KERNEL_SIZE, MEDIAN_RADIUS, auto_sigma};

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Suppress texture so coin rims are not broken into short edge fragments
pub fn denoise(img: &GrayImage, method: DenoiseMethod) -> GrayImage {
    match method {
        DenoiseMethod::Median => median_filter(img, MEDIAN_RADIUS, MEDIAN_RADIUS),
        DenoiseMethod::Gaussian => gaussian_blur_f32(img, auto_sigma(GAUSSIAN_KERNEL_SIZE)),
    }
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}
