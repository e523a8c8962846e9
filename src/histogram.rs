use image::{DynamicImage, GrayImage, ImageBuffer, Pixel};
use imageproc::stats::histogram;

use crate::error::{CoinError, Result};

pub const BINS: usize = 256;

/// Per-channel 256-bin intensity counts.
///
/// One channel for grayscale input, otherwise three in R, G, B order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    pub channels: Vec<[u32; BINS]>,
}

impl Histogram {
    pub fn is_grayscale(&self) -> bool {
        self.channels.len() == 1
    }

    pub fn channel(&self, index: usize) -> Option<&[u32; BINS]> {
        self.channels.get(index)
    }

    /// Number of pixels counted in `channel`.
    pub fn total(&self, channel: usize) -> u64 {
        self.channels
            .get(channel)
            .map_or(0, |bins| bins.iter().map(|&n| n as u64).sum())
    }

    /// Most populated bin of `channel`; ties go to the lower intensity.
    pub fn peak(&self, channel: usize) -> Option<u8> {
        let bins = self.channels.get(channel)?;
        let (bin, &count) = bins
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, count)| *count)?;
        (count > 0).then_some(bin as u8)
    }
}

fn masked_counts<P>(image: &ImageBuffer<P, Vec<u8>>, mask: &GrayImage) -> Vec<[u32; BINS]>
where
    P: Pixel<Subpixel = u8>,
{
    let mut channels = vec![[0u32; BINS]; P::CHANNEL_COUNT as usize];
    for (pixel, m) in image.pixels().zip(mask.pixels()) {
        if m[0] == 0 {
            continue;
        }
        for (bins, &value) in channels.iter_mut().zip(pixel.channels()) {
            bins[value as usize] += 1;
        }
    }
    channels
}

/// Intensity distribution of `image`, restricted to non-zero `mask` pixels.
pub fn compute_histogram(
    image: &DynamicImage,
    mask: Option<&GrayImage>,
    grayscale: bool,
) -> Result<Histogram> {
    if let Some(mask) = mask {
        if mask.dimensions() != (image.width(), image.height()) {
            return Err(CoinError::invalid(format!(
                "mask is {}x{} but image is {}x{}",
                mask.width(),
                mask.height(),
                image.width(),
                image.height()
            )));
        }
    }

    let channels = match (grayscale, mask) {
        (true, None) => histogram(&image.to_luma8()).channels,
        (true, Some(mask)) => masked_counts(&image.to_luma8(), mask),
        (false, None) => histogram(&image.to_rgb8()).channels,
        (false, Some(mask)) => masked_counts(&image.to_rgb8(), mask),
    };
    Ok(Histogram { channels })
}
