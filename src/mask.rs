//! Binary region-of-interest masks.
//!
//! Masks are `GrayImage`s holding 255 inside the region and 0 outside.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Pixel};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::error::{CoinError, Result};

pub const MASK_ON: u8 = 255;
pub const DEFAULT_RECT_PERCENTAGE: f32 = 0.70;

/// A mask together with the image it was applied to.
#[derive(Debug, Clone)]
pub struct Masked {
    pub mask: GrayImage,
    pub image: DynamicImage,
}

fn dimensions(image: &DynamicImage) -> Result<(u32, u32)> {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return Err(CoinError::invalid(format!(
            "image must have a positive area, got {w}x{h}"
        )));
    }
    Ok((w, h))
}

/// Filled circle at `center`; radius defaults to `(height + width) / 4`.
pub fn circle_mask(image: &DynamicImage, center: (i32, i32), radius: Option<i32>) -> Result<Masked> {
    let (w, h) = dimensions(image)?;
    let radius = radius.unwrap_or(((h + w) / 4) as i32);
    if radius < 0 {
        return Err(CoinError::invalid(format!(
            "mask radius must not be negative, got {radius}"
        )));
    }
    let mut mask = GrayImage::new(w, h);
    draw_filled_circle_mut(&mut mask, center, radius, Luma([MASK_ON]));
    let image = apply_mask(image, &mask)?;
    Ok(Masked { mask, image })
}

/// Filled square centered on the image.
///
/// Its half side is `percentage` (default 0.70) of the mean of the center
/// coordinates, so the region spans `center - half ..= center + half`.
pub fn rectangle_mask(image: &DynamicImage, percentage: Option<f32>) -> Result<Masked> {
    let (w, h) = dimensions(image)?;
    let percentage = percentage.unwrap_or(DEFAULT_RECT_PERCENTAGE);
    if !percentage.is_finite() || percentage <= 0.0 || percentage > 1.0 {
        return Err(CoinError::invalid(format!(
            "mask percentage must be in (0, 1], got {percentage}"
        )));
    }
    let (cx, cy) = ((w / 2) as i32, (h / 2) as i32);
    let half = (((cx + cy) as f32 / 2.0) * percentage) as i32;
    let side = (2 * half + 1) as u32;

    let mut mask = GrayImage::new(w, h);
    draw_filled_rect_mut(
        &mut mask,
        Rect::at(cx - half, cy - half).of_size(side, side),
        Luma([MASK_ON]),
    );
    let image = apply_mask(image, &mask)?;
    Ok(Masked { mask, image })
}

fn zero_outside<P>(image: &ImageBuffer<P, Vec<u8>>, mask: &GrayImage) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let mut out = image.clone();
    for (pixel, m) in out.pixels_mut().zip(mask.pixels()) {
        if m[0] == 0 {
            pixel.channels_mut().fill(0);
        }
    }
    out
}

/// Keep pixels where `mask` is non-zero, zero the rest. The input is not modified.
pub fn apply_mask(image: &DynamicImage, mask: &GrayImage) -> Result<DynamicImage> {
    if mask.dimensions() != (image.width(), image.height()) {
        return Err(CoinError::invalid(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width(),
            mask.height(),
            image.width(),
            image.height()
        )));
    }
    Ok(match image {
        DynamicImage::ImageLuma8(gray) => DynamicImage::ImageLuma8(zero_outside(gray, mask)),
        other => DynamicImage::ImageRgb8(zero_outside(&other.to_rgb8(), mask)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn noisy_rgb(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            Rgb([(x * 7 % 251) as u8 + 1, (y * 13 % 251) as u8 + 1, 77])
        }))
    }

    #[test]
    fn circle_mask_zeroes_outside_and_keeps_inside() {
        let img = noisy_rgb(60, 40);
        let masked = circle_mask(&img, (30, 20), Some(10)).unwrap();
        let original = img.to_rgb8();
        let out = masked.image.to_rgb8();
        for (x, y, m) in masked.mask.enumerate_pixels() {
            if m[0] == MASK_ON {
                assert_eq!(out.get_pixel(x, y), original.get_pixel(x, y));
            } else {
                assert_eq!(*out.get_pixel(x, y), Rgb([0, 0, 0]));
            }
        }
        assert_eq!(masked.mask.get_pixel(30, 20)[0], MASK_ON);
        assert_eq!(masked.mask.get_pixel(30, 31)[0], 0);
    }

    #[test]
    fn remasking_is_idempotent() {
        let img = noisy_rgb(50, 50);
        let first = circle_mask(&img, (20, 25), None).unwrap();
        let again = apply_mask(&first.image, &first.mask).unwrap();
        assert_eq!(again, first.image);
    }

    #[test]
    fn circle_mask_default_radius() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 40, Luma([9])));
        let masked = circle_mask(&img, (20, 20), None).unwrap();
        // (40 + 40) / 4 = 20
        assert_eq!(masked.mask.get_pixel(20, 1)[0], MASK_ON);
        assert_eq!(masked.mask.get_pixel(0, 0)[0], 0);
        assert!(matches!(masked.image, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn rectangle_mask_default_size() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 100, Luma([200])));
        let masked = rectangle_mask(&img, None).unwrap();
        // center (50, 50), half side = trunc(50 * 0.7) = 35
        assert_eq!(masked.mask.get_pixel(15, 15)[0], MASK_ON);
        assert_eq!(masked.mask.get_pixel(85, 85)[0], MASK_ON);
        assert_eq!(masked.mask.get_pixel(14, 50)[0], 0);
        assert_eq!(masked.mask.get_pixel(86, 50)[0], 0);
        let on = masked.mask.pixels().filter(|p| p[0] == MASK_ON).count();
        assert_eq!(on, 71 * 71);
        assert_eq!(masked.image.to_luma8().get_pixel(5, 5)[0], 0);
    }

    #[test]
    fn rectangle_mask_validates_percentage() {
        let img = noisy_rgb(10, 10);
        for bad in [0.0, -0.5, 1.5, f32::NAN] {
            assert!(matches!(
                rectangle_mask(&img, Some(bad)),
                Err(CoinError::InvalidArgument(_))
            ));
        }
        assert!(rectangle_mask(&img, Some(1.0)).is_ok());
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let img = noisy_rgb(10, 10);
        assert!(apply_mask(&img, &GrayImage::new(9, 10)).is_err());
    }
}
