//! Resize, translate and rotate helpers.
//!
//! Single-channel images stay `Luma8`; everything else is handled as `Rgb8`.

use image::imageops::FilterType;
use image::{DynamicImage, Luma, Rgb};
use imageproc::geometric_transformations::{Interpolation, Projection, translate as shift, warp};

use crate::error::{CoinError, Result};

/// Which dimension a resize is anchored on; the other one follows the
/// aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeTarget {
    Width(u32),
    Height(u32),
}

fn ensure_positive_area(image: &DynamicImage) -> Result<(u32, u32)> {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return Err(CoinError::invalid(format!(
            "image must have a positive area, got {w}x{h}"
        )));
    }
    Ok((w, h))
}

/// Output size for resizing `width x height` to `target`.
///
/// The derived side is truncated and never drops below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, target: ResizeTarget) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(CoinError::invalid(format!(
            "image must have a positive area, got {width}x{height}"
        )));
    }
    match target {
        ResizeTarget::Width(0) | ResizeTarget::Height(0) => {
            Err(CoinError::invalid("resize target must be positive"))
        }
        ResizeTarget::Width(tw) => {
            let ratio = tw as f64 / width as f64;
            Ok((tw, ((height as f64 * ratio) as u32).max(1)))
        }
        ResizeTarget::Height(th) => {
            let ratio = th as f64 / height as f64;
            Ok((((width as f64 * ratio) as u32).max(1), th))
        }
    }
}

/// Resize while preserving the aspect ratio. `None` returns a copy.
pub fn resize(
    image: &DynamicImage,
    target: Option<ResizeTarget>,
    filter: FilterType,
) -> Result<DynamicImage> {
    let (w, h) = ensure_positive_area(image)?;
    let Some(target) = target else {
        return Ok(image.clone());
    };
    let (nw, nh) = scaled_dimensions(w, h, target)?;
    if (nw, nh) == (w, h) {
        return Ok(image.clone());
    }
    Ok(image.resize_exact(nw, nh, filter))
}

/// Shift content by `(dx, dy)`; uncovered pixels become black.
pub fn translate(image: &DynamicImage, dx: i32, dy: i32) -> Result<DynamicImage> {
    ensure_positive_area(image)?;
    Ok(match image {
        DynamicImage::ImageLuma8(gray) => DynamicImage::ImageLuma8(shift(gray, (dx, dy))),
        other => DynamicImage::ImageRgb8(shift(&other.to_rgb8(), (dx, dy))),
    })
}

/// Rotate counter-clockwise by `angle_degrees` about `center` and scale.
///
/// The default center is `(width / 2, height / 2)`. The frame keeps its
/// size; content leaving it is clipped and uncovered pixels are black.
pub fn rotate(
    image: &DynamicImage,
    angle_degrees: f32,
    center: Option<(f32, f32)>,
    scale: f32,
) -> Result<DynamicImage> {
    let (w, h) = ensure_positive_area(image)?;
    if !angle_degrees.is_finite() {
        return Err(CoinError::invalid("rotation angle must be finite"));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CoinError::invalid(format!(
            "rotation scale must be positive, got {scale}"
        )));
    }
    let (cx, cy) = center.unwrap_or(((w / 2) as f32, (h / 2) as f32));

    // Image y grows downward, so a positive projection angle turns clockwise
    // on screen.
    let projection = Projection::translate(cx, cy)
        * Projection::rotate(-angle_degrees.to_radians())
        * Projection::scale(scale, scale)
        * Projection::translate(-cx, -cy);

    Ok(match image {
        DynamicImage::ImageLuma8(gray) => DynamicImage::ImageLuma8(warp(
            gray,
            &projection,
            Interpolation::Bilinear,
            Luma([0]),
        )),
        other => DynamicImage::ImageRgb8(warp(
            &other.to_rgb8(),
            &projection,
            Interpolation::Bilinear,
            Rgb([0, 0, 0]),
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage};

    #[test]
    fn resize_by_width_keeps_aspect() {
        for (w, h, target) in [(640, 480, 255), (500, 500, 255), (1000, 333, 200), (37, 91, 10)] {
            let img = DynamicImage::ImageRgb8(RgbImage::new(w, h));
            let out = resize(&img, Some(ResizeTarget::Width(target)), FilterType::Triangle).unwrap();
            assert_eq!(out.width(), target);
            let expected = h as f64 * target as f64 / w as f64;
            assert!((out.height() as f64 - expected).abs() <= 1.0, "{w}x{h}");
        }
    }

    #[test]
    fn resize_by_height_keeps_aspect() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(300, 200));
        let out = resize(&img, Some(ResizeTarget::Height(100)), FilterType::Nearest).unwrap();
        assert_eq!((out.width(), out.height()), (150, 100));
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn resize_without_target_is_identity() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(7, 5, Rgb([1, 2, 3])));
        assert_eq!(resize(&img, None, FilterType::Triangle).unwrap(), img);
    }

    #[test]
    fn resize_rejects_degenerate_input() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 5));
        assert!(matches!(
            resize(&img, Some(ResizeTarget::Width(10)), FilterType::Triangle),
            Err(CoinError::InvalidArgument(_))
        ));
        let img = DynamicImage::ImageRgb8(RgbImage::new(5, 5));
        assert!(resize(&img, Some(ResizeTarget::Height(0)), FilterType::Triangle).is_err());
    }

    #[test]
    fn derived_side_never_collapses() {
        assert_eq!(scaled_dimensions(1000, 1, ResizeTarget::Width(10)).unwrap(), (10, 1));
    }

    #[test]
    fn translate_shifts_and_fills_black() {
        let mut gray = GrayImage::new(10, 10);
        gray.put_pixel(2, 3, Luma([200]));
        gray.put_pixel(9, 9, Luma([50]));
        let out = translate(&DynamicImage::ImageLuma8(gray), 4, 1).unwrap().to_luma8();
        assert_eq!(out.get_pixel(6, 4)[0], 200);
        assert_eq!(out.get_pixel(2, 3)[0], 0);
        // (9, 9) was shifted out of frame.
        assert_eq!(out.pixels().filter(|p| p[0] != 0).count(), 1);
    }

    #[test]
    fn rotate_keeps_frame_size() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, Rgb([255, 255, 255])));
        let out = rotate(&img, 30.0, None, 1.0).unwrap();
        assert_eq!((out.width(), out.height()), (40, 20));
    }

    #[test]
    fn rotate_exposes_black_corners() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(41, 41, Luma([255])));
        let out = rotate(&img, 45.0, None, 1.0).unwrap().to_luma8();
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(20, 20)[0], 255);
    }

    #[test]
    fn quarter_turn_moves_right_side_to_top() {
        // Bright right half; a counter-clockwise quarter turn puts it on top.
        let img = GrayImage::from_fn(41, 41, |x, _| if x > 25 { Luma([255]) } else { Luma([0]) });
        let out = rotate(&DynamicImage::ImageLuma8(img), 90.0, None, 1.0)
            .unwrap()
            .to_luma8();
        assert_eq!(out.get_pixel(20, 5)[0], 255);
        assert_eq!(out.get_pixel(20, 35)[0], 0);
    }

    #[test]
    fn half_scale_shrinks_content() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(41, 41, Luma([255])));
        let out = rotate(&img, 0.0, None, 0.5).unwrap().to_luma8();
        assert_eq!(out.get_pixel(2, 2)[0], 0);
        assert_eq!(out.get_pixel(20, 20)[0], 255);
    }

    #[test]
    fn rotate_rejects_bad_scale() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(4, 4));
        assert!(rotate(&img, 10.0, None, 0.0).is_err());
        assert!(rotate(&img, f32::NAN, None, 1.0).is_err());
    }
}
