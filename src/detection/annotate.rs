use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_circle_mut;

use crate::models::{CandidateCircle, Color, Contour};

/// Outline every candidate on a copy of `image`.
///
/// The stroke grows inward from the rounded radius, one pixel ring per unit
/// of `stroke_width`.
pub fn draw_candidates(
    image: &RgbImage,
    candidates: &[CandidateCircle],
    color: Color,
    stroke_width: u32,
) -> RgbImage {
    let mut annotated = image.clone();
    let color: Rgb<u8> = color.into();
    for candidate in candidates {
        let center = candidate.pixel_center();
        let radius = candidate.pixel_radius();
        for offset in 0..stroke_width as i32 {
            let r = radius - offset;
            if r < 0 {
                break;
            }
            draw_hollow_circle_mut(&mut annotated, center, r, color);
        }
    }
    annotated
}

/// Rasterize contour points in white on a black canvas.
pub fn render_contours<'a>(
    width: u32,
    height: u32,
    contours: impl IntoIterator<Item = &'a Contour>,
) -> GrayImage {
    let mut canvas = GrayImage::new(width, height);
    for contour in contours {
        for p in &contour.points {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
                canvas.put_pixel(p.x as u32, p.y as u32, Luma([255]));
            }
        }
    }
    canvas
}
