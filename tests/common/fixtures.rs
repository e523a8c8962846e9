use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use std::io::Cursor;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// A drawn coin: center and radius in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Disc {
    pub center: (i32, i32),
    pub radius: i32,
}

/// Three coins whose radii sit inside the default (30, 50) bounds.
pub const IN_RANGE: [Disc; 3] = [
    Disc { center: (110, 110), radius: 35 },
    Disc { center: (390, 110), radius: 40 },
    Disc { center: (250, 380), radius: 45 },
];

/// One coin too small and one too large for the default bounds.
pub const OUT_OF_RANGE: [Disc; 2] = [
    Disc { center: (400, 400), radius: 20 },
    Disc { center: (100, 360), radius: 60 },
];

/// White canvas with black filled discs.
pub fn coin_image(width: u32, height: u32, discs: &[Disc]) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, WHITE);
    for disc in discs {
        draw_filled_circle_mut(&mut img, disc.center, disc.radius, BLACK);
    }
    img
}

/// The 500x500 three-coin scene.
pub fn three_coins() -> RgbImage {
    coin_image(500, 500, &IN_RANGE)
}

/// The three-coin scene plus the two out-of-range discs.
pub fn three_coins_with_decoys() -> RgbImage {
    let discs: Vec<Disc> = IN_RANGE.iter().chain(OUT_OF_RANGE.iter()).copied().collect();
    coin_image(500, 500, &discs)
}

/// Encode an image as PNG bytes, the way an upload would arrive.
pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode test image");
    buf
}

/// True if some candidate center lies within `tol` pixels of `expected` on both axes.
pub fn has_center_near(centers: &[(f32, f32)], expected: (i32, i32), tol: f32) -> bool {
    centers.iter().any(|&(x, y)| {
        (x - expected.0 as f32).abs() <= tol && (y - expected.1 as f32).abs() <= tol
    })
}
