use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

fn main() -> anyhow::Result<()> {
    let mut img = RgbImage::new(800, 600);

    // Warm gradient table top
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let shade = 200 + ((x + y) * 40 / 1400) as u8;
        *pixel = Rgb([shade, shade - 15, shade - 40]);
    }

    // Coins of a few sizes; at the 255 px working width these land at
    // radii of roughly 22, 29 and 35 px.
    let coins = [((180, 160), 70), ((420, 200), 90), ((620, 420), 110), ((260, 430), 90)];
    for (center, radius) in coins {
        draw_filled_circle_mut(&mut img, center, radius, Rgb([120, 90, 40]));
        draw_filled_circle_mut(&mut img, center, radius * 3 / 4, Rgb([150, 115, 55]));
    }

    img.save("sample_coins.png")?;
    println!("Created sample_coins.png (800x600, {} coins)", coins.len());
    Ok(())
}
