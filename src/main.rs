use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use coincount::{
    CandidateCircle, CoinDetector, Color, DEFAULT_WORKING_WIDTH, DenoiseMethod, DetectionParams,
    compute_histogram, decode_image, prepare_image,
};

#[derive(Parser)]
#[command(name = "coincount")]
#[command(about = "Count coins in a photograph and save an annotated copy")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// JSON file with detection parameters (flags below override it)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Denoising filter: median or gaussian
    #[arg(long)]
    method: Option<DenoiseMethod>,

    /// Annotation color as #RRGGBB
    #[arg(long)]
    color: Option<Color>,

    /// Smallest admitted coin radius in pixels (exclusive)
    #[arg(long)]
    min_radius: Option<f32>,

    /// Largest admitted coin radius in pixels (exclusive)
    #[arg(long)]
    max_radius: Option<f32>,

    /// Canny low threshold
    #[arg(long)]
    canny_low: Option<f32>,

    /// Canny high threshold
    #[arg(long)]
    canny_high: Option<f32>,

    /// Outline width in pixels
    #[arg(long)]
    stroke: Option<u32>,

    /// Working width the photo is resized to before detection (0 keeps the original size)
    #[arg(long, default_value_t = DEFAULT_WORKING_WIDTH)]
    width: u32,

    /// Where to save the annotated image
    #[arg(short, long, default_value = "coins_detected.png")]
    output: PathBuf,

    /// Save every stage's image to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print intensity histogram summaries of the working image
    #[arg(long)]
    histogram: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn params(&self) -> anyhow::Result<DetectionParams> {
        let mut params = match &self.config {
            Some(path) => DetectionParams::from_json_file(path)?,
            None => DetectionParams::default(),
        };
        if let Some(method) = self.method {
            params.method = method;
        }
        if let Some(color) = self.color {
            params.color = color;
        }
        if let Some(lower) = self.min_radius {
            params.radius.lower = lower;
        }
        if let Some(upper) = self.max_radius {
            params.radius.upper = upper;
        }
        if let Some(low) = self.canny_low {
            params.canny.low = low;
        }
        if let Some(high) = self.canny_high {
            params.canny.high = high;
        }
        if let Some(stroke) = self.stroke {
            params.stroke_width = stroke;
        }
        Ok(params)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    image: &'a std::path::Path,
    output: &'a std::path::Path,
    width: u32,
    height: u32,
    contours: usize,
    count: usize,
    coins: &'a [CandidateCircle],
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let params = args.params()?;
    log::debug!("detection params: {params:?}");

    log::debug!("loading image: {}", args.image_path.display());
    let bytes = std::fs::read(&args.image_path)?;
    let img = decode_image(&bytes)?;
    log::debug!("image loaded: {}x{}", img.width(), img.height());

    let working_width = (args.width > 0).then_some(args.width);
    let prepared = prepare_image(&img, working_width)?;

    let mut detector = CoinDetector::new(params)?;
    if let Some(debug_dir) = &args.debug_out {
        detector = detector.with_debug(debug_dir)?;
    }

    let result = detector.detect(&prepared)?;

    result
        .annotated
        .save(&args.output)
        .map_err(|e| anyhow::anyhow!("Failed to save {}: {}", args.output.display(), e))?;

    if args.json {
        let report = Report {
            image: &args.image_path,
            output: &args.output,
            width: prepared.width(),
            height: prepared.height(),
            contours: result.contours.len(),
            count: result.count,
            coins: &result.candidates,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("The number of coins found: {}", result.count);
        for (i, coin) in result.candidates.iter().enumerate() {
            println!(
                "  Coin {} at ({:.1}, {:.1}) - radius: {:.1}",
                i + 1,
                coin.center.0,
                coin.center.1,
                coin.radius
            );
        }
        println!("Annotated image saved to {}", args.output.display());
    }

    if args.histogram {
        let prepared = image::DynamicImage::ImageRgb8(prepared);
        let gray = compute_histogram(&prepared, None, true)?;
        let color = compute_histogram(&prepared, None, false)?;
        println!("\nIntensity peaks:");
        if let Some(peak) = gray.peak(0) {
            println!("  gray: bin {peak}");
        }
        for (name, idx) in [("red", 0), ("green", 1), ("blue", 2)] {
            if let Some(peak) = color.peak(idx) {
                println!("  {name}: bin {peak} ({} pixels)", color.channels[idx][peak as usize]);
            }
        }
    }

    Ok(())
}
