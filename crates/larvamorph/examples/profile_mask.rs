use image::ImageReader;
use larvamorph::{compute_curvature_profile, CurvatureConfig, Mask};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <mask.png> [config.json] [out.json]", args[0]);
        std::process::exit(2);
    }

    let image = ImageReader::open(&args[1])?.decode()?.to_luma8();
    let mask = Mask::from_gray_image(&image)?;
    let config = match args.get(2) {
        Some(path) => CurvatureConfig::from_json_file(Path::new(path))?,
        None => CurvatureConfig::default(),
    };

    let profile = compute_curvature_profile(&mask, &config)?;
    match profile.stats() {
        Some(s) => println!(
            "{} edge pixels on {} contours: mean {:.4}, median {:.4}, p95|k| {:.4}",
            s.count,
            profile.spans().len(),
            s.mean,
            s.median,
            s.p95_abs
        ),
        None => println!("No contour longer than {} points.", config.min_contour_length),
    }

    if let Some(out_path) = args.get(3) {
        let json = serde_json::to_string_pretty(&profile)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
