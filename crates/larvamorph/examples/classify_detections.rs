use larvamorph::{Detections, Landmark, Zebrafish};
use std::error::Error;

/// Bounding box `[x0, y0, x1, y1]` as emitted by the detector.
type BBox = [f64; 4];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <detections.json>", args[0]);
        std::process::exit(2);
    }

    let text = std::fs::read_to_string(&args[1])?;
    let detections: Detections<BBox> = serde_json::from_str(&text)?;
    let fish = Zebrafish::new(detections);

    for (phenotype, value) in fish.phenotypes() {
        println!("{:?}: {}", phenotype, value);
    }

    for landmark in Landmark::ALL {
        match fish.landmark(landmark) {
            Some(b) => println!("{:?}: {:?}", landmark, b),
            None => println!("{:?}: not available", landmark),
        }
    }
    Ok(())
}
