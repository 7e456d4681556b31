// Still-image runner: detects bright spots in one image file, writes the
// annotated frame as PNG and prints a JSON report of the ranked subjects.

use anyhow::Context;
use brightspot::{Config, OverlayStyle, Session};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brightspot", about = "Annotate bright spots in a still image")]
struct Args {
    /// Input image (any format the `image` crate can decode).
    input: PathBuf,
    /// Output PNG path.
    output: PathBuf,
    /// JSON config file; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the detection threshold.
    #[arg(long)]
    threshold: Option<u8>,
    /// Render with the glitch style instead of the simple one.
    #[arg(long)]
    glitch: bool,
}

#[derive(Serialize)]
struct SubjectReport {
    rank: usize,
    x: f64,
    y: f64,
    area: f64,
    brightness: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(threshold) = args.threshold {
        config.detection.threshold = threshold;
    }

    let mut session = Session::new(config)?;
    if args.glitch && session.overlay().style() != OverlayStyle::Glitch {
        session.switch_overlay_style();
    }

    let frame = image::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?
        .to_rgb8();
    let result = session.process(frame);

    result
        .annotated
        .save_with_format(&args.output, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    let report: Vec<SubjectReport> = result
        .subjects
        .iter()
        .enumerate()
        .map(|(rank, s)| SubjectReport {
            rank,
            x: s.x,
            y: s.y,
            area: s.area,
            brightness: s.brightness,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&report)?);
    log::info!(
        "{} bright spots at threshold {}, saved {}",
        report.len(),
        session.threshold(),
        args.output.display()
    );
    Ok(())
}
