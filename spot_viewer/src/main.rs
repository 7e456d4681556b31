use anyhow::{Context, bail};
use brightspot::{Command, Config, Flow, Session};
use clap::Parser;
use image::RgbImage;
use opencv::{
    core::{self, Mat, Scalar},
    highgui, imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};
use std::path::PathBuf;

const WINDOW_NAME: &str = "Bright Spot Detector";

#[derive(Parser, Debug)]
#[command(name = "spot_viewer", about = "Live bright spot detection from a webcam")]
struct Args {
    /// JSON config file; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the capture device index from the config.
    #[arg(long)]
    device: Option<i32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // --- 1. Configuration ---
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(device) = args.device {
        config.capture.device = device;
    }
    let mut session = Session::new(config)?;
    let capture = session.config().capture.clone();

    // --- 2. Video I/O Initialization ---
    let mut cap = VideoCapture::new(capture.device, videoio::CAP_ANY)?;
    cap.set(videoio::CAP_PROP_FRAME_WIDTH, capture.width as f64)?;
    cap.set(videoio::CAP_PROP_FRAME_HEIGHT, capture.height as f64)?;
    if !cap.is_opened()? {
        bail!("could not open capture device {}", capture.device);
    }

    log::info!("starting bright spot detector");
    log::info!("q: quit, t: toggle overlay, s: switch style, +/-: threshold");

    // --- 3. Main Processing Loop ---
    let mut frame = Mat::default();
    loop {
        if !cap.read(&mut frame)? || frame.empty() {
            log::warn!("capture returned no frame, stopping");
            break;
        }

        // --- 4. Frame Conversion & Processing ---
        let rgb = mat_to_rgb(&frame)?;
        let result = session.process(rgb);

        // --- 5. Visualization ---
        let mut output = rgb_to_mat(&result.annotated)?;
        draw_hud(&mut output, result.subjects.len(), session.threshold())?;
        highgui::imshow(WINDOW_NAME, &output)?;

        // --- 6. Key Bindings ---
        let key = highgui::wait_key(1)?;
        if let Some(command) = Command::from_key(key) {
            if session.apply(command) == Flow::Stop {
                break;
            }
        }
    }

    cap.release()?;
    highgui::destroy_all_windows()?;
    Ok(())
}

/// Copies a BGR capture frame into an RGB image buffer.
fn mat_to_rgb(frame: &Mat) -> anyhow::Result<RgbImage> {
    let mut rgb = Mat::default();
    imgproc::cvt_color(frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;
    let width = rgb.cols() as u32;
    let height = rgb.rows() as u32;
    let bytes = rgb.data_bytes()?.to_vec();
    RgbImage::from_raw(width, height, bytes).context("capture frame has an unexpected layout")
}

/// Copies an RGB image buffer back into a BGR Mat for display.
fn rgb_to_mat(image: &RgbImage) -> anyhow::Result<Mat> {
    let flat = Mat::from_slice(image.as_raw())?;
    let rgb = flat.reshape(3, image.height() as i32)?;
    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
    Ok(bgr)
}

fn draw_hud(frame: &mut Mat, subject_count: usize, threshold: u8) -> opencv::Result<()> {
    let white = Scalar::new(255.0, 255.0, 255.0, 0.0);
    let lines = [
        (format!("Bright spots: {subject_count}"), 30),
        (format!("Threshold: {threshold}"), 60),
    ];
    for (text, y) in lines {
        imgproc::put_text(
            frame,
            &text,
            core::Point::new(10, y),
            imgproc::FONT_HERSHEY_SIMPLEX,
            0.6,
            white,
            2,
            imgproc::LINE_8,
            false,
        )?;
    }
    Ok(())
}
