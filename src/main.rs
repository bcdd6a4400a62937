//! Eye movement screening over recorded facial video.

use anyhow::{Context, Result};
use clap::Parser;
use eye_screening::analysis::VideoAnalyzer;
use eye_screening::config::AnalysisConfig;
use eye_screening::provider::RecordedLandmarkProvider;
use eye_screening::source::{Frame, ImageSequenceSource};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of video frames exported as still images
    #[arg(long, required_unless_present = "image")]
    frames: Option<PathBuf>,

    /// Single image to analyze instead of a frame sequence
    #[arg(long, conflicts_with = "frames")]
    image: Option<PathBuf>,

    /// Recorded landmark detections (JSON lines, one record per raw frame)
    #[arg(short, long)]
    landmarks: PathBuf,

    /// Frames per second of the recorded video
    #[arg(long, default_value = "30.0")]
    fps: f64,

    /// Process every Nth raw frame
    #[arg(long)]
    stride: Option<usize>,

    /// Hard cap on sampled frames
    #[arg(long)]
    max_frames: Option<usize>,

    /// Eyelid closure threshold on the openness ratio
    #[arg(long)]
    blink_thresh: Option<f64>,

    /// Minimum consecutive closed frames for one blink
    #[arg(long)]
    blink_min_frames: Option<usize>,

    /// Vertical peak-to-peak threshold for the screening rule
    #[arg(long)]
    vpp_thresh: Option<f64>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Write the per-frame trace as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the report document as JSON to this path (stdout otherwise)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Eye Movement Screening");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match AnalysisConfig::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                AnalysisConfig::default()
            }
        }
    } else {
        AnalysisConfig::default()
    };

    // Command line flags override file values
    if let Some(stride) = args.stride {
        config.sampling.frame_stride = stride;
    }
    if let Some(max_frames) = args.max_frames {
        config.sampling.max_sampled_frames = max_frames;
    }
    if let Some(threshold) = args.blink_thresh {
        config.blink.closure_threshold = threshold;
    }
    if let Some(min_frames) = args.blink_min_frames {
        config.blink.min_hold_frames = min_frames;
    }
    if let Some(threshold) = args.vpp_thresh {
        config.screening.vertical_ptp_threshold = threshold;
    }

    let provider = RecordedLandmarkProvider::open(&args.landmarks)
        .with_context(|| format!("loading landmarks from {}", args.landmarks.display()))?;
    let mut analyzer = VideoAnalyzer::new(provider, config)?;

    if let Some(image_path) = &args.image {
        return analyze_single_image(&mut analyzer, image_path, args.json.as_deref());
    }

    let Some(frames_dir) = args.frames.as_ref() else {
        anyhow::bail!("either --frames or --image is required");
    };
    let mut source = ImageSequenceSource::open(frames_dir, args.fps)
        .with_context(|| format!("opening frame sequence {}", frames_dir.display()))?;

    let report = analyzer.analyze(&mut source)?;

    if let Some(csv_path) = &args.csv {
        let mut file = std::fs::File::create(csv_path)
            .with_context(|| format!("creating {}", csv_path.display()))?;
        report.trace.write_csv(&mut file)?;
        info!("Wrote trace of {} frames to {}", report.trace.len(), csv_path.display());
    }

    let document = serde_json::to_string_pretty(&report)?;
    match &args.json {
        Some(json_path) => {
            std::fs::write(json_path, document)
                .with_context(|| format!("writing {}", json_path.display()))?;
            info!("Wrote report to {}", json_path.display());
        }
        None => println!("{document}"),
    }

    Ok(())
}

fn analyze_single_image(
    analyzer: &mut VideoAnalyzer<RecordedLandmarkProvider>,
    image_path: &std::path::Path,
    json_out: Option<&std::path::Path>,
) -> Result<()> {
    let image = image::ImageReader::open(image_path)
        .with_context(|| format!("opening {}", image_path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", image_path.display()))?
        .to_rgb8();
    let frame = Frame::from_rgb(image);

    let analysis = analyzer.analyze_frame(&frame)?;
    let document = serde_json::to_string_pretty(&analysis)?;
    match json_out {
        Some(path) => std::fs::write(path, document)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{document}"),
    }

    Ok(())
}
