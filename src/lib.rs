//! Eye movement screening library for recorded facial video.
//!
//! This library screens facial video for signs of abnormal vertical eye
//! movement and blink patterns, as a coarse proxy for a gaze-palsy
//! condition. The pipeline consists of:
//! 1. Sequential frame pull through a [`source::FrameSource`]
//! 2. Facial landmark lookup through a [`provider::LandmarkProvider`]
//! 3. Per-eye geometric metrics and left/right fusion per frame
//! 4. Blink detection and robust statistics over the assembled trace
//! 5. A rule-based screening decision
//!
//! Face detection itself and video container decoding are external
//! collaborators behind the two traits; the bundled adapters replay
//! recorded landmarks and read image sequences.
//!
//! # Examples
//!
//! ```no_run
//! use eye_screening::analysis::VideoAnalyzer;
//! use eye_screening::config::AnalysisConfig;
//! use eye_screening::provider::RecordedLandmarkProvider;
//! use eye_screening::source::ImageSequenceSource;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = RecordedLandmarkProvider::open("session/landmarks.jsonl")?;
//! let mut analyzer = VideoAnalyzer::new(provider, AnalysisConfig::default())?;
//!
//! let mut source = ImageSequenceSource::open("session/frames", 30.0)?;
//! let report = analyzer.analyze(&mut source)?;
//!
//! println!(
//!     "{} blinks over {:?} seconds, suspected: {}",
//!     report.summary.blink_count,
//!     report.summary.duration_sec,
//!     report.screening.suspected
//! );
//!
//! let mut csv = std::fs::File::create("session/trace.csv")?;
//! report.trace.write_csv(&mut csv)?;
//! # Ok(())
//! # }
//! ```

/// The analysis orchestrator and report types
pub mod analysis;

/// Blink detection state machine
pub mod blink;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Error types and result handling
pub mod error;

/// Per-eye geometric metrics and left/right fusion
pub mod eye_metrics;

/// Normalized facial landmark positions
pub mod landmarks;

/// Landmark provider seam and the recorded-landmark adapter
pub mod provider;

/// Rule-based screening decision
pub mod screening;

/// Frame source seam and the image-sequence adapter
pub mod source;

/// Robust aggregate statistics
pub mod stats;

/// Per-frame samples and the trace series
pub mod trace;

pub use error::{Error, Result};
