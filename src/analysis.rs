//! The analysis orchestrator: frame sampling, landmark lookup, trace
//! assembly, and the final summary and screening decision.

use crate::config::AnalysisConfig;
use crate::constants::DEFAULT_FPS;
use crate::eye_metrics::{extract_eye_metrics, fused_mean, EyeMetrics, LEFT_EYE, RIGHT_EYE};
use crate::provider::LandmarkProvider;
use crate::screening::{classify, ScreeningResult};
use crate::source::{Frame, FrameSource};
use crate::stats::SummaryStatistics;
use crate::trace::{FrameSample, TraceSeries};
use crate::{Error, Result};
use log::{info, warn};
use serde::Serialize;

/// Metadata of the analyzed video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMeta {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Effective frames-per-second used for time alignment
    pub fps: f64,
}

/// Complete result of one analysis run
///
/// The serialized form is the transportable result document; the trace
/// series stays in memory for the caller to export separately.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Video metadata
    pub video: VideoMeta,
    /// Summary statistics over the trace series
    pub summary: SummaryStatistics,
    /// Screening decision
    pub screening: ScreeningResult,
    /// Parameters the run actually used
    pub params: AnalysisConfig,
    /// The full per-frame trace
    #[serde(skip)]
    pub trace: TraceSeries,
}

/// Result of analyzing a single still frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameAnalysis {
    /// Whether a face was detected
    pub detected: bool,
    /// Left eye metrics
    pub left: Option<EyeMetrics>,
    /// Right eye metrics
    pub right: Option<EyeMetrics>,
    /// Fused openness ratio
    pub eye_open: Option<f64>,
    /// Fused vertical offset
    pub vertical_offset: Option<f64>,
    /// Crude closed-eye probability derived from the openness ratio
    pub blink_prob: Option<f64>,
}

/// Drives the analysis pipeline over a frame source
///
/// The landmark provider is expensive to construct and cheap to reuse, so
/// the analyzer owns one instance and reuses it across frames and across
/// runs. Providers are not reentrant; concurrent runs need their own
/// analyzer (and provider) each.
pub struct VideoAnalyzer<P> {
    provider: P,
    config: AnalysisConfig,
}

impl<P: LandmarkProvider> VideoAnalyzer<P> {
    /// Create an analyzer around an owned landmark provider
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration fails boundary
    /// validation.
    pub fn new(provider: P, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    /// The configuration this analyzer runs with
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline over a frame source
    ///
    /// Frames are consumed strictly in order; every `frame_stride`-th raw
    /// frame becomes one [`FrameSample`], until the source is exhausted or
    /// the sampled-frame cap is reached. A mid-run source failure freezes
    /// the series accumulated so far rather than discarding the run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidFrames`] when zero samples accumulate, or
    /// the source's error when it fails before yielding any sample.
    pub fn analyze<S: FrameSource>(&mut self, source: &mut S) -> Result<AnalysisReport> {
        let fps = effective_fps(source.fps());
        let stride = self.config.sampling.frame_stride;
        let cap = self.config.sampling.max_sampled_frames;

        let video = VideoMeta {
            width: source.width(),
            height: source.height(),
            fps,
        };

        let mut trace = TraceSeries::new();
        let mut raw_idx = 0usize;

        while trace.len() < cap {
            let frame = match source.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) if trace.is_empty() => return Err(e),
                Err(e) => {
                    // Every sample accumulated so far is independently
                    // valid; keep the partial series.
                    warn!("Frame source failed mid-run after {} samples: {e}", trace.len());
                    break;
                }
            };

            if raw_idx % stride != 0 {
                raw_idx += 1;
                continue;
            }

            let time_sec = raw_idx as f64 / fps;
            let sample = match self.provider.process(&frame) {
                Ok(Some(landmarks)) => {
                    FrameSample::from_landmarks(raw_idx, time_sec, &landmarks, frame.width, frame.height)
                }
                Ok(None) => FrameSample::undetected(raw_idx, time_sec),
                Err(e) => {
                    warn!("Landmark provider failed on frame {raw_idx}: {e}");
                    FrameSample::undetected(raw_idx, time_sec)
                }
            };

            trace.push(sample);
            raw_idx += 1;
        }

        if trace.is_empty() {
            return Err(Error::NoValidFrames);
        }

        let summary = SummaryStatistics::compute(&trace, fps, &self.config.blink);
        let screening = classify(
            summary.vertical_peak_to_peak,
            self.config.screening.vertical_ptp_threshold,
        );

        info!(
            "Analyzed {} frames over {:.1}s: {} blinks, suspected={}",
            summary.frames_processed,
            summary.duration_sec.unwrap_or(0.0),
            summary.blink_count,
            screening.suspected
        );

        Ok(AnalysisReport {
            video,
            summary,
            screening,
            params: self.config.clone(),
            trace,
        })
    }

    /// Analyze one still frame
    ///
    /// # Errors
    ///
    /// Returns the provider's error if it fails on this frame.
    pub fn analyze_frame(&mut self, frame: &Frame) -> Result<FrameAnalysis> {
        let Some(landmarks) = self.provider.process(frame)? else {
            return Ok(FrameAnalysis {
                detected: false,
                left: None,
                right: None,
                eye_open: None,
                vertical_offset: None,
                blink_prob: None,
            });
        };

        let left = extract_eye_metrics(&landmarks, frame.width, frame.height, &LEFT_EYE);
        let right = extract_eye_metrics(&landmarks, frame.width, frame.height, &RIGHT_EYE);
        let eye_open = fused_mean(left.map(|m| m.eye_open), right.map(|m| m.eye_open));
        let vertical_offset = fused_mean(
            left.and_then(|m| m.vertical_offset),
            right.and_then(|m| m.vertical_offset),
        );

        let threshold = self.config.blink.closure_threshold;
        let blink_prob = eye_open.map(|open| ((threshold - open) / threshold).clamp(0.0, 1.0));

        Ok(FrameAnalysis {
            detected: true,
            left,
            right,
            eye_open,
            vertical_offset,
            blink_prob,
        })
    }

    /// Tear the analyzer down, releasing the provider
    pub fn into_provider(self) -> P {
        self.provider
    }
}

/// The fps actually used for time alignment: the source hint when usable,
/// otherwise a fixed fallback
fn effective_fps(hint: f64) -> f64 {
    if hint.is_finite() && hint > 0.0 {
        hint
    } else {
        warn!("Frame source gave no usable fps hint, assuming {DEFAULT_FPS}");
        DEFAULT_FPS
    }
}
