//! Per-frame samples and the trace series accumulated over one run.

use crate::eye_metrics::{extract_eye_metrics, fused_mean, EyeMetrics, LEFT_EYE, RIGHT_EYE};
use crate::landmarks::LandmarkSet;
use crate::Result;
use serde::Serialize;
use std::io::Write;

/// All measurements for one sampled frame
///
/// Undetected frames still carry their frame index and time so the series
/// stays positionally dense for time alignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSample {
    /// Raw index of the frame in the source
    pub frame_idx: usize,
    /// Frame time in seconds (frame_idx / fps)
    pub time_sec: f64,
    /// Whether a face was detected in this frame
    pub detected: bool,
    /// Left eye metrics, when the face and the left-eye landmarks were found
    pub left: Option<EyeMetrics>,
    /// Right eye metrics, when the face and the right-eye landmarks were found
    pub right: Option<EyeMetrics>,
    /// Whole-face openness: mean over the defined per-eye values
    pub eye_open: Option<f64>,
    /// Whole-face vertical offset: mean over the defined per-eye values
    pub vertical_offset: Option<f64>,
}

impl FrameSample {
    /// Build a sample from one frame's landmark set
    #[must_use]
    pub fn from_landmarks(
        frame_idx: usize,
        time_sec: f64,
        landmarks: &LandmarkSet,
        width: u32,
        height: u32,
    ) -> Self {
        let left = extract_eye_metrics(landmarks, width, height, &LEFT_EYE);
        let right = extract_eye_metrics(landmarks, width, height, &RIGHT_EYE);

        let eye_open = fused_mean(left.map(|m| m.eye_open), right.map(|m| m.eye_open));
        let vertical_offset = fused_mean(
            left.and_then(|m| m.vertical_offset),
            right.and_then(|m| m.vertical_offset),
        );

        Self {
            frame_idx,
            time_sec,
            detected: true,
            left,
            right,
            eye_open,
            vertical_offset,
        }
    }

    /// Build the sample for a frame in which no face was detected
    #[must_use]
    pub fn undetected(frame_idx: usize, time_sec: f64) -> Self {
        Self {
            frame_idx,
            time_sec,
            detected: false,
            left: None,
            right: None,
            eye_open: None,
            vertical_offset: None,
        }
    }
}

/// Ordered series of frame samples for one run, append-only while the run
/// is in progress and frozen afterwards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TraceSeries {
    samples: Vec<FrameSample>,
}

/// Column header of the exported trace table
pub const TRACE_CSV_HEADER: &str = "frame_idx,time_sec,\
L_iris_cx,L_iris_cy,L_eye_open,L_v_offset,\
R_iris_cx,R_iris_cy,R_eye_open,R_v_offset,\
eye_open,v_offset";

impl TraceSeries {
    /// Create an empty series
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next sample
    pub fn push(&mut self, sample: FrameSample) {
        self.samples.push(sample);
    }

    /// Number of samples in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples in frame order
    #[must_use]
    pub fn samples(&self) -> &[FrameSample] {
        &self.samples
    }

    /// At most the first `n` samples, for compact previews
    #[must_use]
    pub fn preview(&self, n: usize) -> &[FrameSample] {
        &self.samples[..self.samples.len().min(n)]
    }

    /// Fused openness values in frame order, `None` for undefined entries
    pub fn openness(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.samples.iter().map(|s| s.eye_open)
    }

    /// Defined fused vertical offsets in frame order
    pub fn vertical_offsets(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().filter_map(|s| s.vertical_offset)
    }

    /// Write the series as a delimited-text table, one row per sample
    ///
    /// Undefined values are emitted as empty cells.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{TRACE_CSV_HEADER}")?;
        for sample in &self.samples {
            let (l_cx, l_cy) = iris_cells(sample.left.as_ref());
            let (r_cx, r_cy) = iris_cells(sample.right.as_ref());
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{},{},{},{}",
                sample.frame_idx,
                sample.time_sec,
                l_cx,
                l_cy,
                cell(sample.left.map(|m| m.eye_open)),
                cell(sample.left.and_then(|m| m.vertical_offset)),
                r_cx,
                r_cy,
                cell(sample.right.map(|m| m.eye_open)),
                cell(sample.right.and_then(|m| m.vertical_offset)),
                cell(sample.eye_open),
                cell(sample.vertical_offset),
            )?;
        }
        Ok(())
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn iris_cells(metrics: Option<&EyeMetrics>) -> (String, String) {
    match metrics.and_then(|m| m.iris_center) {
        Some(center) => (center.x.to_string(), center.y.to_string()),
        None => (String::new(), String::new()),
    }
}
