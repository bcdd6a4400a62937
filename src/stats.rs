//! Robust aggregate statistics over a completed trace series.
//!
//! Every aggregate treats "no defined input values" as an explicit `None`
//! rather than an error, so a run over fully-undetected footage still
//! produces a well-formed summary.

use crate::blink::count_blinks;
use crate::config::BlinkConfig;
use crate::constants::{ROBUST_PTP_HIGH_PERCENTILE, ROBUST_PTP_LOW_PERCENTILE};
use crate::trace::TraceSeries;
use serde::Serialize;

/// Summary statistics for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Number of sampled frames in the series, detected or not
    pub frames_processed: usize,
    /// Effective frames-per-second used for time alignment
    pub fps: f64,
    /// Time span covered by the series
    pub duration_sec: Option<f64>,
    /// Standard deviation of the fused vertical offset
    pub vertical_offset_std: Option<f64>,
    /// Robust spread (p95 - p5) of the fused vertical offset
    pub vertical_peak_to_peak: Option<f64>,
    /// Blinks counted over the fused openness series
    pub blink_count: usize,
    /// Blink count normalized to a per-minute rate
    pub blink_rate_per_min: Option<f64>,
}

impl SummaryStatistics {
    /// Compute the summary for a completed series
    #[must_use]
    pub fn compute(series: &TraceSeries, fps: f64, blink: &BlinkConfig) -> Self {
        let vertical: Vec<f64> = series.vertical_offsets().collect();

        let blink_count = count_blinks(series.openness(), blink.closure_threshold, blink.min_hold_frames);

        let duration_sec = duration_sec(series);
        let blink_rate_per_min = match duration_sec {
            Some(duration) if duration > 0.0 => Some(blink_count as f64 / duration * 60.0),
            _ => None,
        };

        Self {
            frames_processed: series.len(),
            fps,
            duration_sec,
            vertical_offset_std: population_std(&vertical),
            vertical_peak_to_peak: robust_peak_to_peak(&vertical),
            blink_count,
            blink_rate_per_min,
        }
    }
}

/// Percentile of a sorted slice using linear interpolation between ranks
///
/// The slice must be non-empty and sorted ascending; `pct` is in [0, 100].
fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let frac = rank - lower as f64;
    if lower + 1 < sorted.len() {
        sorted[lower] + frac * (sorted[lower + 1] - sorted[lower])
    } else {
        sorted[lower]
    }
}

/// Spread between the 95th and 5th percentile, robust against a small
/// number of extreme outliers unlike plain max - min
#[must_use]
pub fn robust_peak_to_peak(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let low = percentile_sorted(&sorted, ROBUST_PTP_LOW_PERCENTILE);
    let high = percentile_sorted(&sorted, ROBUST_PTP_HIGH_PERCENTILE);
    Some(high - low)
}

/// Population standard deviation, `None` on empty input
#[must_use]
pub fn population_std(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}

/// Time span of the series: max - min over sample times, 0 for a single
/// sample, `None` for an empty series
#[must_use]
pub fn duration_sec(series: &TraceSeries) -> Option<f64> {
    let mut times = series.samples().iter().map(|s| s.time_sec);
    let first = times.next()?;
    let (min, max) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    Some(max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::FrameSample;

    fn series_with_times(times: &[f64]) -> TraceSeries {
        let mut series = TraceSeries::new();
        for (i, &t) in times.iter().enumerate() {
            series.push(FrameSample::undetected(i, t));
        }
        series
    }

    #[test]
    fn test_robust_ptp_empty() {
        assert_eq!(robust_peak_to_peak(&[]), None);
    }

    #[test]
    fn test_robust_ptp_uniform_range() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let ptp = robust_peak_to_peak(&values).expect("ptp");
        // Interpolated p95 - p5 of 0..=100 is exactly 90, not 100
        assert!((ptp - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_robust_ptp_resists_outliers() {
        let mut values: Vec<f64> = (0..=100).map(f64::from).collect();
        values.push(1e6);
        let ptp = robust_peak_to_peak(&values).expect("ptp");
        assert!(ptp < 200.0);
    }

    #[test]
    fn test_robust_ptp_scales_linearly() {
        let values = [0.01, -0.02, 0.035, 0.0, -0.015, 0.02, 0.005];
        let k = 3.5;
        let scaled: Vec<f64> = values.iter().map(|v| v * k).collect();
        let base = robust_peak_to_peak(&values).expect("ptp");
        let scaled_ptp = robust_peak_to_peak(&scaled).expect("ptp");
        assert!((scaled_ptp - k * base).abs() < 1e-12);
    }

    #[test]
    fn test_population_std() {
        assert_eq!(population_std(&[]), None);
        assert_eq!(population_std(&[2.5]), Some(0.0));
        let std = population_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).expect("std");
        assert!((std - 1.4142135623730951).abs() < 1e-12);
    }

    #[test]
    fn test_duration() {
        assert_eq!(duration_sec(&TraceSeries::new()), None);
        assert_eq!(duration_sec(&series_with_times(&[1.5])), Some(0.0));
        assert_eq!(duration_sec(&series_with_times(&[0.0, 0.5, 1.0])), Some(1.0));
    }

    #[test]
    fn test_summary_on_empty_values() {
        let series = series_with_times(&[0.0, 0.1, 0.2]);
        let blink = BlinkConfig::default();
        let summary = SummaryStatistics::compute(&series, 30.0, &blink);

        assert_eq!(summary.frames_processed, 3);
        assert_eq!(summary.vertical_offset_std, None);
        assert_eq!(summary.vertical_peak_to_peak, None);
        assert_eq!(summary.blink_count, 0);
        // Duration is defined but there were no blinks to rate
        assert_eq!(summary.blink_rate_per_min, Some(0.0));
    }
}
