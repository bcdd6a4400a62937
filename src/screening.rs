//! Rule-based screening decision over the aggregated vertical excursion.
//!
//! A deliberately simple, auditable single-threshold rule rather than a
//! learned model: reduced vertical iris excursion over the observation
//! window is the proxy signal. The threshold default has no clinical
//! derivation and is exposed as configuration.

use serde::Serialize;

/// Outcome of the screening rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningResult {
    /// Whether the rule fired
    pub suspected: bool,
    /// Human-readable rationale embedding the measured value and threshold
    pub reason: String,
    /// The threshold the decision was made against
    pub threshold_used: f64,
}

/// Apply the screening rule: suspected iff the peak-to-peak value is
/// defined and strictly below the threshold
#[must_use]
pub fn classify(vertical_peak_to_peak: Option<f64>, threshold: f64) -> ScreeningResult {
    let suspected = vertical_peak_to_peak.is_some_and(|ptp| ptp < threshold);
    let reason = match vertical_peak_to_peak {
        Some(ptp) if suspected => {
            format!("vertical_peak_to_peak({ptp:.3}) < threshold({threshold:.3})")
        }
        _ => "criteria_not_met".to_string(),
    };
    ScreeningResult {
        suspected,
        reason,
        threshold_used: threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_is_suspected() {
        let result = classify(Some(0.03), 0.06);
        assert!(result.suspected);
        assert!(result.reason.contains("0.030"));
        assert!(result.reason.contains("0.060"));
        assert_eq!(result.threshold_used, 0.06);
    }

    #[test]
    fn test_at_threshold_is_not_suspected() {
        let result = classify(Some(0.06), 0.06);
        assert!(!result.suspected);
        assert_eq!(result.reason, "criteria_not_met");
    }

    #[test]
    fn test_above_threshold_is_not_suspected() {
        assert!(!classify(Some(0.5), 0.06).suspected);
    }

    #[test]
    fn test_undefined_is_not_suspected() {
        let result = classify(None, 0.06);
        assert!(!result.suspected);
        assert_eq!(result.reason, "criteria_not_met");
    }
}
