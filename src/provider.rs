//! Landmark provider seam and the bundled recorded-landmark provider.
//!
//! Face and landmark detection live outside this crate. A provider is
//! expensive to construct and cheap to reuse, so the analyzer owns one
//! instance for its whole lifetime; `process` takes `&mut self` because
//! providers may keep internal tracking state between frames and must not
//! be shared across concurrent runs.

use crate::landmarks::LandmarkSet;
use crate::source::Frame;
use crate::{Error, Result};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Per-frame facial landmark supplier
pub trait LandmarkProvider {
    /// Process one frame, returning the detected face's landmarks or
    /// `None` when no face was found
    ///
    /// # Errors
    ///
    /// Returns an error if the provider itself fails; a frame without a
    /// detectable face is `Ok(None)`, not an error.
    fn process(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>>;
}

/// One recorded detection result, as written by an upstream detector
#[derive(Debug, Clone, Deserialize)]
pub struct LandmarkRecord {
    /// Whether a face was found in this frame
    pub detected: bool,
    /// Landmark positions, empty when `detected` is false
    #[serde(default)]
    pub landmarks: LandmarkSet,
}

/// Provider that replays landmark detections recorded to a JSON-lines file,
/// one record per raw video frame in order
pub struct RecordedLandmarkProvider {
    records: std::vec::IntoIter<LandmarkRecord>,
    exhausted_logged: bool,
}

impl RecordedLandmarkProvider {
    /// Load recorded detections from a JSON-lines file
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProviderUnavailable`] if the file cannot be read,
    /// [`Error::EmptyInput`] if it contains no records, and a JSON error
    /// for a malformed line.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::ProviderUnavailable(format!("{}: {e}", path.display())))?;

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }

        if records.is_empty() {
            return Err(Error::EmptyInput(format!(
                "no landmark records in {}",
                path.display()
            )));
        }

        log::info!(
            "Loaded {} landmark records from {}",
            records.len(),
            path.display()
        );
        Ok(Self::from_records(records))
    }

    /// Build a provider from in-memory records
    #[must_use]
    pub fn from_records(records: Vec<LandmarkRecord>) -> Self {
        Self {
            records: records.into_iter(),
            exhausted_logged: false,
        }
    }
}

impl LandmarkProvider for RecordedLandmarkProvider {
    fn process(&mut self, _frame: &Frame) -> Result<Option<LandmarkSet>> {
        match self.records.next() {
            Some(record) if record.detected => Ok(Some(record.landmarks)),
            Some(_) => Ok(None),
            None => {
                // Recording shorter than the video: degrade to undetected
                if !self.exhausted_logged {
                    log::warn!("Landmark recording exhausted before the frame source");
                    self.exhausted_logged = true;
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    fn blank_frame() -> Frame {
        Frame {
            width: 4,
            height: 4,
            data: vec![0; 4 * 4 * 3],
        }
    }

    #[test]
    fn test_replays_records_in_order() {
        let landmarks: LandmarkSet = [(33, Landmark::new(0.4, 0.5))].into_iter().collect();
        let mut provider = RecordedLandmarkProvider::from_records(vec![
            LandmarkRecord {
                detected: true,
                landmarks: landmarks.clone(),
            },
            LandmarkRecord {
                detected: false,
                landmarks: LandmarkSet::new(),
            },
        ]);

        let frame = blank_frame();
        let first = provider.process(&frame).expect("process");
        assert_eq!(first, Some(landmarks));
        let second = provider.process(&frame).expect("process");
        assert!(second.is_none());
    }

    #[test]
    fn test_exhausted_recording_degrades_to_undetected() {
        let mut provider = RecordedLandmarkProvider::from_records(vec![LandmarkRecord {
            detected: false,
            landmarks: LandmarkSet::new(),
        }]);

        let frame = blank_frame();
        let _ = provider.process(&frame).expect("process");
        assert!(provider.process(&frame).expect("process").is_none());
        assert!(provider.process(&frame).expect("process").is_none());
    }

    #[test]
    fn test_record_line_parses() {
        let line = r#"{"detected": true, "landmarks": {"33": {"x": 0.41, "y": 0.52}}}"#;
        let record: LandmarkRecord = serde_json::from_str(line).expect("parse");
        assert!(record.detected);
        assert_eq!(record.landmarks.get(33), Some(Landmark::new(0.41, 0.52)));
    }
}
