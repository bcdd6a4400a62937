//! Blink detection over a fused openness time series.
//!
//! A single forward pass with hysteresis: the eye must stay below the
//! closure threshold for a minimum number of consecutive frames before the
//! following reopening counts as one blink. Undefined samples (undetected
//! frames) end any closed run in progress, emitting the pending blink if it
//! held long enough.

/// Stateful blink counter over a sequence of openness values
#[derive(Debug, Clone)]
pub struct BlinkDetector {
    closure_threshold: f64,
    min_hold_frames: usize,
    closed: bool,
    hold: usize,
    count: usize,
}

impl BlinkDetector {
    /// Create a detector with the given closure threshold and minimum
    /// closed-run length
    #[must_use]
    pub fn new(closure_threshold: f64, min_hold_frames: usize) -> Self {
        Self {
            closure_threshold,
            min_hold_frames,
            closed: false,
            hold: 0,
            count: 0,
        }
    }

    /// Feed the next openness value, `None` for an undetected frame
    pub fn update(&mut self, openness: Option<f64>) {
        let Some(value) = openness else {
            self.emit_if_held();
            return;
        };

        if value < self.closure_threshold {
            if self.closed {
                self.hold += 1;
            } else {
                self.closed = true;
                self.hold = 1;
            }
        } else {
            self.emit_if_held();
        }
    }

    /// Blinks counted so far, excluding any closed run still in progress
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// End the sequence, flushing a trailing closed run, and return the
    /// final blink count
    #[must_use]
    pub fn finish(mut self) -> usize {
        self.emit_if_held();
        self.count
    }

    /// Close out the current run: count it if it held long enough, then
    /// return to the open state
    fn emit_if_held(&mut self) {
        if self.closed && self.hold >= self.min_hold_frames {
            self.count += 1;
        }
        self.closed = false;
        self.hold = 0;
    }
}

/// Count blinks over a complete openness series in one pass
#[must_use]
pub fn count_blinks<I>(series: I, closure_threshold: f64, min_hold_frames: usize) -> usize
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut detector = BlinkDetector::new(closure_threshold, min_hold_frames);
    for value in series {
        detector.update(value);
    }
    detector.finish()
}
