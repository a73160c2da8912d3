//! Projected-profit display smoothing.
//!
//! A mid-refetch read cycle can transiently yield no value; overwriting the
//! displayed projection with a blank would flicker. The display therefore
//! retains the last good number until a new valid one arrives. This is the
//! only client-side state that persists across renders independent of chain
//! reads.

use parking_lot::Mutex;

/// Holds the last successfully computed projected value.
///
/// First paint, before any valid sample, shows zero.
#[derive(Debug, Default)]
pub struct ProfitDisplay {
    value: Mutex<f64>,
}

impl ProfitDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one read cycle's outcome and get the value to display.
    ///
    /// `None` or a non-finite sample never overwrites the retained value.
    pub fn observe(&self, sample: Option<f64>) -> f64 {
        let mut value = self.value.lock();
        if let Some(sample) = sample {
            if sample.is_finite() {
                *value = sample;
            }
        }
        *value
    }

    pub fn current(&self) -> f64 {
        *self.value.lock()
    }
}
