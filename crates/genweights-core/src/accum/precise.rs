//! Compensated summation.
//!
//! Sums run over billions of events, so a plain `f64` running total loses the
//! low bits of every small weight. `PreciseSum` keeps a second `f64` with the
//! rounding error of each addition (Neumaier's variant of Kahan summation),
//! which gives roughly twice the working precision of the inputs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreciseSum {
    sum: f64,
    compensation: f64,
}

impl PreciseSum {
    pub const ZERO: Self = Self {
        sum: 0.0,
        compensation: 0.0,
    };

    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Fold another partial sum in; both halves are carried over.
    pub fn merge(&mut self, other: &PreciseSum) {
        self.add(other.sum);
        self.compensation += other.compensation;
    }

    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl From<f64> for PreciseSum {
    fn from(x: f64) -> Self {
        let mut s = Self::ZERO;
        s.add(x);
        s
    }
}
