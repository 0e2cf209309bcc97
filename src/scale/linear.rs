//! Linear value mapper from a domain interval to a range interval.

use crate::foundation::error::{RaceError, RaceResult};

/// Linear mapping `domain -> range`, optionally clamped.
///
/// Defaults to the identity on `[0, 1]`. A degenerate domain (`d0 == d1`) has no
/// meaningful mapping; use [`Scale::validate`] before handing a scale out.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scale {
    domain: [f64; 2],
    range: [f64; 2],
    clamp: bool,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            domain: [0.0, 1.0],
            range: [0.0, 1.0],
            clamp: false,
        }
    }
}

impl Scale {
    /// Identity scale on `[0, 1]`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input interval.
    pub fn domain(mut self, lo: f64, hi: f64) -> Self {
        self.domain = [lo, hi];
        self
    }

    /// Set the output interval.
    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        self.range = [lo, hi];
        self
    }

    /// Enable or disable clamping to the range endpoints.
    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Current input interval.
    pub fn domain_bounds(&self) -> (f64, f64) {
        (self.domain[0], self.domain[1])
    }

    /// Current output interval.
    pub fn range_bounds(&self) -> (f64, f64) {
        (self.range[0], self.range[1])
    }

    /// Reject domains that cannot be mapped.
    pub fn validate(&self) -> RaceResult<()> {
        let [d0, d1] = self.domain;
        if !d0.is_finite() || !d1.is_finite() {
            return Err(RaceError::validation("scale domain must be finite"));
        }
        if d0 == d1 {
            return Err(RaceError::validation("scale domain must not be empty"));
        }
        Ok(())
    }

    /// Map `value` from the domain into the range.
    pub fn apply(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;

        if self.clamp {
            if value <= d0 {
                return r0;
            }
            if value >= d1 {
                return r1;
            }
        }

        let t = (value - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/linear.rs"]
mod tests;
