/// Running min/max over optional samples. Starts empty; absent samples are skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Extent {
    bounds: Option<(f64, f64)>,
}

impl Extent {
    pub(crate) fn push(&mut self, v: f64) {
        self.bounds = Some(match self.bounds {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }

    pub(crate) fn push_opt(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.push(v);
        }
    }

    pub(crate) fn bounds(self) -> Option<(f64, f64)> {
        self.bounds
    }
}

impl FromIterator<Option<f64>> for Extent {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        let mut e = Self::default();
        for v in iter {
            e.push_opt(v);
        }
        e
    }
}

/// Widen `(min, max)` outward by `factor` of each bound's own magnitude.
///
/// A zero minimum is left at zero so axes anchored at the origin stay there.
pub(crate) fn pad_bounds(min: f64, max: f64, factor: f64) -> (f64, f64) {
    let min = if min != 0.0 { min - factor * min } else { min };
    let max = max + factor * max;
    (min, max)
}

/// Round half toward positive infinity.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
