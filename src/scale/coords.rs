use crate::{
    axis::planner::AxisPlan,
    foundation::core::{Point, Rect},
    foundation::error::{RaceError, RaceResult},
    scale::linear::Scale,
};

/// Width reserved left of the plot for y-axis labels, in pixels.
pub const LABEL_GUTTER_PX: f64 = 50.0;

/// Fraction of the canvas height reserved under the plot for column labels.
pub const BOTTOM_BAND_FRACTION: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Canvas geometry the drawer lays a frame out in.
pub struct ChartLayout {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Outer top margin in pixels.
    pub margin_top: f64,
    /// Outer bottom margin in pixels.
    pub margin_bottom: f64,
    /// Outer left margin in pixels.
    pub margin_left: f64,
    /// Outer right margin in pixels.
    pub margin_right: f64,
    /// Extra top padding as a percentage of the canvas height.
    pub top_padding_pct: f64,
    /// Gap between the y-axis labels and the plot, in pixels.
    pub labels_padding: f64,
    /// Horizontal gap between adjacent columns, in pixels.
    pub column_gap: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            margin_top: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            margin_right: 0.0,
            top_padding_pct: 0.0,
            labels_padding: 0.0,
            column_gap: 0.0,
        }
    }
}

impl ChartLayout {
    /// Reject non-positive canvas sizes and negative margins.
    pub fn validate(&self) -> RaceResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(RaceError::validation("layout width must be > 0"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(RaceError::validation("layout height must be > 0"));
        }
        let margins = [
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
            self.top_padding_pct,
            self.labels_padding,
            self.column_gap,
        ];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(RaceError::validation(
                "layout margins, paddings and gaps must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Pixel mapping for one frame: column slots on `x`, values on `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMap {
    /// Slot index `0..column_count` to horizontal pixels.
    pub x: Scale,
    /// Axis value `[min, max]` to vertical pixels, bottom to top.
    pub y: Scale,
    column_count: usize,
    column_gap: f64,
}

impl CoordinateMap {
    /// Build the mapping for a planned axis inside `layout`.
    pub fn new(axis: &AxisPlan, layout: &ChartLayout, column_count: usize) -> RaceResult<Self> {
        layout.validate()?;
        if column_count == 0 {
            return Err(RaceError::validation("column_count must be > 0"));
        }
        let (min, max) = (axis.y_axis.min, axis.y_axis.max);
        if !(min < max) {
            return Err(RaceError::DegenerateDomain {
                min,
                max,
                frame: None,
            });
        }

        let top = layout.margin_top + (layout.top_padding_pct * layout.height) / 100.0;
        let bottom = layout.margin_bottom + layout.height * BOTTOM_BAND_FRACTION;
        let left = LABEL_GUTTER_PX + layout.labels_padding + layout.margin_left;
        let right = layout.width - layout.margin_right;

        let y = Scale::new()
            .domain(min, max)
            .range(layout.height - bottom, top);
        let x = Scale::new()
            .domain(0.0, column_count as f64)
            .range(left, right);

        Ok(Self {
            x,
            y,
            column_count,
            column_gap: layout.column_gap,
        })
    }

    /// Number of column slots across the plot.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Width of one column after subtracting inter-column gaps.
    pub fn slot_width(&self) -> f64 {
        let (x0, x1) = self.x.range_bounds();
        let n = self.column_count as f64;
        (((x1 - x0) - (n - 1.0) * self.column_gap) / n).max(0.0)
    }

    /// Pixel position of `value` at a (possibly fractional) slot.
    pub fn point(&self, slot: f64, value: f64) -> Point {
        Point::new(self.x.apply(slot), self.y.apply(value))
    }

    /// Bar rectangle for `value` at `slot`, grown from the baseline.
    ///
    /// The baseline is zero clamped into the axis domain so bars never start
    /// outside the plot.
    pub fn bar_rect(&self, slot: f64, value: f64) -> Rect {
        let (min, max) = self.y.domain_bounds();
        let baseline = self.y.apply(0.0_f64.clamp(min, max));
        let x0 = self.x.apply(slot);
        let top = self.y.apply(value);
        Rect::new(x0, baseline, x0 + self.slot_width(), top).abs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scale/coords.rs"]
mod tests;
