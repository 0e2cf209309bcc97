use crate::foundation::{
    core::FrameIndex,
    error::{RaceError, RaceResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One side of a frame's blend: a value column and its distance from the frame.
pub struct ColumnWeight {
    /// Position in the ordered value-column list.
    pub column: usize,
    /// Fractional distance in `[0, 1]`; the column contributes `1 - distance`.
    pub distance: f64,
}

impl ColumnWeight {
    /// Blend weight this column contributes.
    pub fn weight(self) -> f64 {
        1.0 - self.distance
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The two adjacent measurement columns a frame is blended from.
pub struct SourcePair {
    /// Column at or before the frame position.
    pub d1: ColumnWeight,
    /// Next column (the last column repeats at the end of the sequence).
    pub d2: ColumnWeight,
}

impl SourcePair {
    /// Blend `v1 * (1 - d1) + v2 * (1 - d2)` reading values through `read`.
    ///
    /// Columns with zero weight are not read, so an invalid value only poisons
    /// frames that actually draw from it.
    pub fn blend(&self, mut read: impl FnMut(usize) -> Option<f64>) -> Option<f64> {
        let mut total = 0.0;
        for src in [self.d1, self.d2] {
            let w = src.weight();
            if w == 0.0 {
                continue;
            }
            total += read(src.column)? * w;
        }
        Some(total)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Immutable description of where one frame sits between measured columns.
pub struct FrameDescriptor {
    /// Frame position in the build.
    pub index: FrameIndex,
    /// Columns and weights to blend.
    pub source: SourcePair,
    /// Frame count of the build this descriptor belongs to.
    pub total_frames: usize,
}

/// Partition `total_frames` frames uniformly across `column_count` columns.
///
/// Frame 0 resolves to the first column and the last frame to the last
/// column with full weight. Positions are computed as
/// `(column_count - 1) * i / (total_frames - 1)` so both endpoints are exact.
pub fn plan_descriptors(
    column_count: usize,
    total_frames: usize,
) -> RaceResult<Vec<FrameDescriptor>> {
    if column_count < 2 {
        return Err(RaceError::TooFewColumns { got: column_count });
    }
    if total_frames < 2 {
        return Err(RaceError::TooFewFrames { got: total_frames });
    }

    let last_col = column_count - 1;
    let spans = last_col as f64;
    let steps = (total_frames - 1) as f64;

    let out = (0..total_frames)
        .map(|i| {
            let pos = (spans * i as f64) / steps;
            let col = (pos.floor() as usize).min(last_col);
            let distance = pos - col as f64;
            FrameDescriptor {
                index: FrameIndex(i),
                source: SourcePair {
                    d1: ColumnWeight {
                        column: col,
                        distance,
                    },
                    d2: ColumnWeight {
                        column: (col + 1).min(last_col),
                        distance: 1.0 - distance,
                    },
                },
                total_frames,
            }
        })
        .collect();
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/frames/interpolate.rs"]
mod tests;
