pub use kurbo::{Point, Rect};

/// Zero-based position of a frame within one build.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub usize);

/// Stable identifier of an entity: its row position in the source dataset.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EntityId(pub usize);

impl FrameIndex {
    /// Frames left after this one in a build of `total` frames.
    pub fn remaining(self, total: usize) -> usize {
        total.saturating_sub(self.0).saturating_sub(1)
    }

    /// Linear progress through a window of `window` frames, clamped to `[0, 1]`.
    pub fn progress(self, window: usize) -> f64 {
        if window == 0 {
            return 1.0;
        }
        ((self.0 as f64) / (window as f64)).min(1.0)
    }
}
