use crate::foundation::{
    core::{EntityId, FrameIndex},
    error::{RaceError, RaceResult},
};

/// Default cap on how many frames a rank swap may take.
pub const DEFAULT_TRANSITION_FRAMES: usize = 40;

/// Default distance below which a moving rank snaps onto its destination.
pub const DEFAULT_SNAP_EPSILON: f64 = 0.03;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Motion parameters for rank swaps.
pub struct TrackerConfig {
    /// Upper bound, in frames, for one swap to complete.
    pub transition_frames: usize,
    /// Snap threshold in rank units.
    pub snap_epsilon: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            transition_frames: DEFAULT_TRANSITION_FRAMES,
            snap_epsilon: DEFAULT_SNAP_EPSILON,
        }
    }
}

impl TrackerConfig {
    /// Reject windows and thresholds that would stall or never snap.
    pub fn validate(&self) -> RaceResult<()> {
        if self.transition_frames == 0 {
            return Err(RaceError::validation("transition_frames must be > 0"));
        }
        if !(self.snap_epsilon.is_finite() && self.snap_epsilon > 0.0) {
            return Err(RaceError::validation("snap_epsilon must be finite and > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Animation state of one entity, carried across every frame of a build.
pub(crate) struct RankState {
    /// Continuous on-screen rank.
    pub(crate) current_rank: f64,
    /// Last assigned target rank.
    pub(crate) destination_rank: usize,
    /// Rank units travelled per frame; zero when at rest.
    pub(crate) transition_speed: f64,
}

/// Side table of per-entity rank state for one build.
///
/// Frames must be fed strictly in index order; the table is the only place
/// momentum lives, so skipping or repeating a frame is a sequencing error.
#[derive(Clone, Debug)]
pub(crate) struct RankTracker {
    config: TrackerConfig,
    total_frames: usize,
    states: Vec<Option<RankState>>,
    next_frame: usize,
}

impl RankTracker {
    pub(crate) fn new(config: TrackerConfig, entity_count: usize, total_frames: usize) -> Self {
        Self {
            config,
            total_frames,
            states: vec![None; entity_count],
            next_frame: 0,
        }
    }

    /// Claim `frame` as the next frame to process.
    pub(crate) fn begin_frame(&mut self, frame: FrameIndex) -> RaceResult<()> {
        if frame.0 != self.next_frame {
            return Err(RaceError::sequencing(format!(
                "rank tracker expected frame {}, got frame {}",
                self.next_frame, frame.0
            )));
        }
        if frame.0 >= self.total_frames {
            return Err(RaceError::sequencing(format!(
                "frame {} is past the end of a {}-frame build",
                frame.0, self.total_frames
            )));
        }
        self.next_frame += 1;
        Ok(())
    }

    /// Move `id` one frame toward `new_rank` and return its updated state.
    pub(crate) fn advance(
        &mut self,
        frame: FrameIndex,
        id: EntityId,
        new_rank: usize,
    ) -> RaceResult<RankState> {
        let cfg = self.config;
        let total = self.total_frames;
        let slot = self.states.get_mut(id.0).ok_or_else(|| {
            RaceError::sequencing(format!("entity {} is not part of this build", id.0))
        })?;

        let Some(s) = slot.as_mut() else {
            let first = RankState {
                current_rank: new_rank as f64,
                destination_rank: new_rank,
                transition_speed: 0.0,
            };
            *slot = Some(first);
            return Ok(first);
        };

        if s.destination_rank != new_rank {
            // A swap on the final frame has no budget left; arrive immediately.
            let budget = frame.remaining(total).min(cfg.transition_frames).max(1);
            s.transition_speed = (new_rank as f64 - s.current_rank) / budget as f64;
            s.destination_rank = new_rank;
        }
        s.current_rank += s.transition_speed;
        if (s.destination_rank as f64 - s.current_rank).abs() < cfg.snap_epsilon {
            s.transition_speed = 0.0;
            s.current_rank = s.destination_rank as f64;
        }
        Ok(*s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/tracker.rs"]
mod tests;
