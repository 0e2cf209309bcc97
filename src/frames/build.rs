use std::cmp::Ordering;

use crate::{
    axis::planner::AxisPlan,
    data::dataset::Dataset,
    foundation::{
        core::{EntityId, FrameIndex},
        error::RaceResult,
    },
    frames::{
        interpolate::{FrameDescriptor, SourcePair, plan_descriptors},
        tracker::{RankTracker, TrackerConfig},
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One entity's interpolated value and rank within one frame.
pub struct InterpolatedRow {
    /// Entity this row describes.
    pub entity: EntityId,
    /// Frame the row belongs to.
    pub frame_index: FrameIndex,
    /// Blended value, or `None` when a weighted source value was unusable.
    pub frame_value: Option<f64>,
    /// Target rank from this frame's ordering (0 = highest value).
    pub new_rank: usize,
    /// Continuous on-screen rank after this frame's motion step.
    pub rank: f64,
    /// Rank units per frame the entity is currently travelling at.
    pub transition_speed: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A fully materialized animation frame.
///
/// Frames are snapshots: once a build is complete they may be read in any
/// order without affecting each other.
pub struct Frame {
    /// Frame position in the build.
    pub index: FrameIndex,
    /// Columns and weights this frame was blended from.
    pub source: SourcePair,
    /// Frame count of the build.
    pub total_frames: usize,
    /// Ranked rows, ordered by target rank when sorting is enabled and by
    /// input order otherwise.
    pub rows: Vec<InterpolatedRow>,
    /// Axis plan, attached by [`crate::plan_axis`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisPlan>,
}

impl Frame {
    /// Row for `entity`, if it is part of this frame.
    pub fn row(&self, entity: EntityId) -> Option<&InterpolatedRow> {
        self.rows.iter().find(|r| r.entity == entity)
    }

    /// Rows whose continuous rank is inside the first `slots` positions,
    /// ordered by that rank.
    ///
    /// Entities sliding in or out across the last slot stay visible while any
    /// part of their travel is on screen.
    pub fn visible_rows(&self, slots: usize) -> Vec<&InterpolatedRow> {
        let limit = slots as f64;
        let mut out: Vec<&InterpolatedRow> = self.rows.iter().filter(|r| r.rank < limit).collect();
        out.sort_by(|a, b| a.rank.partial_cmp(&b.rank).unwrap_or(Ordering::Equal));
        out
    }
}

/// Build every frame with the default motion parameters.
///
/// See [`build_frames_with`].
pub fn build_frames(
    dataset: &Dataset,
    value_columns: &[String],
    total_frames: usize,
    sort: bool,
) -> RaceResult<Vec<Frame>> {
    build_frames_with(
        dataset,
        value_columns,
        total_frames,
        sort,
        TrackerConfig::default(),
    )
}

/// Interpolate, rank and motion-smooth the whole frame sequence.
///
/// This is a single sequential fold: rank state starts empty for every build
/// and is threaded through frames in index order, so every returned frame
/// carries the momentum of the frames before it. Frames have no axis plan
/// until [`crate::plan_axis`] runs.
#[tracing::instrument(skip(dataset, value_columns, tracker), fields(entities = dataset.len()))]
pub fn build_frames_with(
    dataset: &Dataset,
    value_columns: &[String],
    total_frames: usize,
    sort: bool,
    tracker: TrackerConfig,
) -> RaceResult<Vec<Frame>> {
    tracker.validate()?;
    let descriptors = plan_descriptors(value_columns.len(), total_frames)?;

    let issues = dataset.data_issues();
    if !issues.is_empty() {
        tracing::warn!(
            count = issues.len(),
            first_entity = issues[0].entity.0,
            first_column = %issues[0].column,
            "unusable values coerced; affected entities sort last"
        );
    }

    let mut ranks = RankTracker::new(tracker, dataset.len(), total_frames);
    let frames = descriptors.into_iter().try_fold(
        Vec::with_capacity(total_frames),
        |mut frames, desc| {
            frames.push(interpolate_frame(dataset, value_columns, desc, sort, &mut ranks)?);
            RaceResult::Ok(frames)
        },
    )?;

    tracing::debug!(frames = frames.len(), "frames built");
    Ok(frames)
}

fn interpolate_frame(
    dataset: &Dataset,
    value_columns: &[String],
    desc: FrameDescriptor,
    sort: bool,
    ranks: &mut RankTracker,
) -> RaceResult<Frame> {
    ranks.begin_frame(desc.index)?;

    let mut values: Vec<(EntityId, Option<f64>)> = dataset
        .ids()
        .map(|id| {
            let v = desc.source.blend(|col| {
                value_columns
                    .get(col)
                    .and_then(|name| dataset.value(id, name))
            });
            (id, v)
        })
        .collect();

    if sort {
        // Stable: ties keep input order.
        values.sort_by(|a, b| by_value_desc(a.1, b.1));
    }

    let rows = values
        .into_iter()
        .enumerate()
        .map(|(new_rank, (entity, frame_value))| {
            let state = ranks.advance(desc.index, entity, new_rank)?;
            Ok(InterpolatedRow {
                entity,
                frame_index: desc.index,
                frame_value,
                new_rank,
                rank: state.current_rank,
                transition_speed: state.transition_speed,
            })
        })
        .collect::<RaceResult<Vec<_>>>()?;

    Ok(Frame {
        index: desc.index,
        source: desc.source,
        total_frames: desc.total_frames,
        rows,
        axis: None,
    })
}

/// Descending by value; absent values sort after every present value.
fn by_value_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/build.rs"]
mod tests;
