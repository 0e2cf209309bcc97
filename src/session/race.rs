use crate::{
    axis::planner::plan_axis,
    config::settings::RaceConfig,
    data::dataset::Dataset,
    foundation::{
        core::FrameIndex,
        error::{RaceError, RaceResult},
    },
    frames::build::{Frame, InterpolatedRow, build_frames_with},
    scale::coords::{ChartLayout, CoordinateMap},
};

/// A built race: dataset, settings and the complete frame sequence.
///
/// Every mutation triggers a full rebuild with fresh rank state. A failed
/// rebuild leaves the previous frames in place.
#[derive(Clone, Debug)]
pub struct Race {
    dataset: Dataset,
    config: RaceConfig,
    frames: Vec<Frame>,
}

impl Race {
    /// Validate, build every frame and plan the axis.
    #[tracing::instrument(skip_all, fields(entities = dataset.len(), frames = config.frames))]
    pub fn build(dataset: Dataset, config: RaceConfig) -> RaceResult<Self> {
        let frames = build_all(&dataset, &config)?;
        Ok(Self {
            dataset,
            config,
            frames,
        })
    }

    /// Source dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Settings the frames were built with.
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames; a successful build always has at least two.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`.
    pub fn frame(&self, index: FrameIndex) -> RaceResult<&Frame> {
        self.frames.get(index.0).ok_or_else(|| {
            RaceError::sequencing(format!(
                "frame {} is out of bounds for a {}-frame race",
                index.0,
                self.frames.len()
            ))
        })
    }

    /// Frame at `index`, clamped into the sequence.
    pub fn seek(&self, index: i64) -> &Frame {
        let last = self.frames.len().saturating_sub(1);
        let i = usize::try_from(index.max(0)).unwrap_or(usize::MAX).min(last);
        &self.frames[i]
    }

    /// Replace the dataset and rebuild.
    pub fn rebuild(&mut self, dataset: Dataset) -> RaceResult<()> {
        self.frames = build_all(&dataset, &self.config)?;
        self.dataset = dataset;
        Ok(())
    }

    /// Replace the measured columns and rebuild.
    pub fn set_value_columns(&mut self, columns: Vec<String>) -> RaceResult<()> {
        let mut dataset = self.dataset.clone();
        dataset.relation.values = columns;
        self.rebuild(dataset)
    }

    /// Replace the settings and rebuild.
    pub fn set_config(&mut self, config: RaceConfig) -> RaceResult<()> {
        self.frames = build_all(&self.dataset, &config)?;
        self.config = config;
        Ok(())
    }

    /// Pixel mapping for `frame` inside `layout`.
    pub fn coordinates(&self, frame: &Frame, layout: &ChartLayout) -> RaceResult<CoordinateMap> {
        let axis = frame.axis.as_ref().ok_or_else(|| {
            RaceError::sequencing(format!("frame {} has no axis plan", frame.index.0))
        })?;
        CoordinateMap::new(axis, layout, self.config.column_count)
    }

    /// Rows on screen in `frame`, ordered by continuous rank.
    pub fn visible_rows<'a>(&self, frame: &'a Frame) -> Vec<&'a InterpolatedRow> {
        frame.visible_rows(self.config.column_count)
    }
}

fn build_all(dataset: &Dataset, config: &RaceConfig) -> RaceResult<Vec<Frame>> {
    config.validate()?;
    dataset.relation.validate()?;
    let columns = dataset.value_columns();
    let mut frames =
        build_frames_with(dataset, columns, config.frames, config.sort, config.tracker)?;
    plan_axis(&config.axis, dataset, columns, &mut frames)?;
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/session/race.rs"]
mod tests;
