//! Frame interpolation, rank tracking and axis planning for bar/column race charts.
//!
//! A race animates entities whose values are measured at a handful of time
//! points. This crate turns that sparse table into a dense, fixed-length
//! sequence of frames in which entities glide between ranks instead of
//! jumping, together with a value axis for each frame.
//!
//! # Pipeline overview
//!
//! 1. **Interpolate**: `value columns + frame count -> FrameDescriptor`s, each
//!    blending two adjacent columns.
//! 2. **Rank**: one sequential pass over the descriptors sorts entities per
//!    frame and moves each entity's continuous rank toward its target at a
//!    bounded speed ([`build_frames`]).
//! 3. **Plan axis**: pick `[min, max]` per frame from a [`DomainPolicy`] and
//!    attach ticks with fade transitions ([`plan_axis`]).
//! 4. **Map**: the drawer turns a planned frame into pixels with a
//!    [`CoordinateMap`].
//!
//! [`Race`] wraps all of it behind a build-once, read-anywhere facade.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: ties keep input order; the same input always builds
//!   the same frames.
//! - **No shared mutable state**: caller records are never touched. Rank
//!   momentum lives in a side table owned by a single build.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod axis;
mod config;
mod data;
mod foundation;
mod frames;
mod scale;
mod session;

pub use axis::planner::{
    AxisConfig, AxisPlan, DEFAULT_PADDING, DEFAULT_TICK_COUNT, DEFAULT_TICK_TRANSITION_FRAMES,
    DomainPolicy, Tick, TickMode, YAxis, plan_axis,
};
pub use axis::ticks::nice_ticks;
pub use config::settings::{
    ConfigFile, DEFAULT_COLUMN_COUNT, DEFAULT_FRAMES, RaceConfig, YAxisFile,
};
pub use data::dataset::{ColumnRelation, DataIssue, Dataset, Record, coerce_value};
pub use foundation::core::{EntityId, FrameIndex, Point, Rect};
pub use foundation::error::{ErrorKind, RaceError, RaceResult};
pub use frames::build::{Frame, InterpolatedRow, build_frames, build_frames_with};
pub use frames::interpolate::{ColumnWeight, FrameDescriptor, SourcePair, plan_descriptors};
pub use frames::tracker::{DEFAULT_SNAP_EPSILON, DEFAULT_TRANSITION_FRAMES, TrackerConfig};
pub use scale::coords::{BOTTOM_BAND_FRACTION, ChartLayout, CoordinateMap, LABEL_GUTTER_PX};
pub use scale::linear::Scale;
pub use session::race::Race;
