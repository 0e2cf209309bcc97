use std::path::Path;

use anyhow::Context as _;

use crate::{
    axis::planner::{AxisConfig, DEFAULT_TICK_COUNT, DomainPolicy, TickMode},
    foundation::error::{RaceError, RaceResult},
    frames::tracker::TrackerConfig,
    scale::coords::ChartLayout,
};

/// Default number of animation frames per build.
pub const DEFAULT_FRAMES: usize = 100;

/// Default number of visible column slots.
pub const DEFAULT_COLUMN_COUNT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Validated settings for one race build.
///
/// Construct through [`ConfigFile::resolve`] or start from
/// [`RaceConfig::default`] and call [`RaceConfig::validate`].
pub struct RaceConfig {
    /// Number of frames in a build.
    pub frames: usize,
    /// Whether rows are ordered by value.
    pub sort: bool,
    /// Visible column slots handed to the drawer.
    pub column_count: usize,
    /// Rank swap motion.
    pub tracker: TrackerConfig,
    /// Value axis.
    pub axis: AxisConfig,
    /// Canvas geometry.
    pub layout: ChartLayout,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            sort: true,
            column_count: DEFAULT_COLUMN_COUNT,
            tracker: TrackerConfig::default(),
            axis: AxisConfig::default(),
            layout: ChartLayout::default(),
        }
    }
}

impl RaceConfig {
    /// Check every setting; called before any frame is built.
    pub fn validate(&self) -> RaceResult<()> {
        if self.frames < 2 {
            return Err(RaceError::TooFewFrames { got: self.frames });
        }
        if self.column_count == 0 {
            return Err(RaceError::validation("column_count must be > 0"));
        }
        self.tracker.validate()?;
        self.axis.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Chart configuration as read from JSON. Every field is optional.
pub struct ConfigFile {
    /// Frame count (default 100).
    pub frames: Option<usize>,
    /// Sort rows by value (default true).
    pub sort: Option<bool>,
    /// Visible column slots (default 10).
    pub column_count: Option<usize>,
    /// Maximum frames per rank swap (default 40).
    pub transition_frames: Option<usize>,
    /// Rank snap threshold (default 0.03).
    pub snap_epsilon: Option<f64>,
    /// Value-axis section.
    pub y_axis: YAxisFile,
    /// Canvas geometry.
    pub layout: Option<ChartLayout>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Value-axis section of [`ConfigFile`].
pub struct YAxisFile {
    /// `"static"` (default), `"dynamic"`/`"dynamic1"` or `"custom"`.
    pub scale_type: Option<String>,
    /// Lower bound for the custom policy.
    pub custom_scale_min: Option<f64>,
    /// Upper bound for the custom policy.
    pub custom_scale_max: Option<f64>,
    /// `"auto"` (default) or `"custom"`.
    pub labels_sampling_type: Option<String>,
    /// Tick count used when `labels_sampling_type` is `"custom"`.
    ///
    /// Accepts a number or a string with a leading integer (`"8"`, `"8 ticks"`).
    #[serde(deserialize_with = "de_sampling_interval")]
    pub labels_sampling_interval: Option<usize>,
    /// Tick evolution mode (default fixed).
    pub tick_mode: Option<TickMode>,
    /// Tick fade window in frames (default 40).
    pub tick_transition_frames: Option<usize>,
    /// Domain padding factor (default 0.1).
    pub padding: Option<f64>,
}

impl ConfigFile {
    /// Load a configuration JSON file.
    pub fn from_path(path: &Path) -> RaceResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse configuration from JSON text.
    pub fn from_json_str(s: &str) -> RaceResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Apply defaults, parse enumerated names and validate.
    pub fn resolve(&self) -> RaceResult<RaceConfig> {
        let defaults = RaceConfig::default();
        let y = &self.y_axis;

        let policy = match y.scale_type.as_deref() {
            None => DomainPolicy::default(),
            Some(name) => DomainPolicy::parse(name, y.custom_scale_min, y.custom_scale_max)?,
        };

        let tick_count = match y.labels_sampling_type.as_deref().map(str::trim) {
            None | Some("auto") => DEFAULT_TICK_COUNT,
            Some("custom") => y.labels_sampling_interval.ok_or_else(|| {
                RaceError::validation(
                    "labels_sampling_type 'custom' needs labels_sampling_interval",
                )
            })?,
            Some(other) => {
                return Err(RaceError::validation(format!(
                    "unknown labels_sampling_type '{other}'"
                )));
            }
        };

        let axis = AxisConfig {
            policy,
            tick_count,
            tick_transition_frames: y
                .tick_transition_frames
                .unwrap_or(defaults.axis.tick_transition_frames),
            padding: y.padding.unwrap_or(defaults.axis.padding),
            tick_mode: y.tick_mode.unwrap_or_default(),
        };

        let tracker = TrackerConfig {
            transition_frames: self
                .transition_frames
                .unwrap_or(defaults.tracker.transition_frames),
            snap_epsilon: self.snap_epsilon.unwrap_or(defaults.tracker.snap_epsilon),
        };

        let config = RaceConfig {
            frames: self.frames.unwrap_or(defaults.frames),
            sort: self.sort.unwrap_or(defaults.sort),
            column_count: self.column_count.unwrap_or(defaults.column_count),
            tracker,
            axis,
            layout: self.layout.unwrap_or(defaults.layout),
        };
        config.validate()?;
        Ok(config)
    }
}

fn de_sampling_interval<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(usize),
        Float(f64),
        Text(String),
    }

    let parsed = match Option::<Repr>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Repr::Int(n)) => Some(n),
        Some(Repr::Float(f)) if f.is_finite() && f >= 0.0 => Some(f.trunc() as usize),
        Some(Repr::Float(_)) => None,
        Some(Repr::Text(s)) => leading_int(&s),
    };
    parsed.map(Some).ok_or_else(|| {
        serde::de::Error::custom("labels_sampling_interval must be a non-negative integer")
    })
}

/// Leading decimal integer of `s`, ignoring surrounding whitespace and trailing text.
fn leading_int(s: &str) -> Option<usize> {
    let t = s.trim_start();
    let t = t.strip_prefix('+').unwrap_or(t);
    let end = t.find(|c: char| !c.is_ascii_digit()).unwrap_or(t.len());
    t[..end].parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
