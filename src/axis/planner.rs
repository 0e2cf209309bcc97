use rayon::prelude::*;

use crate::{
    axis::ticks::nice_ticks,
    data::dataset::Dataset,
    foundation::{
        core::FrameIndex,
        error::{RaceError, RaceResult},
        math::{Extent, pad_bounds},
    },
    frames::build::Frame,
};

/// Default number of ticks requested from the tick generator.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Default frames over which ticks fade in or out.
pub const DEFAULT_TICK_TRANSITION_FRAMES: usize = 40;

/// Default outward padding applied to derived domains.
pub const DEFAULT_PADDING: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// How the value axis's `[min, max]` is chosen.
pub enum DomainPolicy {
    /// Fixed bounds, identical for every frame.
    Custom {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Bounds of each frame's own interpolated values, padded.
    Dynamic,
    /// Bounds of every raw value in the dataset, padded, shared by all frames.
    #[default]
    Static,
}

impl DomainPolicy {
    /// Resolve a policy from its configuration name.
    ///
    /// `"dynamic1"` is accepted as an alias of `"dynamic"`. `"custom"` needs
    /// both bounds.
    pub fn parse(name: &str, custom_min: Option<f64>, custom_max: Option<f64>) -> RaceResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "dynamic" | "dynamic1" => Ok(Self::Dynamic),
            "custom" => match (custom_min, custom_max) {
                (Some(min), Some(max)) => Ok(Self::Custom { min, max }),
                _ => Err(RaceError::validation(
                    "custom domain policy needs both custom_scale_min and custom_scale_max",
                )),
            },
            _ => Err(RaceError::UnknownDomainPolicy(name.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How tick sets evolve across frames.
pub enum TickMode {
    /// One tick set from frame 0's domain, fully opaque on every frame.
    #[default]
    Fixed,
    /// Per-frame tick sets; ticks fade in when they appear and out when they go.
    Diffed,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Validated value-axis settings.
pub struct AxisConfig {
    /// Domain policy.
    pub policy: DomainPolicy,
    /// Target number of ticks.
    pub tick_count: usize,
    /// Fade window for entering and leaving ticks, in frames.
    pub tick_transition_frames: usize,
    /// Outward padding factor for derived domains.
    pub padding: f64,
    /// Tick evolution mode.
    pub tick_mode: TickMode,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            policy: DomainPolicy::default(),
            tick_count: DEFAULT_TICK_COUNT,
            tick_transition_frames: DEFAULT_TICK_TRANSITION_FRAMES,
            padding: DEFAULT_PADDING,
            tick_mode: TickMode::default(),
        }
    }
}

impl AxisConfig {
    /// Reject settings that cannot produce a usable axis.
    pub fn validate(&self) -> RaceResult<()> {
        if let DomainPolicy::Custom { min, max } = self.policy {
            if !(min.is_finite() && max.is_finite()) {
                return Err(RaceError::validation("custom scale bounds must be finite"));
            }
            if min >= max {
                return Err(RaceError::DegenerateDomain {
                    min,
                    max,
                    frame: None,
                });
            }
        }
        if self.tick_count == 0 {
            return Err(RaceError::validation("tick count must be > 0"));
        }
        if self.tick_transition_frames == 0 {
            return Err(RaceError::validation("tick_transition_frames must be > 0"));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(RaceError::validation("padding must be finite and >= 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One axis label/gridline.
pub struct Tick {
    /// Axis value.
    pub value: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Set while the tick is fading out.
    #[serde(default)]
    pub removing: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Value-axis bounds and ticks for one frame.
pub struct YAxis {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Ticks ordered by value; every value lies in `[min, max]`.
    pub ticks: Vec<Tick>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis configuration attached to a frame.
pub struct AxisPlan {
    /// The value axis.
    pub y_axis: YAxis,
}

/// Attach an axis plan to every frame.
///
/// All domains and ticks are computed before any frame is touched, so on
/// error `frames` is left unchanged.
#[tracing::instrument(skip_all, fields(frames = frames.len(), policy = ?config.policy))]
pub fn plan_axis(
    config: &AxisConfig,
    dataset: &Dataset,
    value_columns: &[String],
    frames: &mut [Frame],
) -> RaceResult<()> {
    config.validate()?;
    check_frames(frames, dataset)?;

    let domains: Vec<(f64, f64)> = match config.policy {
        DomainPolicy::Custom { min, max } => vec![(min, max); frames.len()],
        DomainPolicy::Dynamic => frames
            .par_iter()
            .map(|f| {
                let extent: Extent = f.rows.iter().map(|r| r.frame_value).collect();
                finish_domain(extent, config.padding, Some(f.index))
            })
            .collect::<RaceResult<Vec<_>>>()?,
        DomainPolicy::Static => {
            let extent: Extent = dataset
                .ids()
                .flat_map(|id| value_columns.iter().map(move |c| dataset.value(id, c)))
                .collect();
            vec![finish_domain(extent, config.padding, None)?; frames.len()]
        }
    };

    let ticks = match config.tick_mode {
        TickMode::Fixed => fixed_ticks(&domains, config.tick_count),
        TickMode::Diffed => {
            diffed_ticks(&domains, config.tick_count, config.tick_transition_frames)
        }
    };

    for ((frame, (min, max)), ticks) in frames.iter_mut().zip(domains).zip(ticks) {
        frame.axis = Some(AxisPlan {
            y_axis: YAxis { min, max, ticks },
        });
    }

    tracing::debug!("axis planned");
    Ok(())
}

fn check_frames(frames: &[Frame], dataset: &Dataset) -> RaceResult<()> {
    if frames.is_empty() {
        return Err(RaceError::sequencing(
            "axis planning needs built frames; build frames first",
        ));
    }
    let total = frames.len();
    for (i, f) in frames.iter().enumerate() {
        if f.index != FrameIndex(i) || f.total_frames != total {
            return Err(RaceError::sequencing(format!(
                "frame at position {i} does not belong to a {total}-frame build in order"
            )));
        }
        if f.rows.len() != dataset.len() {
            return Err(RaceError::sequencing(format!(
                "frame {i} has {} rows but the dataset has {} entities",
                f.rows.len(),
                dataset.len()
            )));
        }
    }
    Ok(())
}

fn finish_domain(
    extent: Extent,
    padding: f64,
    frame: Option<FrameIndex>,
) -> RaceResult<(f64, f64)> {
    let (lo, hi) = extent
        .bounds()
        .ok_or(RaceError::NoNumericValues { frame })?;
    let (min, max) = pad_bounds(lo, hi, padding);
    if min < max {
        return Ok((min, max));
    }
    // Padding pulls negative bounds toward zero and can invert a narrow
    // extent; equal samples have no extent at all.
    let resolved = if lo < hi {
        (lo, hi)
    } else {
        let spread = lo.abs() * padding;
        if spread > 0.0 {
            (lo - spread, lo + spread)
        } else {
            (lo, lo + 1.0)
        }
    };
    tracing::debug!(
        ?frame,
        lo,
        hi,
        min = resolved.0,
        max = resolved.1,
        "collapsed axis domain widened"
    );
    if !(resolved.0 < resolved.1) {
        return Err(RaceError::DegenerateDomain {
            min: resolved.0,
            max: resolved.1,
            frame,
        });
    }
    Ok(resolved)
}

fn fixed_ticks(domains: &[(f64, f64)], count: usize) -> Vec<Vec<Tick>> {
    let Some(&(min0, max0)) = domains.first() else {
        return Vec::new();
    };
    let base = nice_ticks(min0, max0, count);
    domains
        .iter()
        .map(|&(min, max)| {
            base.iter()
                .filter(|v| (min..=max).contains(*v))
                .map(|&value| Tick {
                    value,
                    opacity: 1.0,
                    removing: false,
                })
                .collect()
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Steady,
    Entering,
    Leaving,
}

/// A tick carried between frames. `level` counts fade steps in
/// `0..=window`; opacity is `level / window`.
#[derive(Clone, Copy, Debug)]
struct LiveTick {
    value: f64,
    phase: Phase,
    level: usize,
}

fn diffed_ticks(domains: &[(f64, f64)], count: usize, window: usize) -> Vec<Vec<Tick>> {
    let mut live: Vec<LiveTick> = Vec::new();
    let mut out = Vec::with_capacity(domains.len());

    for (i, &(min, max)) in domains.iter().enumerate() {
        let current = nice_ticks(min, max, count);

        if i == 0 {
            live = current
                .iter()
                .map(|&value| LiveTick {
                    value,
                    phase: Phase::Steady,
                    level: window,
                })
                .collect();
        } else {
            // Advance fades by one step, then apply this frame's set changes.
            // A phase flip keeps the level, so the fade reverses in place.
            for t in &mut live {
                match t.phase {
                    Phase::Steady => {}
                    Phase::Entering => {
                        t.level = (t.level + 1).min(window);
                        if t.level == window {
                            t.phase = Phase::Steady;
                        }
                    }
                    Phase::Leaving => t.level = t.level.saturating_sub(1),
                }
                let wanted = current.contains(&t.value);
                if wanted && t.phase == Phase::Leaving {
                    t.phase = if t.level == window {
                        Phase::Steady
                    } else {
                        Phase::Entering
                    };
                } else if !wanted && t.phase != Phase::Leaving {
                    t.phase = Phase::Leaving;
                }
            }
            for &value in &current {
                if !live.iter().any(|t| t.value == value) {
                    live.push(LiveTick {
                        value,
                        phase: Phase::Entering,
                        level: 0,
                    });
                }
            }
        }

        live.retain(|t| {
            t.phase != Phase::Leaving || (t.level > 0 && (min..=max).contains(&t.value))
        });
        let mut ticks: Vec<Tick> = live
            .iter()
            .map(|t| Tick {
                value: t.value,
                opacity: t.level as f64 / window as f64,
                removing: t.phase == Phase::Leaving,
            })
            .collect();
        ticks.sort_by(|a, b| a.value.total_cmp(&b.value));
        out.push(ticks);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/axis/planner.rs"]
mod tests;
