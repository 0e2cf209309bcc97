use crate::foundation::core::FrameIndex;

/// Convenience result type used across the crate.
pub type RaceResult<T> = Result<T, RaceError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Configuration errors are raised before any frame is produced. Per-entity
/// data problems are never errors; they are coerced and reported as
/// [`crate::DataIssue`] diagnostics instead.
#[derive(thiserror::Error, Debug)]
pub enum RaceError {
    /// Fewer than two value columns were supplied.
    #[error("configuration error: at least 2 value columns are required, got {got}")]
    TooFewColumns {
        /// Number of value columns supplied.
        got: usize,
    },

    /// Fewer than two frames were requested.
    #[error("configuration error: total frames must be >= 2, got {got}")]
    TooFewFrames {
        /// Requested frame count.
        got: usize,
    },

    /// The configured y-axis scale type is not one of the known policies.
    #[error("configuration error: unknown domain policy '{0}'")]
    UnknownDomainPolicy(String),

    /// The scanned values contained no valid number to derive an axis from.
    #[error("configuration error: no valid numeric values for axis domain{}", at_frame(.frame))]
    NoNumericValues {
        /// Frame being planned, or `None` for dataset-wide scans.
        frame: Option<FrameIndex>,
    },

    /// The axis domain collapsed to an empty or inverted interval.
    #[error("configuration error: degenerate axis domain [{min}, {max}]{}", at_frame(.frame))]
    DegenerateDomain {
        /// Lower bound after padding.
        min: f64,
        /// Upper bound after padding.
        max: f64,
        /// Frame being planned, or `None` for frame-independent policies.
        frame: Option<FrameIndex>,
    },

    /// Other invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Operations called out of order or on inconsistent frame data.
    #[error("sequencing error: {0}")]
    Sequencing(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`RaceError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fatal to the build; reported before any frame is produced.
    Configuration,
    /// Caller logic error (wrong call order, foreign frame data).
    Sequencing,
    /// Input could not be decoded or output could not be encoded.
    Serialization,
    /// Anything else.
    Other,
}

impl RaceError {
    /// Build a [`RaceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RaceError::Sequencing`] value.
    pub fn sequencing(msg: impl Into<String>) -> Self {
        Self::Sequencing(msg.into())
    }

    /// Build a [`RaceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooFewColumns { .. }
            | Self::TooFewFrames { .. }
            | Self::UnknownDomainPolicy(_)
            | Self::NoNumericValues { .. }
            | Self::DegenerateDomain { .. }
            | Self::Validation(_) => ErrorKind::Configuration,
            Self::Sequencing(_) => ErrorKind::Sequencing,
            Self::Serde(_) => ErrorKind::Serialization,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

impl From<serde_json::Error> for RaceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

fn at_frame(frame: &Option<FrameIndex>) -> String {
    match frame {
        Some(f) => format!(" at frame {}", f.0),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
