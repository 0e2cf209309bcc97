use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::EntityId,
    error::{RaceError, RaceResult},
};

/// One caller-owned entity row: column name to raw JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Which record fields carry the label, the measured values and the avatar image.
pub struct ColumnRelation {
    /// Column holding the entity label.
    pub labels: String,
    /// Ordered measurement columns, one per time point.
    pub values: Vec<String>,
    /// Optional column holding an image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
}

impl ColumnRelation {
    /// Ensure there are enough value columns to interpolate between.
    pub fn validate(&self) -> RaceResult<()> {
        if self.values.len() < 2 {
            return Err(RaceError::TooFewColumns {
                got: self.values.len(),
            });
        }
        if let Some(c) = self.values.iter().find(|c| c.trim().is_empty()) {
            return Err(RaceError::validation(format!(
                "value column names must be non-empty, got '{c}'"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A tabular dataset plus the column relation describing it.
///
/// Records are never mutated by the engine; rank momentum lives in a side
/// table owned by each [`crate::build_frames`] run.
pub struct Dataset {
    /// Column roles.
    pub relation: ColumnRelation,
    /// Entity rows in input order. Row position is the entity's [`EntityId`].
    pub rows: Vec<Record>,
}

/// A missing or unparseable value, coerced rather than failing the build.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DataIssue {
    /// Entity whose value is unusable.
    pub entity: EntityId,
    /// Column the value was read from.
    pub column: String,
}

impl Dataset {
    /// Build a dataset from a relation and rows.
    pub fn new(relation: ColumnRelation, rows: Vec<Record>) -> Self {
        Self { relation, rows }
    }

    /// Load a dataset JSON file (`{"relation": {...}, "rows": [...]}`).
    pub fn from_path(path: &Path) -> RaceResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse a dataset from JSON text.
    pub fn from_json_str(s: &str) -> RaceResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no entities.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entity ids in input order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = EntityId> + '_ {
        (0..self.rows.len()).map(EntityId)
    }

    /// Ordered value columns.
    pub fn value_columns(&self) -> &[String] {
        &self.relation.values
    }

    /// Label text for an entity; non-string labels are rendered as JSON.
    pub fn label(&self, id: EntityId) -> Option<String> {
        let v = self.rows.get(id.0)?.get(&self.relation.labels)?;
        Some(match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Image path for an entity when the relation names an image column.
    pub fn image(&self, id: EntityId) -> Option<&str> {
        let col = self.relation.images.as_deref()?;
        self.rows.get(id.0)?.get(col)?.as_str()
    }

    /// Coerced numeric value of `column` for an entity.
    pub fn value(&self, id: EntityId, column: &str) -> Option<f64> {
        self.rows.get(id.0)?.get(column).and_then(coerce_value)
    }

    /// Every (entity, value column) pair whose value cannot be used.
    pub fn data_issues(&self) -> Vec<DataIssue> {
        let mut out = Vec::new();
        for id in self.ids() {
            for column in &self.relation.values {
                if self.value(id, column).is_none() {
                    out.push(DataIssue {
                        entity: id,
                        column: column.clone(),
                    });
                }
            }
        }
        out
    }
}

/// Coerce a raw JSON value to a finite number.
///
/// Numbers pass through; strings are trimmed and parsed. Anything else,
/// including non-finite results, yields `None`.
pub fn coerce_value(v: &serde_json::Value) -> Option<f64> {
    let n = match v {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
