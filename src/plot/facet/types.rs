//! Facet types for plot specifications
//!
//! A facet splits a plot into small-multiple panels, one per observed key.
//! Keys come from one column (wrap), a row/column pair (grid), or an
//! arbitrary expression evaluated per row (condition).

use crate::data::{Row, Value};
use crate::Result;
use serde::Serialize;
use std::sync::Arc;

/// Per-row expression yielding a panel key value
pub type FacetExpr = Arc<dyn Fn(&Row<'_>) -> Result<Value> + Send + Sync>;

/// Faceting specification
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub layout: FacetLayout,
    pub scales: FacetScales,
}

/// How panel keys are derived from the data
#[derive(Clone)]
pub enum FacetLayout {
    /// One panel per distinct value of a column
    Wrap { variable: String },
    /// One panel per observed (row value, column value) pair
    Grid { row: String, column: String },
    /// One panel per distinct result of an expression
    Condition { name: String, expr: FacetExpr },
}

/// Position-scale sharing across panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetScales {
    /// All panels share the plot-wide x and y domains
    #[default]
    Fixed,
    /// Each panel computes its own x and y domains
    Free,
}

impl Facet {
    pub fn wrap(variable: impl Into<String>) -> Self {
        Self {
            layout: FacetLayout::Wrap {
                variable: variable.into(),
            },
            scales: FacetScales::Fixed,
        }
    }

    pub fn grid(row: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            layout: FacetLayout::Grid {
                row: row.into(),
                column: column.into(),
            },
            scales: FacetScales::Fixed,
        }
    }

    pub fn condition<F>(name: impl Into<String>, expr: F) -> Self
    where
        F: Fn(&Row<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            layout: FacetLayout::Condition {
                name: name.into(),
                expr: Arc::new(expr),
            },
            scales: FacetScales::Fixed,
        }
    }

    pub fn with_scales(mut self, scales: FacetScales) -> Self {
        self.scales = scales;
        self
    }

    /// Column names the facet reads, empty for condition facets
    pub fn variables(&self) -> Vec<&str> {
        match &self.layout {
            FacetLayout::Wrap { variable } => vec![variable.as_str()],
            FacetLayout::Grid { row, column } => vec![row.as_str(), column.as_str()],
            FacetLayout::Condition { .. } => Vec::new(),
        }
    }
}

impl std::fmt::Debug for FacetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wrap { variable } => f.debug_struct("Wrap").field("variable", variable).finish(),
            Self::Grid { row, column } => f
                .debug_struct("Grid")
                .field("row", row)
                .field("column", column)
                .finish(),
            Self::Condition { name, .. } => {
                f.debug_struct("Condition").field("name", name).finish()
            }
        }
    }
}

/// Condition expressions compare by name; the closure itself has no identity
impl PartialEq for FacetLayout {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Wrap { variable: a }, Self::Wrap { variable: b }) => a == b,
            (
                Self::Grid {
                    row: ra,
                    column: ca,
                },
                Self::Grid {
                    row: rb,
                    column: cb,
                },
            ) => ra == rb && ca == cb,
            (Self::Condition { name: a, .. }, Self::Condition { name: b, .. }) => a == b,
            _ => false,
        }
    }
}

/// Key identifying one panel
///
/// One value for wrap and condition layouts, two (row then column) for grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelKey {
    pub values: Vec<Value>,
}

impl PanelKey {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Human-readable panel label
    pub fn label(&self) -> String {
        self.values
            .iter()
            .map(Value::to_key_string)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}
