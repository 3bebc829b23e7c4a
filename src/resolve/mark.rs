//! Resolved marks
//!
//! The resolver turns each layer into one [`MarkSet`]: plain data, fully
//! validated, ready for an external writer to draw. Style channels carry the
//! bound [`Value`] per mark (a writer maps those through its own scales);
//! positions stay as values so categorical axes survive resolution.

use crate::data::Value;
use serde::Serialize;

/// One point mark (point and jitter geometries)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMark {
    pub x: Value,
    pub y: Value,
    /// Jitter perturbation along x, zero for plain points
    #[serde(skip_serializing_if = "is_zero")]
    pub x_offset: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Value>,
}

impl PointMark {
    pub fn new(x: Value, y: Value) -> Self {
        Self {
            x,
            y,
            x_offset: 0.0,
            color: None,
            fill: None,
            shape: None,
            size: None,
            alpha: None,
        }
    }
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

/// A single vertex of a connected path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPoint {
    pub x: Value,
    pub y: Value,
}

/// One connected path (line geometry), one per group partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathMark {
    /// Group key, `None` when the group channel was unbound (single path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Value>,
    pub points: Vec<PathPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Value>,
}

/// One bar (counted or summarized bar geometries)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarMark {
    pub x: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Value>,
    pub height: f64,
}

/// One histogram bin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinMark {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl BinMark {
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// One box-and-whisker summary over an x partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxMark {
    pub x: Value,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    /// Furthest observation within `coef` x IQR below Q1
    pub lower_whisker: f64,
    /// Furthest observation within `coef` x IQR above Q3
    pub upper_whisker: f64,
    /// Observations beyond the whiskers, in input order
    pub outliers: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Value>,
}

/// One text annotation (text and label geometries)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMark {
    pub x: Value,
    pub y: Value,
    pub text: String,
    /// Label geometry draws a background/border behind the text
    pub background: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,
}

/// The marks one resolved layer produces
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkSet {
    Points(Vec<PointMark>),
    Paths(Vec<PathMark>),
    Bars(Vec<BarMark>),
    Bins(Vec<BinMark>),
    Boxes(Vec<BoxMark>),
    Texts(Vec<TextMark>),
}

impl MarkSet {
    /// Number of marks in the set
    pub fn len(&self) -> usize {
        match self {
            MarkSet::Points(m) => m.len(),
            MarkSet::Paths(m) => m.len(),
            MarkSet::Bars(m) => m.len(),
            MarkSet::Bins(m) => m.len(),
            MarkSet::Boxes(m) => m.len(),
            MarkSet::Texts(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
