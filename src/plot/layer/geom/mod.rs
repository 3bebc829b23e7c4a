//! Geom trait and implementations
//!
//! Each geometry kind is its own struct implementing [`GeomTrait`]: it
//! declares its channel contract (required and optional channels), its
//! parameters with defaults, and the row-to-marks transform. [`Geom`] wraps
//! a trait object so layers stay cheap to clone and serialize.
//!
//! # Architecture
//!
//! - `GeomType` - enum for pattern matching and serialization
//! - `GeomTrait` - per-kind behavior with default implementations
//! - `Geom` - wrapper struct holding an `Arc<dyn GeomTrait>`

use crate::plot::types::Channel;
use crate::resolve::{LayerFrame, MarkSet};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod bar;
mod boxplot;
mod col;
mod histogram;
mod jitter;
mod line;
mod point;
mod text;

pub use bar::Bar;
pub use boxplot::Boxplot;
pub use col::Col;
pub use histogram::Histogram;
pub use jitter::Jitter;
pub use line::Line;
pub use point::Point;
pub use text::{Label, Text};

/// Enum of all geom types for pattern matching and serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeomType {
    Point,
    Jitter,
    Line,
    /// Counted bars: height = rows per x partition
    Bar,
    /// Summarized bars: height taken directly from y
    Col,
    Boxplot,
    Histogram,
    Text,
    Label,
}

impl GeomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeomType::Point => "point",
            GeomType::Jitter => "jitter",
            GeomType::Line => "line",
            GeomType::Bar => "bar",
            GeomType::Col => "col",
            GeomType::Boxplot => "boxplot",
            GeomType::Histogram => "histogram",
            GeomType::Text => "text",
            GeomType::Label => "label",
        }
    }
}

impl std::fmt::Display for GeomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Channel contract of a geometry
#[derive(Debug, Clone, Copy)]
pub struct GeomChannels {
    /// Resolution fails if any of these is unbound after the mapping merge
    pub required: &'static [Channel],
    pub optional: &'static [Channel],
}

/// A geometry parameter with its default
#[derive(Debug, Clone, Copy)]
pub struct DefaultParam {
    pub name: &'static str,
    /// `None` means "no default" (e.g. an optional seed)
    pub default: Option<f64>,
}

/// Core trait for geom behavior
pub trait GeomTrait: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Which geom type this is (for pattern matching)
    fn geom_type(&self) -> GeomType;

    /// Channel contract
    fn channels(&self) -> GeomChannels;

    /// Parameters this geom accepts, with defaults
    fn default_params(&self) -> &'static [DefaultParam] {
        &[]
    }

    /// Turn the resolved layer inputs into marks
    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet>;
}

/// Wrapper struct for geom trait objects
#[derive(Clone)]
pub struct Geom(Arc<dyn GeomTrait>);

impl Geom {
    pub fn point() -> Self {
        Self(Arc::new(Point))
    }

    pub fn jitter() -> Self {
        Self(Arc::new(Jitter))
    }

    pub fn line() -> Self {
        Self(Arc::new(Line))
    }

    pub fn bar() -> Self {
        Self(Arc::new(Bar))
    }

    pub fn col() -> Self {
        Self(Arc::new(Col))
    }

    pub fn boxplot() -> Self {
        Self(Arc::new(Boxplot))
    }

    pub fn histogram() -> Self {
        Self(Arc::new(Histogram))
    }

    pub fn text() -> Self {
        Self(Arc::new(Text))
    }

    pub fn label() -> Self {
        Self(Arc::new(Label))
    }

    /// Create a Geom from a GeomType
    pub fn from_type(t: GeomType) -> Self {
        match t {
            GeomType::Point => Self::point(),
            GeomType::Jitter => Self::jitter(),
            GeomType::Line => Self::line(),
            GeomType::Bar => Self::bar(),
            GeomType::Col => Self::col(),
            GeomType::Boxplot => Self::boxplot(),
            GeomType::Histogram => Self::histogram(),
            GeomType::Text => Self::text(),
            GeomType::Label => Self::label(),
        }
    }

    pub fn geom_type(&self) -> GeomType {
        self.0.geom_type()
    }

    pub fn channels(&self) -> GeomChannels {
        self.0.channels()
    }

    pub fn default_params(&self) -> &'static [DefaultParam] {
        self.0.default_params()
    }

    pub fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        self.0.build(frame)
    }

    /// Parameter names this geom accepts
    pub fn valid_params(&self) -> Vec<&'static str> {
        self.default_params().iter().map(|p| p.name).collect()
    }
}

impl std::fmt::Debug for Geom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Geom::{:?}", self.geom_type())
    }
}

impl std::fmt::Display for Geom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Geom {
    fn eq(&self, other: &Self) -> bool {
        self.geom_type() == other.geom_type()
    }
}

impl Eq for Geom {}

impl Serialize for Geom {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.geom_type().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Geom {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let geom_type = GeomType::deserialize(deserializer)?;
        Ok(Geom::from_type(geom_type))
    }
}
