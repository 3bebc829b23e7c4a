//! Input types for plot specifications
//!
//! Aesthetic channels, bindings (column references or constants), mapping
//! tables with the layer-wins merge rule, and geometry parameter values.

use crate::data::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A visual channel a value can be mapped onto
///
/// `Group` controls series partitioning for geometries that connect rows
/// (line); leaving it unbound on multi-series data is the classic source of
/// the zig-zag line defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    X,
    Y,
    Color,
    Fill,
    Shape,
    Size,
    Alpha,
    Label,
    Group,
}

/// All channels, in display order
pub const ALL_CHANNELS: &[Channel] = &[
    Channel::X,
    Channel::Y,
    Channel::Color,
    Channel::Fill,
    Channel::Shape,
    Channel::Size,
    Channel::Alpha,
    Channel::Label,
    Channel::Group,
];

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Color => "color",
            Channel::Fill => "fill",
            Channel::Shape => "shape",
            Channel::Size => "size",
            Channel::Alpha => "alpha",
            Channel::Label => "label",
            Channel::Group => "group",
        }
    }

    /// Whether this channel positions marks on an axis
    pub fn is_positional(&self) -> bool {
        matches!(self, Channel::X | Channel::Y)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a channel is bound to: a column that varies per row, or a constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Binding {
    /// Column reference, resolved against the layer's effective dataset
    Column(String),
    /// Fixed value applied to every row
    Constant(Value),
}

impl Binding {
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    /// Column name if this is a column binding
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Self::Column(name) => Some(name),
            Self::Constant(_) => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Column(name) => write!(f, "{}", name),
            Binding::Constant(v) => write!(f, "'{}'", v),
        }
    }
}

/// A channel → binding table
///
/// Used both at plot level (the baseline every layer inherits) and at layer
/// level (the override). [`Mappings::merged`] combines the two with the
/// layer winning per channel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mappings {
    bindings: BTreeMap<Channel, Binding>,
}

impl Mappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding, replacing any previous binding for the channel
    pub fn insert(&mut self, channel: Channel, binding: Binding) {
        self.bindings.insert(channel, binding);
    }

    /// Builder-style insert of a column binding
    pub fn with_column(mut self, channel: Channel, column: impl Into<String>) -> Self {
        self.insert(channel, Binding::column(column));
        self
    }

    /// Builder-style insert of a constant binding
    pub fn with_constant(mut self, channel: Channel, value: impl Into<Value>) -> Self {
        self.insert(channel, Binding::constant(value));
        self
    }

    pub fn get(&self, channel: Channel) -> Option<&Binding> {
        self.bindings.get(&channel)
    }

    pub fn contains(&self, channel: Channel) -> bool {
        self.bindings.contains_key(&channel)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Binding)> {
        self.bindings.iter().map(|(c, b)| (*c, b))
    }

    /// Merge `overlay` on top of `base`, overlay winning per channel
    ///
    /// Channels present in exactly one side carry through unchanged. Neither
    /// input is modified.
    pub fn merged(base: &Mappings, overlay: &Mappings) -> Mappings {
        let mut bindings = base.bindings.clone();
        for (channel, binding) in &overlay.bindings {
            bindings.insert(*channel, binding.clone());
        }
        Mappings { bindings }
    }
}

/// Value of a geometry-specific parameter (bin width, whisker coefficient,
/// jitter amplitude and seed, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    String(String),
    Number(f64),
    Bool(bool),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
