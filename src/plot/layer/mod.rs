//! Plot layers
//!
//! A layer pairs a geometry with its local overrides: an aesthetic mapping
//! merged over the plot's base mapping (layer wins per channel), an optional
//! dataset replacing the plot's base data, and geometry parameters.

use crate::data::DatasetView;
use crate::plot::types::{Mappings, ParamValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod geom;

pub use geom::{Geom, GeomType};

/// One visualization layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub geom: Geom,
    /// Channel bindings merged over the plot's base mapping
    #[serde(default)]
    pub mapping: Mappings,
    /// Replaces the plot's base dataset for this layer when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DatasetView>,
    /// Geometry parameters (e.g. `bins`, `width`, `seed`)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, ParamValue>,
}

impl Layer {
    pub fn new(geom: Geom) -> Self {
        Self {
            geom,
            mapping: Mappings::new(),
            data: None,
            params: HashMap::new(),
        }
    }

    pub fn with_mapping(mut self, mapping: Mappings) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_data(mut self, data: DatasetView) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}
