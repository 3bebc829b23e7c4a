//! The top-level plot specification
//!
//! A [`Plot`] is an immutable value: base data, base mapping, layers, an
//! optional facet and a theme. Builder methods consume and return the plot,
//! so specifications read as one expression. Nothing is validated until
//! [`Plot::resolve`]; a failed resolution leaves the plot untouched and
//! reusable.

use crate::data::DatasetView;
use crate::plot::facet::Facet;
use crate::plot::layer::Layer;
use crate::plot::theme::Theme;
use crate::plot::types::Mappings;
use crate::resolve::RenderDescription;
use crate::Result;

/// A complete plot specification
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub data: DatasetView,
    /// Base mapping inherited by every layer
    pub mapping: Mappings,
    pub layers: Vec<Layer>,
    pub facet: Option<Facet>,
    pub theme: Theme,
}

impl Plot {
    pub fn new(data: DatasetView) -> Self {
        Self {
            data,
            mapping: Mappings::new(),
            layers: Vec::new(),
            facet: None,
            theme: Theme::default(),
        }
    }

    pub fn mapping(mut self, mapping: Mappings) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn facet(mut self, facet: Facet) -> Self {
        self.facet = Some(facet);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Resolve the specification into drawable marks
    pub fn resolve(&self) -> Result<RenderDescription> {
        crate::resolve::resolve(self)
    }
}
