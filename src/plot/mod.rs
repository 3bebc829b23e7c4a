//! The plot specification model
//!
//! Everything here is declarative: mappings, layers, facets and themes are
//! plain values composed with builder methods. The [`crate::resolve`] module
//! gives them meaning.

pub mod facet;
pub mod layer;
pub mod spec;
pub mod theme;
pub mod types;

pub use facet::{Facet, FacetLayout, FacetScales, PanelKey};
pub use layer::{Geom, GeomType, Layer};
pub use spec::Plot;
pub use theme::Theme;
pub use types::{Binding, Channel, Mappings, ParamValue};
