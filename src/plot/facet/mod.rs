//! Faceting: small multiples over data partitions

mod resolve;
mod types;

pub use resolve::{panel_data, panel_keys};
pub use types::{Facet, FacetExpr, FacetLayout, FacetScales, PanelKey};
