//! Panel key computation and per-panel data partitioning

use super::types::{Facet, FacetLayout, PanelKey};
use crate::data::{DatasetView, Row, Value};
use crate::{Error, Result};

fn row_key(layout: &FacetLayout, row: &Row<'_>) -> Result<Vec<Value>> {
    match layout {
        FacetLayout::Wrap { variable } => Ok(vec![row.require(variable)?.clone()]),
        FacetLayout::Grid { row: r, column } => {
            Ok(vec![row.require(r)?.clone(), row.require(column)?.clone()])
        }
        FacetLayout::Condition { expr, .. } => Ok(vec![expr(row)?]),
    }
}

/// Observed panel keys in the base dataset, sorted ascending
///
/// Only keys that occur in the data become panels; a grid facet does not
/// fill in unobserved row/column combinations.
pub fn panel_keys(facet: &Facet, data: &DatasetView) -> Result<Vec<PanelKey>> {
    let mut keys: Vec<Vec<Value>> = Vec::new();
    for row in data.rows() {
        let key = row_key(&facet.layout, &row)?;
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys.sort_by(|a, b| {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(keys.into_iter().map(PanelKey::new).collect())
}

/// The rows of `data` belonging to one panel
///
/// Returns `None` when the dataset does not carry the facet's columns; such
/// a layer repeats unchanged in every panel (annotation layers with their
/// own summary data rely on this).
pub fn panel_data(
    facet: &Facet,
    data: &DatasetView,
    key: &PanelKey,
) -> Result<Option<DatasetView>> {
    if facet
        .variables()
        .iter()
        .any(|name| !data.has_column(name))
    {
        return Ok(None);
    }

    let filtered = data.filter(|row| Ok(row_key(&facet.layout, row)? == key.values));
    match filtered {
        Ok(view) => Ok(Some(view)),
        // A condition expression reading a column this dataset lacks also
        // means the facet does not apply to it.
        Err(Error::UnknownColumn { .. })
            if matches!(facet.layout, FacetLayout::Condition { .. }) =>
        {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
