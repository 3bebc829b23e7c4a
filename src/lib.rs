/*!
# plotgram - declarative plot specifications

A grammar-of-graphics plot-specification model: datasets, aesthetic
mappings, geometric layers, facets and themes compose into an immutable
plot value, and a resolver turns that value into a fully resolved render
description for an external drawing backend.

The crate performs no I/O and no rendering. An external loader builds the
initial [`DatasetView`]; an external writer consumes the
[`RenderDescription`] (it is `serde`-serializable) and only draws.

## Example

```
use plotgram::{Channel, Column, DatasetView, Geom, Layer, Mappings, Plot};

let data = DatasetView::new(vec![
    Column::categorical("continent", ["Africa", "Africa", "Asia", "Asia"]),
    Column::continuous("year", [2002.0, 2007.0, 2002.0, 2007.0]),
    Column::continuous("life_exp", [53.3, 54.8, 69.2, 70.7]),
])?;

let plot = Plot::new(data)
    .mapping(
        Mappings::new()
            .with_column(Channel::X, "year")
            .with_column(Channel::Y, "life_exp")
            .with_column(Channel::Group, "continent"),
    )
    .layer(Layer::new(Geom::line()))
    .layer(Layer::new(Geom::point()));

let description = plot.resolve()?;
assert_eq!(description.panels.len(), 1);
# Ok::<(), plotgram::Error>(())
```

## Architecture

- [`data`] - immutable dataset views: filter, derive, grouped transforms
- [`plot`] - the specification model: mappings, layers/geoms, facets, themes
- [`resolve`] - the resolver producing per-panel, per-layer mark lists
*/

pub mod data;
pub mod plot;
pub mod resolve;

pub use data::{Column, ColumnKind, DatasetView, Row, Value};
pub use plot::{
    Binding, Channel, Facet, FacetScales, Geom, GeomType, Layer, Mappings, ParamValue, Plot,
    Theme,
};
pub use resolve::{resolve, Domain, MarkSet, RenderDescription};

/// Main library error type
///
/// Every fatal condition is local to one plot's resolution; failed
/// resolution leaves all inputs untouched. Empty facet or group partitions
/// are not errors - they resolve to empty mark lists.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mapping, filter or derive expression referenced a column absent
    /// from the active dataset view
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// A layer's geometry requires a channel not present after the mapping
    /// merge
    #[error("geom '{geom}' requires channel '{channel}' but it is not mapped")]
    MissingRequiredChannel { geom: String, channel: Channel },

    /// A summarized-bar layer found multiple rows for one x value and has no
    /// aggregation rule
    #[error("multiple rows share x value '{x}' and no aggregation is specified")]
    AmbiguousAggregation { x: String },

    /// `derive` (or view construction) would duplicate a column name
    #[error("column '{column}' already exists")]
    NameCollision { column: String },

    /// Columns of one view disagree on row count
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    MismatchedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A channel that feeds a statistic was bound to non-numeric values
    #[error("channel '{channel}' requires numeric values, found '{value}'")]
    NonNumeric { channel: Channel, value: String },

    /// A geometry parameter is unknown or out of range
    #[error("invalid parameter '{name}' for geom '{geom}': {reason}")]
    InvalidParameter {
        geom: String,
        name: String,
        reason: String,
    },

    /// Dataset-level inconsistency outside the named cases above
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A plot without layers is not renderable
    #[error("plot has no layers")]
    EmptyPlot,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
