//! Plot resolution
//!
//! Turns a [`Plot`] specification into a [`RenderDescription`]: one panel per
//! facet key (or a single panel), one [`MarkSet`] per layer per panel, plus
//! the position-scale domains a writer needs to draw axes. Resolution is the
//! only place specifications are validated; every failure is a typed
//! [`crate::Error`] and leaves the plot untouched.

pub mod frame;
pub mod mark;
pub mod rng;

pub use frame::LayerFrame;
pub use mark::{BarMark, BinMark, BoxMark, MarkSet, PathMark, PathPoint, PointMark, TextMark};

use crate::data::{DatasetView, Value};
use crate::plot::facet::{panel_data, panel_keys, FacetScales, PanelKey};
use crate::plot::layer::Layer;
use crate::plot::types::{Binding, Mappings, ParamValue};
use crate::plot::{GeomType, Plot, Theme};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// A position-scale domain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Distinct values in ascending order
    Discrete(Vec<Value>),
    /// Numeric extent
    Continuous { min: f64, max: f64 },
    /// No non-null observations
    Empty,
}

/// The x and y domains of one scale context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Domain,
    pub y: Domain,
}

/// Marks produced by one layer within one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerMarks {
    pub geom: GeomType,
    pub marks: MarkSet,
}

/// One facet panel (or the whole plot when unfaceted)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// Facet key, `None` for an unfaceted plot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<PanelKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Per-panel domains, present only under free facet scales
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    pub layers: Vec<LayerMarks>,
}

/// Fully resolved plot, ready for an external writer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderDescription {
    pub theme: Theme,
    /// Plot-wide domains across every panel and layer
    pub scales: Scales,
    pub panels: Vec<Panel>,
}

/// Resolve a plot specification into drawable marks
pub fn resolve(plot: &Plot) -> Result<RenderDescription> {
    if plot.layers.is_empty() {
        return Err(Error::EmptyPlot);
    }

    // Per-layer validation that does not depend on facet partitioning:
    // effective mapping, effective params, channel and column checks.
    let mut prepared = Vec::with_capacity(plot.layers.len());
    for layer in &plot.layers {
        let mapping = Mappings::merged(&plot.mapping, &layer.mapping);
        let params = effective_params(layer)?;
        let base = layer.data.as_ref().unwrap_or(&plot.data);

        for channel in layer.geom.channels().required {
            if !mapping.contains(*channel) {
                return Err(Error::MissingRequiredChannel {
                    geom: layer.geom.to_string(),
                    channel: *channel,
                });
            }
        }
        for (_, binding) in mapping.iter() {
            if let Binding::Column(name) = binding {
                base.require_column(name)?;
            }
        }
        prepared.push((layer, mapping, params, base));
    }

    let keys = match &plot.facet {
        Some(facet) => panel_keys(facet, &plot.data)?.into_iter().map(Some).collect(),
        None => vec![None],
    };
    let free_scales = plot
        .facet
        .as_ref()
        .is_some_and(|f| f.scales == FacetScales::Free);

    let mut global = ScalesBuilder::default();
    let mut panels = Vec::with_capacity(keys.len());
    for key in keys {
        let mut local = ScalesBuilder::default();
        let mut layers = Vec::with_capacity(prepared.len());

        for (layer, mapping, params, base) in &prepared {
            // A layer whose dataset lacks the facet columns repeats in
            // every panel; otherwise it sees only the panel's rows.
            let panel_view: DatasetView = match (&plot.facet, &key) {
                (Some(facet), Some(key)) => {
                    panel_data(facet, base, key)?.unwrap_or_else(|| (*base).clone())
                }
                _ => (*base).clone(),
            };
            let frame = LayerFrame {
                geom: layer.geom.geom_type().as_str(),
                data: &panel_view,
                mapping,
                params,
            };
            let marks = layer.geom.build(&frame)?;
            local.observe(&marks);
            layers.push(LayerMarks {
                geom: layer.geom.geom_type(),
                marks,
            });
        }

        global.merge(&local);
        panels.push(Panel {
            label: key.as_ref().map(PanelKey::label),
            key,
            scales: free_scales.then(|| local.finish()),
            layers,
        });
    }

    Ok(RenderDescription {
        theme: plot.theme.clone(),
        scales: global.finish(),
        panels,
    })
}

/// Layer params validated against the geom and overlaid on its defaults
fn effective_params(layer: &Layer) -> Result<HashMap<String, ParamValue>> {
    let valid = layer.geom.valid_params();
    for name in layer.params.keys() {
        if !valid.contains(&name.as_str()) {
            return Err(Error::InvalidParameter {
                geom: layer.geom.to_string(),
                name: name.clone(),
                reason: format!("unknown parameter (expected one of: {})", valid.join(", ")),
            });
        }
    }

    let mut params = HashMap::new();
    for default in layer.geom.default_params() {
        if let Some(value) = default.default {
            params.insert(default.name.to_string(), ParamValue::Number(value));
        }
    }
    params.extend(layer.params.clone());
    Ok(params)
}

/// Accumulates observed positions for one scale context
#[derive(Default)]
struct ScalesBuilder {
    x: DomainBuilder,
    y: DomainBuilder,
}

impl ScalesBuilder {
    fn observe(&mut self, marks: &MarkSet) {
        match marks {
            MarkSet::Points(points) => {
                for p in points {
                    self.x.push(&p.x);
                    self.y.push(&p.y);
                }
            }
            MarkSet::Paths(paths) => {
                for path in paths {
                    for p in &path.points {
                        self.x.push(&p.x);
                        self.y.push(&p.y);
                    }
                }
            }
            MarkSet::Bars(bars) => {
                // Bars sit on a discrete x axis and rise from zero
                self.x.force_discrete();
                if !bars.is_empty() {
                    self.y.push_f64(0.0);
                }
                for b in bars {
                    self.x.push(&b.x);
                    self.y.push_f64(b.height);
                }
            }
            MarkSet::Bins(bins) => {
                if !bins.is_empty() {
                    self.y.push_f64(0.0);
                }
                for b in bins {
                    self.x.push_f64(b.start);
                    self.x.push_f64(b.end);
                    self.y.push_f64(b.count as f64);
                }
            }
            MarkSet::Boxes(boxes) => {
                self.x.force_discrete();
                for b in boxes {
                    self.x.push(&b.x);
                    self.y.push_f64(b.lower_whisker);
                    self.y.push_f64(b.upper_whisker);
                    for o in &b.outliers {
                        self.y.push_f64(*o);
                    }
                }
            }
            MarkSet::Texts(texts) => {
                for t in texts {
                    self.x.push(&t.x);
                    self.y.push(&t.y);
                }
            }
        }
    }

    fn merge(&mut self, other: &ScalesBuilder) {
        self.x.merge(&other.x);
        self.y.merge(&other.y);
    }

    fn finish(&self) -> Scales {
        Scales {
            x: self.x.finish(),
            y: self.y.finish(),
        }
    }
}

/// Accumulates observed values for one axis
#[derive(Default, Clone)]
struct DomainBuilder {
    values: Vec<Value>,
    force_discrete: bool,
}

impl DomainBuilder {
    fn push(&mut self, value: &Value) {
        if !value.is_null() {
            self.values.push(value.clone());
        }
    }

    fn push_f64(&mut self, value: f64) {
        self.values.push(Value::Float(value));
    }

    fn force_discrete(&mut self) {
        self.force_discrete = true;
    }

    fn merge(&mut self, other: &DomainBuilder) {
        self.values.extend(other.values.iter().cloned());
        self.force_discrete |= other.force_discrete;
    }

    fn finish(&self) -> Domain {
        if self.values.is_empty() {
            return Domain::Empty;
        }
        if !self.force_discrete && self.values.iter().all(|v| v.as_f64().is_some()) {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for v in &self.values {
                let n = v.as_f64().unwrap_or(0.0);
                min = min.min(n);
                max = max.max(n);
            }
            return Domain::Continuous { min, max };
        }
        let mut distinct: Vec<Value> = Vec::new();
        for v in &self.values {
            if !distinct.contains(v) {
                distinct.push(v.clone());
            }
        }
        distinct.sort_by(Value::total_cmp);
        Domain::Discrete(distinct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;
    use crate::plot::facet::Facet;
    use crate::plot::layer::geom::Geom;
    use crate::plot::types::Channel;

    fn gapminder() -> DatasetView {
        DatasetView::new(vec![
            Column::categorical(
                "continent",
                ["Asia", "Asia", "Europe", "Europe", "Africa", "Africa"],
            ),
            Column::continuous("year", [2002.0, 2007.0, 2002.0, 2007.0, 2002.0, 2007.0]),
            Column::continuous("life_exp", [67.5, 68.9, 76.7, 77.6, 53.1, 54.8]),
        ])
        .unwrap()
    }

    fn xy() -> Mappings {
        Mappings::new()
            .with_column(Channel::X, "year")
            .with_column(Channel::Y, "life_exp")
    }

    #[test]
    fn test_empty_plot_rejected() {
        let err = Plot::new(gapminder()).resolve().unwrap_err();
        assert!(matches!(err, Error::EmptyPlot));
    }

    #[test]
    fn test_single_panel_multi_layer() {
        let description = Plot::new(gapminder())
            .mapping(xy().with_column(Channel::Group, "continent"))
            .layer(crate::plot::Layer::new(Geom::line()))
            .layer(crate::plot::Layer::new(Geom::point()))
            .resolve()
            .unwrap();
        assert_eq!(description.panels.len(), 1);
        let panel = &description.panels[0];
        assert!(panel.key.is_none());
        assert_eq!(panel.layers.len(), 2);
        assert_eq!(panel.layers[0].geom, GeomType::Line);
        assert_eq!(panel.layers[0].marks.len(), 3);
        assert_eq!(panel.layers[1].marks.len(), 6);
    }

    #[test]
    fn test_layer_mapping_wins_over_base() {
        let description = Plot::new(gapminder())
            .mapping(xy().with_constant(Channel::Color, "grey"))
            .layer(
                crate::plot::Layer::new(Geom::point()).with_mapping(
                    Mappings::new().with_column(Channel::Color, "continent"),
                ),
            )
            .resolve()
            .unwrap();
        let MarkSet::Points(points) = &description.panels[0].layers[0].marks else {
            panic!("expected points");
        };
        // Layer override: color varies per row instead of the base constant
        assert_eq!(points[0].color, Some(Value::from("Asia")));
        assert_eq!(points[2].color, Some(Value::from("Europe")));
    }

    #[test]
    fn test_facet_panels_partition_rows() {
        let description = Plot::new(gapminder())
            .mapping(xy())
            .layer(crate::plot::Layer::new(Geom::point()))
            .facet(Facet::wrap("continent"))
            .resolve()
            .unwrap();
        let labels: Vec<&str> = description
            .panels
            .iter()
            .map(|p| p.label.as_deref().unwrap())
            .collect();
        assert_eq!(labels, vec!["Africa", "Asia", "Europe"]);
        let total: usize = description
            .panels
            .iter()
            .map(|p| p.layers[0].marks.len())
            .sum();
        assert_eq!(total, gapminder().n_rows());
    }

    #[test]
    fn test_annotation_layer_repeats_across_panels() {
        let annotations = DatasetView::new(vec![
            Column::continuous("year", [2002.0]),
            Column::continuous("life_exp", [80.0]),
            Column::categorical("note", ["target"]),
        ])
        .unwrap();
        let description = Plot::new(gapminder())
            .mapping(xy())
            .layer(crate::plot::Layer::new(Geom::point()))
            .layer(
                crate::plot::Layer::new(Geom::text())
                    .with_data(annotations)
                    .with_mapping(Mappings::new().with_column(Channel::Label, "note")),
            )
            .facet(Facet::wrap("continent"))
            .resolve()
            .unwrap();
        // The annotation has no continent column, so every panel shows it
        for panel in &description.panels {
            assert_eq!(panel.layers[1].marks.len(), 1);
        }
    }

    #[test]
    fn test_unknown_column_in_optional_channel() {
        let err = Plot::new(gapminder())
            .mapping(xy().with_column(Channel::Color, "continnet"))
            .layer(crate::plot::Layer::new(Geom::point()))
            .resolve()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { column } if column == "continnet"));
    }

    #[test]
    fn test_missing_required_channel_reported_before_build() {
        let err = Plot::new(gapminder())
            .mapping(Mappings::new().with_column(Channel::X, "year"))
            .layer(crate::plot::Layer::new(Geom::point()))
            .resolve()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredChannel { channel: Channel::Y, .. }
        ));
    }

    #[test]
    fn test_unknown_param_rejected() {
        let err = Plot::new(gapminder())
            .mapping(Mappings::new().with_column(Channel::X, "life_exp"))
            .layer(crate::plot::Layer::new(Geom::histogram()).with_param("bandwidth", 2.0))
            .resolve()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter { name, .. } if name == "bandwidth"
        ));
    }

    #[test]
    fn test_default_params_applied() {
        let description = Plot::new(gapminder())
            .mapping(Mappings::new().with_column(Channel::X, "life_exp"))
            .layer(crate::plot::Layer::new(Geom::histogram()))
            .resolve()
            .unwrap();
        // Histogram's default bin count
        assert_eq!(description.panels[0].layers[0].marks.len(), 30);
    }

    #[test]
    fn test_fixed_scales_are_global() {
        let description = Plot::new(gapminder())
            .mapping(xy())
            .layer(crate::plot::Layer::new(Geom::point()))
            .facet(Facet::wrap("continent"))
            .resolve()
            .unwrap();
        assert!(description.panels.iter().all(|p| p.scales.is_none()));
        assert_eq!(
            description.scales.y,
            Domain::Continuous { min: 53.1, max: 77.6 }
        );
    }

    #[test]
    fn test_free_scales_are_per_panel() {
        let description = Plot::new(gapminder())
            .mapping(xy())
            .layer(crate::plot::Layer::new(Geom::point()))
            .facet(Facet::wrap("continent").with_scales(crate::plot::FacetScales::Free))
            .resolve()
            .unwrap();
        let africa = &description.panels[0];
        let scales = africa.scales.as_ref().unwrap();
        assert_eq!(scales.y, Domain::Continuous { min: 53.1, max: 54.8 });
    }

    #[test]
    fn test_bar_domains_discrete_x_zero_based_y() {
        let description = Plot::new(gapminder())
            .mapping(Mappings::new().with_column(Channel::X, "continent"))
            .layer(crate::plot::Layer::new(Geom::bar()))
            .resolve()
            .unwrap();
        let Domain::Discrete(categories) = &description.scales.x else {
            panic!("expected discrete x");
        };
        assert_eq!(categories.len(), 3);
        assert_eq!(
            description.scales.y,
            Domain::Continuous { min: 0.0, max: 2.0 }
        );
    }

    #[test]
    fn test_render_description_serializes() {
        let description = Plot::new(gapminder())
            .mapping(xy())
            .layer(crate::plot::Layer::new(Geom::point()))
            .resolve()
            .unwrap();
        let json = serde_json::to_value(&description).unwrap();
        assert!(json["panels"].as_array().is_some());
        assert!(json["scales"]["x"].is_object() || json["scales"]["x"].is_string());
    }
}
