//! Effective layer context
//!
//! A [`LayerFrame`] is what a geometry sees after the resolver has picked
//! the layer's effective dataset (layer override, else plot base, then the
//! facet filter) and merged its effective mapping. All channel access goes
//! through it, so missing channels and unknown columns fail with the typed
//! errors the caller expects.

use crate::data::{DatasetView, Value};
use crate::plot::types::{Binding, Channel, Mappings, ParamValue};
use crate::{Error, Result};
use std::collections::HashMap;

/// Resolved inputs for building one layer's marks
pub struct LayerFrame<'a> {
    /// Geometry name, for error messages
    pub geom: &'a str,
    pub data: &'a DatasetView,
    pub mapping: &'a Mappings,
    pub params: &'a HashMap<String, ParamValue>,
}

impl<'a> LayerFrame<'a> {
    pub fn n_rows(&self) -> usize {
        self.data.n_rows()
    }

    /// Per-row values for a channel, or `None` if the channel is unbound
    ///
    /// Constants broadcast to every row; column bindings are resolved
    /// against the effective dataset.
    pub fn values(&self, channel: Channel) -> Result<Option<Vec<Value>>> {
        match self.mapping.get(channel) {
            None => Ok(None),
            Some(Binding::Column(name)) => {
                let column = self.data.require_column(name)?;
                Ok(Some(column.values().to_vec()))
            }
            Some(Binding::Constant(value)) => Ok(Some(vec![value.clone(); self.n_rows()])),
        }
    }

    /// Per-row values for a required channel
    pub fn require(&self, channel: Channel) -> Result<Vec<Value>> {
        self.values(channel)?
            .ok_or_else(|| Error::MissingRequiredChannel {
                geom: self.geom.to_string(),
                channel,
            })
    }

    /// Numeric per-row values for a required channel
    ///
    /// Nulls come through as `None` (statistic geometries skip them); any
    /// other non-numeric value is a typed error.
    pub fn numeric(&self, channel: Channel) -> Result<Vec<Option<f64>>> {
        self.require(channel)?
            .into_iter()
            .map(|value| {
                if value.is_null() {
                    Ok(None)
                } else {
                    value
                        .as_f64()
                        .map(Some)
                        .ok_or_else(|| Error::NonNumeric {
                            channel,
                            value: value.to_key_string(),
                        })
                }
            })
            .collect()
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Numeric parameter, failing if present but not a number
    pub fn number_param(&self, name: &str) -> Result<Option<f64>> {
        match self.params.get(name) {
            None => Ok(None),
            Some(ParamValue::Number(n)) => Ok(Some(*n)),
            Some(_) => Err(Error::InvalidParameter {
                geom: self.geom.to_string(),
                name: name.to_string(),
                reason: "expected a number".to_string(),
            }),
        }
    }
}
