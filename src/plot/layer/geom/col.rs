//! Summarized-bar geom implementation
//!
//! One bar per distinct x value, height taken directly from the y channel.
//! If several rows share an x value the height is ambiguous and resolution
//! fails - the caller must aggregate first (e.g. with `grouped_transform`).
//! Bar style follows fill when bound, else color; fill wins when both are.

use super::{GeomChannels, GeomTrait, GeomType};
use crate::data::Value;
use crate::plot::types::Channel;
use crate::resolve::{BarMark, LayerFrame, MarkSet};
use crate::{Error, Result};

/// Col geom - bars from already-summarized y values
#[derive(Debug, Clone, Copy)]
pub struct Col;

impl GeomTrait for Col {
    fn geom_type(&self) -> GeomType {
        GeomType::Col
    }

    fn channels(&self) -> GeomChannels {
        GeomChannels {
            required: &[Channel::X, Channel::Y],
            optional: &[Channel::Fill, Channel::Color, Channel::Alpha],
        }
    }

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        let xs = frame.require(Channel::X)?;
        let ys = frame.numeric(Channel::Y)?;
        let fills = match frame.values(Channel::Fill)? {
            Some(f) => Some(f),
            None => frame.values(Channel::Color)?,
        };

        let mut bars: Vec<BarMark> = Vec::new();
        let mut seen: Vec<Value> = Vec::new();
        for (i, x) in xs.iter().enumerate() {
            if seen.contains(x) {
                return Err(Error::AmbiguousAggregation {
                    x: x.to_key_string(),
                });
            }
            seen.push(x.clone());
            let height = ys[i].ok_or_else(|| Error::NonNumeric {
                channel: Channel::Y,
                value: "null".to_string(),
            })?;
            bars.push(BarMark {
                x: x.clone(),
                fill: fills.as_ref().map(|f| f[i].clone()),
                height,
            });
        }
        bars.sort_by(|a, b| a.x.total_cmp(&b.x));
        Ok(MarkSet::Bars(bars))
    }
}

impl std::fmt::Display for Col {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "col")
    }
}
