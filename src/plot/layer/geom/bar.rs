//! Counted-bar geom implementation
//!
//! Rows are partitioned by the x channel (and by fill/color when bound) and
//! each partition becomes one bar whose height is the partition's row count.
//! The y channel is never consulted. Bars carry a single style partition:
//! fill when bound, else color; when both are bound, fill wins and color is
//! ignored.

use super::{GeomChannels, GeomTrait, GeomType};
use crate::data::Value;
use crate::plot::types::Channel;
use crate::resolve::{BarMark, LayerFrame, MarkSet};
use crate::Result;

/// Bar geom - height counts rows per x partition
#[derive(Debug, Clone, Copy)]
pub struct Bar;

impl GeomTrait for Bar {
    fn geom_type(&self) -> GeomType {
        GeomType::Bar
    }

    fn channels(&self) -> GeomChannels {
        GeomChannels {
            required: &[Channel::X],
            optional: &[Channel::Fill, Channel::Color, Channel::Alpha],
        }
    }

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        let xs = frame.require(Channel::X)?;
        // Fill partitions the count when bound; color is its fallback
        let fills = match frame.values(Channel::Fill)? {
            Some(f) => Some(f),
            None => frame.values(Channel::Color)?,
        };

        let mut partitions: Vec<(Value, Option<Value>, usize)> = Vec::new();
        for (i, x) in xs.iter().enumerate() {
            let fill = fills.as_ref().map(|f| f[i].clone());
            match partitions
                .iter_mut()
                .find(|(px, pf, _)| px == x && *pf == fill)
            {
                Some((_, _, count)) => *count += 1,
                None => partitions.push((x.clone(), fill, 1)),
            }
        }
        partitions.sort_by(|a, b| {
            a.0.total_cmp(&b.0).then_with(|| match (&a.1, &b.1) {
                (Some(fa), Some(fb)) => fa.total_cmp(fb),
                _ => std::cmp::Ordering::Equal,
            })
        });

        Ok(MarkSet::Bars(
            partitions
                .into_iter()
                .map(|(x, fill, count)| BarMark {
                    x,
                    fill,
                    height: count as f64,
                })
                .collect(),
        ))
    }
}

impl std::fmt::Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bar")
    }
}
