//! Histogram geom implementation
//!
//! Bins the x channel into equal-width intervals over the observed span.
//! `bins` (default 30) sets the bin count; an explicit `binwidth` takes
//! precedence and derives the count from the span instead.

use super::{DefaultParam, GeomChannels, GeomTrait, GeomType};
use crate::plot::types::Channel;
use crate::resolve::{BinMark, LayerFrame, MarkSet};
use crate::{Error, Result};

const DEFAULT_BINS: f64 = 30.0;

/// Histogram geom - counted equal-width bins over a continuous x
#[derive(Debug, Clone, Copy)]
pub struct Histogram;

impl GeomTrait for Histogram {
    fn geom_type(&self) -> GeomType {
        GeomType::Histogram
    }

    fn channels(&self) -> GeomChannels {
        GeomChannels {
            required: &[Channel::X],
            optional: &[Channel::Fill, Channel::Color, Channel::Alpha],
        }
    }

    fn default_params(&self) -> &'static [DefaultParam] {
        &[
            DefaultParam {
                name: "bins",
                default: Some(DEFAULT_BINS),
            },
            DefaultParam {
                name: "binwidth",
                default: None,
            },
        ]
    }

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        frame.require(Channel::X)?;
        // Null x values carry no position and are dropped from the counts
        let xs: Vec<f64> = frame
            .numeric(Channel::X)?
            .into_iter()
            .flatten()
            .collect();
        if xs.is_empty() {
            return Ok(MarkSet::Bins(Vec::new()));
        }

        let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        if span == 0.0 {
            // Degenerate span: one unit-width bin centered on the value
            return Ok(MarkSet::Bins(vec![BinMark {
                start: min - 0.5,
                end: min + 0.5,
                count: xs.len(),
            }]));
        }

        let (n_bins, width) = match frame.number_param("binwidth")? {
            Some(w) => {
                if w <= 0.0 {
                    return Err(Error::InvalidParameter {
                        geom: self.to_string(),
                        name: "binwidth".to_string(),
                        reason: format!("must be positive, got {}", w),
                    });
                }
                ((span / w).ceil() as usize, w)
            }
            None => {
                let bins = frame.number_param("bins")?.unwrap_or(DEFAULT_BINS);
                if bins < 1.0 || bins.fract() != 0.0 {
                    return Err(Error::InvalidParameter {
                        geom: self.to_string(),
                        name: "bins".to_string(),
                        reason: format!("must be a positive integer, got {}", bins),
                    });
                }
                (bins as usize, span / bins)
            }
        };

        let mut counts = vec![0usize; n_bins];
        for x in &xs {
            // max lands in the last bin rather than one past it
            let idx = (((x - min) / width) as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        Ok(MarkSet::Bins(
            counts
                .into_iter()
                .enumerate()
                .map(|(i, count)| BinMark {
                    start: min + i as f64 * width,
                    end: min + (i + 1) as f64 * width,
                    count,
                })
                .collect(),
        ))
    }
}

impl std::fmt::Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "histogram")
    }
}
