//! Jitter geom implementation
//!
//! Point variant that perturbs x positions by a bounded random offset to
//! reduce overplotting on categorical axes. With an explicit `seed` the
//! offsets are reproducible bit-for-bit; without one each render differs.

use super::point::build_points;
use super::{DefaultParam, GeomChannels, GeomTrait, GeomType};
use crate::plot::types::Channel;
use crate::resolve::rng::SplitMix64;
use crate::resolve::{LayerFrame, MarkSet};
use crate::{Error, Result};

const DEFAULT_WIDTH: f64 = 0.4;

/// Jitter geom - points with bounded random x perturbation
#[derive(Debug, Clone, Copy)]
pub struct Jitter;

impl GeomTrait for Jitter {
    fn geom_type(&self) -> GeomType {
        GeomType::Jitter
    }

    fn channels(&self) -> GeomChannels {
        GeomChannels {
            required: &[Channel::X, Channel::Y],
            optional: &[
                Channel::Color,
                Channel::Fill,
                Channel::Shape,
                Channel::Size,
                Channel::Alpha,
            ],
        }
    }

    fn default_params(&self) -> &'static [DefaultParam] {
        &[
            DefaultParam {
                name: "width",
                default: Some(DEFAULT_WIDTH),
            },
            DefaultParam {
                name: "seed",
                default: None,
            },
        ]
    }

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        let width = frame.number_param("width")?.unwrap_or(DEFAULT_WIDTH);
        if width < 0.0 {
            return Err(Error::InvalidParameter {
                geom: self.to_string(),
                name: "width".to_string(),
                reason: format!("must be non-negative, got {}", width),
            });
        }

        let mut rng = match frame.number_param("seed")? {
            Some(seed) => {
                if seed < 0.0 || seed.fract() != 0.0 {
                    return Err(Error::InvalidParameter {
                        geom: self.to_string(),
                        name: "seed".to_string(),
                        reason: format!("must be a non-negative integer, got {}", seed),
                    });
                }
                SplitMix64::new(seed as u64)
            }
            None => SplitMix64::from_entropy(),
        };

        let offsets = (0..frame.n_rows())
            .map(|_| rng.next_symmetric(width))
            .collect();
        build_points(frame, Some(offsets))
    }
}

impl std::fmt::Display for Jitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "jitter")
    }
}
