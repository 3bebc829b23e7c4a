//! Point geom implementation

use super::{GeomChannels, GeomTrait, GeomType};
use crate::plot::types::Channel;
use crate::resolve::{LayerFrame, MarkSet, PointMark};
use crate::Result;

/// Point geom - one mark per row at (x, y)
#[derive(Debug, Clone, Copy)]
pub struct Point;

impl GeomTrait for Point {
    fn geom_type(&self) -> GeomType {
        GeomType::Point
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

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        build_points(frame, None)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "point")
    }
}

/// Shared point-mark construction for point and jitter
pub(super) fn build_points(frame: &LayerFrame<'_>, offsets: Option<Vec<f64>>) -> Result<MarkSet> {
    let xs = frame.require(Channel::X)?;
    let ys = frame.require(Channel::Y)?;
    let colors = frame.values(Channel::Color)?;
    let fills = frame.values(Channel::Fill)?;
    let shapes = frame.values(Channel::Shape)?;
    let sizes = frame.values(Channel::Size)?;
    let alphas = frame.values(Channel::Alpha)?;

    let pick = |opt: &Option<Vec<crate::data::Value>>, i: usize| opt.as_ref().map(|v| v[i].clone());

    let marks = xs
        .into_iter()
        .zip(ys)
        .enumerate()
        .map(|(i, (x, y))| {
            let mut mark = PointMark::new(x, y);
            if let Some(offsets) = &offsets {
                mark.x_offset = offsets[i];
            }
            mark.color = pick(&colors, i);
            mark.fill = pick(&fills, i);
            mark.shape = pick(&shapes, i);
            mark.size = pick(&sizes, i);
            mark.alpha = pick(&alphas, i);
            mark
        })
        .collect();
    Ok(MarkSet::Points(marks))
}
