//! Text and label geom implementations
//!
//! Both place the `label` channel's value at (x, y). Label additionally asks
//! the writer to draw a background box behind the text; the mark data is
//! otherwise identical.

use super::{GeomChannels, GeomTrait, GeomType};
use crate::plot::types::Channel;
use crate::resolve::{LayerFrame, MarkSet, TextMark};
use crate::Result;

const TEXT_CHANNELS: GeomChannels = GeomChannels {
    required: &[Channel::X, Channel::Y, Channel::Label],
    optional: &[Channel::Color, Channel::Size, Channel::Alpha],
};

fn build_texts(frame: &LayerFrame<'_>, background: bool) -> Result<MarkSet> {
    let xs = frame.require(Channel::X)?;
    let ys = frame.require(Channel::Y)?;
    let labels = frame.require(Channel::Label)?;
    let colors = frame.values(Channel::Color)?;
    let sizes = frame.values(Channel::Size)?;

    let marks = (0..xs.len())
        .filter(|&i| !labels[i].is_null())
        .map(|i| TextMark {
            x: xs[i].clone(),
            y: ys[i].clone(),
            text: labels[i].to_string(),
            background,
            color: colors.as_ref().map(|c| c[i].clone()),
            size: sizes.as_ref().map(|s| s[i].clone()),
        })
        .collect();
    Ok(MarkSet::Texts(marks))
}

/// Text geom - bare annotations at (x, y)
#[derive(Debug, Clone, Copy)]
pub struct Text;

impl GeomTrait for Text {
    fn geom_type(&self) -> GeomType {
        GeomType::Text
    }

    fn channels(&self) -> GeomChannels {
        TEXT_CHANNELS
    }

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        build_texts(frame, false)
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "text")
    }
}

/// Label geom - annotations drawn over a background box
#[derive(Debug, Clone, Copy)]
pub struct Label;

impl GeomTrait for Label {
    fn geom_type(&self) -> GeomType {
        GeomType::Label
    }

    fn channels(&self) -> GeomChannels {
        TEXT_CHANNELS
    }

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        build_texts(frame, true)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "label")
    }
}
