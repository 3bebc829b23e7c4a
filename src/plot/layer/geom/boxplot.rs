//! Boxplot geom implementation
//!
//! Per distinct x partition: five-number summary of the y channel. Whiskers
//! extend to the furthest observation within `coef` x IQR of the box edges
//! (ggplot2 convention, `coef` defaults to 1.5); observations beyond are
//! reported as outliers. Box style follows fill when bound, else color;
//! fill wins when both are.

use super::{DefaultParam, GeomChannels, GeomTrait, GeomType};
use crate::plot::types::Channel;
use crate::resolve::{BoxMark, LayerFrame, MarkSet};
use crate::{Error, Result};

const DEFAULT_COEF: f64 = 1.5;

/// Boxplot geom - box-and-whisker summaries per x partition
#[derive(Debug, Clone, Copy)]
pub struct Boxplot;

impl GeomTrait for Boxplot {
    fn geom_type(&self) -> GeomType {
        GeomType::Boxplot
    }

    fn channels(&self) -> GeomChannels {
        GeomChannels {
            required: &[Channel::X, Channel::Y],
            optional: &[Channel::Fill, Channel::Color, Channel::Alpha],
        }
    }

    fn default_params(&self) -> &'static [DefaultParam] {
        &[DefaultParam {
            name: "coef",
            default: Some(DEFAULT_COEF),
        }]
    }

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        let coef = frame.number_param("coef")?.unwrap_or(DEFAULT_COEF);
        if coef <= 0.0 {
            return Err(Error::InvalidParameter {
                geom: self.to_string(),
                name: "coef".to_string(),
                reason: format!("must be positive, got {}", coef),
            });
        }

        let xs = frame.require(Channel::X)?;
        let ys = frame.numeric(Channel::Y)?;
        let fills = match frame.values(Channel::Fill)? {
            Some(f) => Some(f),
            None => frame.values(Channel::Color)?,
        };

        let mut partitions: Vec<(crate::data::Value, Vec<usize>)> = Vec::new();
        for (i, x) in xs.iter().enumerate() {
            match partitions.iter_mut().find(|(px, _)| px == x) {
                Some((_, rows)) => rows.push(i),
                None => partitions.push((x.clone(), vec![i])),
            }
        }
        partitions.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut marks = Vec::new();
        for (x, rows) in partitions {
            // Nulls are skipped; an all-null partition yields no box
            let values: Vec<f64> = rows.iter().filter_map(|&i| ys[i]).collect();
            if values.is_empty() {
                continue;
            }
            let mut sorted = values.clone();
            sorted.sort_by(f64::total_cmp);

            let q1 = quantile(&sorted, 0.25);
            let median = quantile(&sorted, 0.5);
            let q3 = quantile(&sorted, 0.75);
            let iqr = q3 - q1;
            let lower_fence = q1 - coef * iqr;
            let upper_fence = q3 + coef * iqr;

            let lower_whisker = sorted
                .iter()
                .copied()
                .find(|v| *v >= lower_fence)
                .unwrap_or(q1);
            let upper_whisker = sorted
                .iter()
                .rev()
                .copied()
                .find(|v| *v <= upper_fence)
                .unwrap_or(q3);
            let outliers = values
                .iter()
                .copied()
                .filter(|v| *v < lower_fence || *v > upper_fence)
                .collect();

            marks.push(BoxMark {
                x,
                median,
                q1,
                q3,
                lower_whisker,
                upper_whisker,
                outliers,
                fill: fills.as_ref().map(|f| f[rows[0]].clone()),
            });
        }
        Ok(MarkSet::Boxes(marks))
    }
}

impl std::fmt::Display for Boxplot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "boxplot")
    }
}

/// Linear-interpolation quantile over a sorted slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, DatasetView, Value};
    use crate::plot::types::Mappings;
    use std::collections::HashMap;

    fn build_boxes(x: Vec<&str>, y: Vec<f64>) -> Vec<BoxMark> {
        let data = DatasetView::new(vec![
            Column::categorical("sp", x),
            Column::continuous("w", y),
        ])
        .unwrap();
        let mapping = Mappings::new()
            .with_column(Channel::X, "sp")
            .with_column(Channel::Y, "w");
        let params = HashMap::new();
        let frame = LayerFrame {
            geom: "boxplot",
            data: &data,
            mapping: &mapping,
            params: &params,
        };
        let MarkSet::Boxes(boxes) = Boxplot.build(&frame).unwrap() else {
            panic!("expected boxes");
        };
        boxes
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&[5.0], 0.5), 5.0);
    }

    #[test]
    fn test_five_number_summary() {
        let boxes = build_boxes(
            vec!["a"; 5],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        );
        assert_eq!(boxes.len(), 1);
        let b = &boxes[0];
        assert_eq!(b.median, 3.0);
        assert_eq!(b.q1, 2.0);
        assert_eq!(b.q3, 4.0);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 5.0);
        assert!(b.outliers.is_empty());
    }

    #[test]
    fn test_injected_outlier_detected() {
        // Tight distribution plus one far value
        let boxes = build_boxes(
            vec!["a"; 8],
            vec![10.0, 10.5, 11.0, 11.5, 12.0, 12.5, 13.0, 99.0],
        );
        let b = &boxes[0];
        assert_eq!(b.outliers, vec![99.0]);
        // The outlier sits beyond the whisker, never inside it
        assert!(99.0 > b.upper_whisker);
        assert!(b.upper_whisker <= 13.0);
    }

    #[test]
    fn test_partitions_sorted_by_x() {
        let boxes = build_boxes(
            vec!["b", "a", "b", "a", "b", "a"],
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].x, Value::from("a"));
        assert_eq!(boxes[1].x, Value::from("b"));
    }

    #[test]
    fn test_string_y_rejected() {
        let data = DatasetView::new(vec![
            Column::categorical("sp", ["a"]),
            Column::categorical("name", ["fluffy"]),
        ])
        .unwrap();
        let mapping = Mappings::new()
            .with_column(Channel::X, "sp")
            .with_column(Channel::Y, "name");
        let params = HashMap::new();
        let frame = LayerFrame {
            geom: "boxplot",
            data: &data,
            mapping: &mapping,
            params: &params,
        };
        assert!(matches!(
            Boxplot.build(&frame).unwrap_err(),
            Error::NonNumeric { channel: Channel::Y, .. }
        ));
    }
}
