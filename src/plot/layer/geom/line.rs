//! Line geom implementation
//!
//! Rows are partitioned by the `group` channel and each partition becomes
//! one connected path, ordered by the x channel's natural order. When the
//! group channel is unbound every row lands in a single partition - on
//! multi-series data that produces one path jumping between series, the
//! classic zig-zag defect. Binding `group` (or mapping it alongside color)
//! is the cure, not a smaller dataset.

use super::{GeomChannels, GeomTrait, GeomType};
use crate::data::Value;
use crate::plot::types::Channel;
use crate::resolve::{LayerFrame, MarkSet, PathMark, PathPoint};
use crate::Result;

/// Line geom - per-group paths connected in x order
#[derive(Debug, Clone, Copy)]
pub struct Line;

impl GeomTrait for Line {
    fn geom_type(&self) -> GeomType {
        GeomType::Line
    }

    fn channels(&self) -> GeomChannels {
        GeomChannels {
            required: &[Channel::X, Channel::Y],
            optional: &[Channel::Group, Channel::Color, Channel::Size, Channel::Alpha],
        }
    }

    fn build(&self, frame: &LayerFrame<'_>) -> Result<MarkSet> {
        let xs = frame.require(Channel::X)?;
        let ys = frame.require(Channel::Y)?;
        let groups = frame.values(Channel::Group)?;
        let colors = frame.values(Channel::Color)?;
        let sizes = frame.values(Channel::Size)?;
        let alphas = frame.values(Channel::Alpha)?;

        // Partition rows by group value, first-appearance order; unbound
        // group means one partition holding every row.
        let mut partitions: Vec<(Option<Value>, Vec<usize>)> = Vec::new();
        match &groups {
            None => {
                if !xs.is_empty() {
                    partitions.push((None, (0..xs.len()).collect()));
                }
            }
            Some(groups) => {
                for (i, g) in groups.iter().enumerate() {
                    match partitions
                        .iter_mut()
                        .find(|(key, _)| key.as_ref() == Some(g))
                    {
                        Some((_, rows)) => rows.push(i),
                        None => partitions.push((Some(g.clone()), vec![i])),
                    }
                }
            }
        }

        let marks = partitions
            .into_iter()
            .map(|(group, mut rows)| {
                // Stable sort keeps input order among ties on x
                rows.sort_by(|a, b| xs[*a].total_cmp(&xs[*b]));
                let first = rows[0];
                PathMark {
                    group,
                    points: rows
                        .iter()
                        .map(|&i| PathPoint {
                            x: xs[i].clone(),
                            y: ys[i].clone(),
                        })
                        .collect(),
                    color: colors.as_ref().map(|c| c[first].clone()),
                    size: sizes.as_ref().map(|s| s[first].clone()),
                    alpha: alphas.as_ref().map(|a| a[first].clone()),
                }
            })
            .collect();
        Ok(MarkSet::Paths(marks))
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, DatasetView};
    use crate::plot::types::Mappings;
    use std::collections::HashMap;

    /// Two series, three years each, rows interleaved by year
    fn two_series() -> DatasetView {
        DatasetView::new(vec![
            Column::categorical("country", ["Chile", "Peru", "Chile", "Peru", "Chile", "Peru"]),
            Column::continuous("year", [1997.0, 1997.0, 2002.0, 2002.0, 2007.0, 2007.0]),
            Column::continuous("life_exp", [75.8, 68.4, 77.9, 69.9, 78.6, 71.4]),
        ])
        .unwrap()
    }

    fn paths_for(mapping: &Mappings) -> Vec<PathMark> {
        let data = two_series();
        let params = HashMap::new();
        let frame = LayerFrame {
            geom: "line",
            data: &data,
            mapping,
            params: &params,
        };
        let MarkSet::Paths(paths) = Line.build(&frame).unwrap() else {
            panic!("expected paths");
        };
        paths
    }

    #[test]
    fn test_unbound_group_produces_zigzag() {
        let mapping = Mappings::new()
            .with_column(Channel::X, "year")
            .with_column(Channel::Y, "life_exp");
        let paths = paths_for(&mapping);
        // One path crossing both series
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].points.len(), 6);
        assert!(paths[0].group.is_none());
        // Consecutive points alternate between series: the y sequence is not
        // monotone within any single x, which is the visible zig-zag.
        let ys: Vec<f64> = paths[0]
            .points
            .iter()
            .map(|p| p.y.as_f64().unwrap())
            .collect();
        assert!(ys.windows(2).any(|w| w[1] < w[0]));
    }

    #[test]
    fn test_bound_group_partitions_series() {
        let mapping = Mappings::new()
            .with_column(Channel::X, "year")
            .with_column(Channel::Y, "life_exp")
            .with_column(Channel::Group, "country");
        let paths = paths_for(&mapping);
        // g groups of n rows each: exactly g disjoint paths of n points
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert_eq!(path.points.len(), 3);
            // Within each group points are connected in x order
            let xs: Vec<f64> = path.points.iter().map(|p| p.x.as_f64().unwrap()).collect();
            assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_ne!(paths[0].group, paths[1].group);
    }

    #[test]
    fn test_group_style_taken_per_group() {
        let mapping = Mappings::new()
            .with_column(Channel::X, "year")
            .with_column(Channel::Y, "life_exp")
            .with_column(Channel::Group, "country")
            .with_column(Channel::Color, "country");
        let paths = paths_for(&mapping);
        for path in &paths {
            assert_eq!(path.color, path.group);
        }
    }

    #[test]
    fn test_empty_data_yields_no_paths() {
        let data = DatasetView::new(vec![
            Column::continuous("year", Vec::<f64>::new()),
            Column::continuous("life_exp", Vec::<f64>::new()),
        ])
        .unwrap();
        let mapping = Mappings::new()
            .with_column(Channel::X, "year")
            .with_column(Channel::Y, "life_exp");
        let params = HashMap::new();
        let frame = LayerFrame {
            geom: "line",
            data: &data,
            mapping: &mapping,
            params: &params,
        };
        let MarkSet::Paths(paths) = Line.build(&frame).unwrap() else {
            panic!("expected paths");
        };
        assert!(paths.is_empty());
    }
}
