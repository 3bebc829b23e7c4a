//! Immutable dataset views
//!
//! A [`DatasetView`] is an ordered set of named, kinded columns with equal
//! row counts. Views are values: `filter`, `derive` and `grouped_transform`
//! return new views and never touch their input. Derived views share
//! untouched columns with their parent through `Arc`, so chaining transforms
//! does not copy the whole table.
//!
//! The core never loads data itself; an external loader builds the initial
//! view from whatever source it likes and hands it in.

pub mod value;

pub use value::{ColumnKind, Value};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Separator for compound partition keys (unlikely in real data)
pub(crate) const KEY_SEP: char = '\u{1f}';

/// A named, kinded column of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Arc<Vec<Value>>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values: Arc::new(values),
        }
    }

    /// Categorical column from anything convertible to values
    pub fn categorical<T: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(
            name,
            ColumnKind::Categorical,
            values.into_iter().map(Into::into).collect(),
        )
    }

    /// Continuous numeric column
    pub fn continuous<T: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(
            name,
            ColumnKind::Continuous,
            values.into_iter().map(Into::into).collect(),
        )
    }

    /// Ordinal column
    pub fn ordinal<T: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(
            name,
            ColumnKind::Ordinal,
            values.into_iter().map(Into::into).collect(),
        )
    }

    /// Temporal column
    pub fn temporal<T: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(
            name,
            ColumnKind::Temporal,
            values.into_iter().map(Into::into).collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Borrowed accessor for one row of a view
///
/// Handed to `filter` predicates and `derive` expressions. `require` fails
/// with [`Error::UnknownColumn`] so a typo in a user expression surfaces as
/// a typed error instead of silently matching nothing.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    view: &'a DatasetView,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of `column` in this row, if the column exists
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.view.column(column).map(|c| &c.values()[self.index])
    }

    /// Value of `column` in this row, failing on an unknown column
    pub fn require(&self, column: &str) -> Result<&'a Value> {
        self.get(column).ok_or_else(|| Error::UnknownColumn {
            column: column.to_string(),
        })
    }
}

/// An immutable view over rows and named, kinded columns
///
/// Deserialization runs the same validation as [`DatasetView::new`], so a
/// view cannot enter the crate with duplicate names or unequal row counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDatasetView")]
pub struct DatasetView {
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct RawDatasetView {
    columns: Vec<Column>,
}

impl TryFrom<RawDatasetView> for DatasetView {
    type Error = Error;

    fn try_from(raw: RawDatasetView) -> Result<Self> {
        DatasetView::new(raw.columns)
    }
}

impl DatasetView {
    /// Build a view, validating that names are unique and row counts agree
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let expected = columns.first().map(|c| c.len()).unwrap_or(0);
        let mut seen: HashMap<&str, ()> = HashMap::new();
        for col in &columns {
            if seen.insert(col.name(), ()).is_some() {
                return Err(Error::NameCollision {
                    column: col.name().to_string(),
                });
            }
            if col.len() != expected {
                return Err(Error::MismatchedColumns {
                    column: col.name().to_string(),
                    expected,
                    actual: col.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// An empty view with no columns and no rows
    pub fn empty() -> Self {
        Self { columns: Vec::new() }
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Look up a column, failing with [`Error::UnknownColumn`]
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| Error::UnknownColumn {
            column: name.to_string(),
        })
    }

    pub fn row(&self, index: usize) -> Row<'_> {
        Row { view: self, index }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.n_rows()).map(move |index| Row { view: self, index })
    }

    /// Retain rows where `predicate` holds, preserving column order and kinds
    pub fn filter<F>(&self, predicate: F) -> Result<DatasetView>
    where
        F: Fn(&Row<'_>) -> Result<bool>,
    {
        let mut keep = Vec::new();
        for row in self.rows() {
            if predicate(&row)? {
                keep.push(row.index);
            }
        }
        Ok(self.take_rows(&keep))
    }

    /// Add one computed column, failing on a name collision
    ///
    /// The expression sees each row through [`Row`]; referencing an unknown
    /// column via `Row::require` fails the whole derivation.
    pub fn derive<F>(&self, name: &str, kind: ColumnKind, expr: F) -> Result<DatasetView>
    where
        F: Fn(&Row<'_>) -> Result<Value>,
    {
        if self.has_column(name) {
            return Err(Error::NameCollision {
                column: name.to_string(),
            });
        }
        let mut values = Vec::with_capacity(self.n_rows());
        for row in self.rows() {
            values.push(expr(&row)?);
        }
        let mut columns = self.columns.clone();
        columns.push(Column::new(name, kind, values));
        Ok(DatasetView { columns })
    }

    /// Partition rows by the distinct tuples of `group_columns` and apply
    /// `f` independently per partition
    ///
    /// Group order is first-appearance order. `f` sees each partition as a
    /// plain view of the original columns. When every partition keeps its
    /// row count, each output row returns to its input row's original slot,
    /// so a non-reordering `f` reproduces the original row order while a
    /// reordering `f` keeps its new order within the partition's slots.
    /// Partitions that change row count concatenate in group order instead.
    pub fn grouped_transform<F>(&self, group_columns: &[&str], f: F) -> Result<DatasetView>
    where
        F: Fn(&DatasetView) -> Result<DatasetView>,
    {
        let groups = self.group_rows(group_columns)?;
        if groups.is_empty() {
            // Zero rows means zero partitions; keep the column layout
            return Ok(self.take_rows(&[]));
        }

        let mut results = Vec::with_capacity(groups.len());
        let mut counts_preserved = true;
        for (_, indices) in &groups {
            let part = f(&self.take_rows(indices))?;
            counts_preserved &= part.n_rows() == indices.len();
            results.push(part);
        }

        let merged = DatasetView::concat(&results)?;
        if !counts_preserved {
            return Ok(merged);
        }
        // Output row j of a partition stands for the partition's j-th input
        // row; send it back to that row's original position.
        let mut order = vec![0usize; merged.n_rows()];
        let mut offset = 0;
        for (_, indices) in &groups {
            for (j, &original) in indices.iter().enumerate() {
                order[original] = offset + j;
            }
            offset += indices.len();
        }
        Ok(merged.take_rows(&order))
    }

    /// Distinct tuples of `columns` in first-appearance order, with the row
    /// indices belonging to each tuple
    pub(crate) fn group_rows(&self, columns: &[&str]) -> Result<Vec<(Vec<Value>, Vec<usize>)>> {
        let cols: Vec<&Column> = columns
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<_>>()?;

        let mut order: Vec<(Vec<Value>, Vec<usize>)> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();
        for i in 0..self.n_rows() {
            let tuple: Vec<Value> = cols.iter().map(|c| c.values()[i].clone()).collect();
            let key = tuple
                .iter()
                .map(Value::to_key_string)
                .collect::<Vec<_>>()
                .join(&KEY_SEP.to_string());
            match by_key.get(&key) {
                Some(&slot) => order[slot].1.push(i),
                None => {
                    by_key.insert(key, order.len());
                    order.push((tuple, vec![i]));
                }
            }
        }
        Ok(order)
    }

    /// New view containing the given rows, in the given order
    pub(crate) fn take_rows(&self, indices: &[usize]) -> DatasetView {
        let columns = self
            .columns
            .iter()
            .map(|col| {
                let values = indices.iter().map(|&i| col.values()[i].clone()).collect();
                Column::new(col.name(), col.kind(), values)
            })
            .collect();
        DatasetView { columns }
    }

    /// Concatenate views with identical column layouts
    fn concat(views: &[DatasetView]) -> Result<DatasetView> {
        let Some(first) = views.first() else {
            return Ok(DatasetView::empty());
        };
        let layout: Vec<(&str, ColumnKind)> =
            first.columns.iter().map(|c| (c.name(), c.kind())).collect();
        for view in &views[1..] {
            let other: Vec<(&str, ColumnKind)> =
                view.columns.iter().map(|c| (c.name(), c.kind())).collect();
            if other != layout {
                return Err(Error::InvalidDataset(
                    "grouped transform produced partitions with different columns".to_string(),
                ));
            }
        }
        let columns = layout
            .iter()
            .enumerate()
            .map(|(ci, (name, kind))| {
                let mut values = Vec::new();
                for view in views {
                    values.extend_from_slice(view.columns[ci].values());
                }
                Column::new(*name, *kind, values)
            })
            .collect();
        Ok(DatasetView { columns })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gapminder_like() -> DatasetView {
        DatasetView::new(vec![
            Column::categorical("country", ["Nigeria", "Egypt", "China", "India", "Japan"]),
            Column::categorical("continent", ["Africa", "Africa", "Asia", "Asia", "Asia"]),
            Column::continuous("pop", [206.0, 102.0, 1402.0, 1380.0, 126.0]),
            Column::continuous("life_exp", [54.7, 71.8, 76.9, 69.7, 84.4]),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let err = DatasetView::new(vec![
            Column::continuous("x", [1.0]),
            Column::continuous("x", [2.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::NameCollision { column } if column == "x"));
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let err = DatasetView::new(vec![
            Column::continuous("x", [1.0, 2.0]),
            Column::continuous("y", [1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::MismatchedColumns { .. }));
    }

    #[test]
    fn test_filter_retains_satisfying_rows() {
        let view = gapminder_like();
        let asia = view
            .filter(|row| Ok(row.require("continent")?.as_str() == Some("Asia")))
            .unwrap();
        assert!(asia.n_rows() <= view.n_rows());
        assert_eq!(asia.n_rows(), 3);
        for row in asia.rows() {
            assert_eq!(row.get("continent").unwrap().as_str(), Some("Asia"));
        }
        // Source view unaffected
        assert_eq!(view.n_rows(), 5);
    }

    #[test]
    fn test_filter_unknown_column_fails() {
        let view = gapminder_like();
        let err = view
            .filter(|row| Ok(!row.require("contnent")?.is_null()))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { column } if column == "contnent"));
    }

    #[test]
    fn test_derive_adds_column() {
        let view = gapminder_like();
        let derived = view
            .derive("pop_log", ColumnKind::Continuous, |row| {
                Ok(Value::Float(row.require("pop")?.as_f64().unwrap().ln()))
            })
            .unwrap();
        assert_eq!(derived.n_columns(), view.n_columns() + 1);
        assert!(derived.has_column("pop_log"));
        assert!(!view.has_column("pop_log"));
    }

    #[test]
    fn test_derive_is_idempotent_on_values() {
        let view = gapminder_like();
        let expr = |row: &Row<'_>| Ok(Value::Float(row.require("pop")?.as_f64().unwrap() * 2.0));
        let a = view.derive("pop2", ColumnKind::Continuous, expr).unwrap();
        let b = view.derive("pop2", ColumnKind::Continuous, expr).unwrap();
        assert_eq!(
            a.column("pop2").unwrap().values(),
            b.column("pop2").unwrap().values()
        );
    }

    #[test]
    fn test_derive_name_collision() {
        let view = gapminder_like();
        let err = view
            .derive("pop", ColumnKind::Continuous, |_| Ok(Value::Null))
            .unwrap_err();
        assert!(matches!(err, Error::NameCollision { column } if column == "pop"));
    }

    #[test]
    fn test_derive_shares_parent_columns() {
        let view = gapminder_like();
        let derived = view
            .derive("flag", ColumnKind::Categorical, |_| Ok(Value::Bool(true)))
            .unwrap();
        // Untouched columns are shared, not copied
        assert!(Arc::ptr_eq(
            &view.column("pop").unwrap().values,
            &derived.column("pop").unwrap().values
        ));
    }

    #[test]
    fn test_grouped_transform_max_filter() {
        // Keep the most populous country per continent
        let view = gapminder_like();
        let top = view
            .grouped_transform(&["continent"], |part| {
                let max = part
                    .require_column("pop")?
                    .values()
                    .iter()
                    .filter_map(Value::as_f64)
                    .fold(f64::NEG_INFINITY, f64::max);
                part.filter(|row| Ok(row.require("pop")?.as_f64() == Some(max)))
            })
            .unwrap();
        assert_eq!(top.n_rows(), 2);
        // Original row order preserved: Nigeria (row 0) before China (row 2)
        let countries: Vec<_> = top
            .require_column("country")
            .unwrap()
            .values()
            .iter()
            .map(Value::to_key_string)
            .collect();
        assert_eq!(countries, vec!["Nigeria", "China"]);
        assert_eq!(top.column_names(), view.column_names());
    }

    #[test]
    fn test_grouped_transform_keeps_callback_order() {
        let view = DatasetView::new(vec![
            Column::categorical("g", ["a", "a", "b", "b"]),
            Column::continuous("v", [2.0, 1.0, 4.0, 3.0]),
        ])
        .unwrap();
        // A callback that sorts its partition keeps that order in the output
        let sorted = view
            .grouped_transform(&["g"], |part| {
                let mut order: Vec<usize> = (0..part.n_rows()).collect();
                let values = part.require_column("v")?.values().to_vec();
                order.sort_by(|a, b| values[*a].total_cmp(&values[*b]));
                Ok(part.take_rows(&order))
            })
            .unwrap();
        let values: Vec<f64> = sorted
            .require_column("v")
            .unwrap()
            .values()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_grouped_transform_partition_has_only_source_columns() {
        let view = gapminder_like();
        view.grouped_transform(&["continent"], |part| {
            assert_eq!(part.column_names(), view.column_names());
            Ok(part.clone())
        })
        .unwrap();
    }

    #[test]
    fn test_grouped_transform_sequential_numbering() {
        let view = gapminder_like();
        // Row indices inside a partition are local, so index + 1 numbers
        // each group's rows 1..n independently.
        let numbered = view
            .grouped_transform(&["continent"], |part| {
                part.derive("rank", ColumnKind::Continuous, |row| {
                    Ok(Value::Int(row.index() as i64 + 1))
                })
            })
            .unwrap();
        let ranks: Vec<_> = numbered
            .require_column("rank")
            .unwrap()
            .values()
            .iter()
            .map(|v| v.as_i64().unwrap())
            .collect();
        // Africa rows number 1..2, Asia rows 1..3, back in original row order
        assert_eq!(ranks, vec![1, 2, 1, 2, 3]);
    }

    #[test]
    fn test_grouped_transform_unknown_column() {
        let view = gapminder_like();
        let err = view.grouped_transform(&["planet"], |p| Ok(p.clone())).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { column } if column == "planet"));
    }

    #[test]
    fn test_group_rows_first_appearance_order() {
        let view = gapminder_like();
        let groups = view.group_rows(&["continent"]).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, vec![Value::from("Africa")]);
        assert_eq!(groups[0].1, vec![0, 1]);
        assert_eq!(groups[1].0, vec![Value::from("Asia")]);
        assert_eq!(groups[1].1, vec![2, 3, 4]);
    }

    #[test]
    fn test_deserialize_rejects_mismatched_lengths() {
        let json = r#"{"columns":[
            {"name":"x","kind":"continuous","values":[1.0,2.0,3.0]},
            {"name":"y","kind":"continuous","values":[1.0]}
        ]}"#;
        assert!(serde_json::from_str::<DatasetView>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_names() {
        let json = r#"{"columns":[
            {"name":"x","kind":"continuous","values":[1.0]},
            {"name":"x","kind":"continuous","values":[2.0]}
        ]}"#;
        assert!(serde_json::from_str::<DatasetView>(json).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let view = gapminder_like();
        let json = serde_json::to_string(&view).unwrap();
        let back: DatasetView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn test_empty_view() {
        let view = DatasetView::empty();
        assert_eq!(view.n_rows(), 0);
        assert_eq!(view.n_columns(), 0);
        assert_eq!(view.filter(|_| Ok(true)).unwrap().n_rows(), 0);
    }
}
