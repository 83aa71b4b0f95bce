//! Read-only column queries over a particle table.
//!
//! Lookups are permissive: asking about a column the table does not carry
//! returns `None` rather than an error, so callers can probe optional
//! columns without guarding every access.

use std::collections::HashSet;

use super::{CellValue, ParticleTable};

/// Range statistics of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ColumnStats {
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Median; an even count averages the middle pair
    pub median: f64,
}

impl ParticleTable {
    /// True when every named column is declared in the table.
    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.registry.contains(name))
    }

    /// Cells of one column in row order, or `None` if the column is absent.
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let ordinal = self.registry.ordinal(name)?;
        Some(self.rows.iter().map(|row| &row[ordinal]).collect())
    }

    /// Distinct rendered values of one column, in first-seen order.
    pub fn unique_values(&self, name: &str) -> Option<Vec<String>> {
        let ordinal = self.registry.ordinal(name)?;
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for row in &self.rows {
            let value = row[ordinal].to_string();
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
        Some(values)
    }

    /// Number of distinct values in one column, or `None` if it is absent.
    pub fn unique_count(&self, name: &str) -> Option<usize> {
        let ordinal = self.registry.ordinal(name)?;
        let distinct: HashSet<String> = self
            .rows
            .iter()
            .map(|row| row[ordinal].to_string())
            .collect();
        Some(distinct.len())
    }

    /// Numeric values of one column in row order.
    ///
    /// Returns `None` when the column is absent or was inferred as a string
    /// column.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let ordinal = self.registry.ordinal(name)?;
        self.rows
            .iter()
            .map(|row| row[ordinal].as_f64())
            .collect()
    }

    /// Min, max, and median of one numeric column.
    ///
    /// Returns `None` for absent columns, string columns, and empty tables.
    pub fn column_stats(&self, name: &str) -> Option<ColumnStats> {
        let mut values = self.numeric_column(name)?;
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let mid = values.len() / 2;
        let median = if values.len() % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };

        Some(ColumnStats {
            min: values[0],
            max: values[values.len() - 1],
            median,
        })
    }
}
