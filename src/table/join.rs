//! Inner join of an external secondary table onto the particle table.
//!
//! The secondary table typically comes out of a clustering or curation step
//! that produced one label per micrograph or per particle. Joining keeps the
//! particle rows whose key value appears in the secondary table and appends
//! the secondary columns to them; everything else is dropped, as an inner
//! join does.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::schema::{ColumnKind, ColumnRegistry};

use super::{CellValue, JoinError, ParticleTable};

/// A keyed secondary table to be joined onto the particle table.
///
/// Keys must be unique; a repeated key would make the join ambiguous and is
/// rejected. Textual duplicates fail when the table is built, numerically
/// equal ones when a join on a numeric key column resolves them. Values stay
/// as raw strings until the join materializes them under inferred column
/// kinds.
#[derive(Debug, Clone)]
pub struct JoinTable {
    key_column: String,
    columns: Vec<String>,
    rows: HashMap<String, Vec<String>>,
}

impl JoinTable {
    /// Read a secondary table from a headered CSV file.
    ///
    /// `key_column` names the CSV column to join on; the remaining columns
    /// are the ones a join appends.
    pub fn from_csv_path(path: impl AsRef<Path>, key_column: &str) -> Result<Self, JoinError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        Self::from_csv(reader, key_column)
    }

    /// Read a secondary table from headered CSV text.
    pub fn from_csv_reader<R: Read>(reader: R, key_column: &str) -> Result<Self, JoinError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        Self::from_csv(reader, key_column)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, key_column: &str) -> Result<Self, JoinError> {
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let key_pos = headers
            .iter()
            .position(|header| header == key_column)
            .ok_or_else(|| JoinError::JoinKeyMissing {
                column: key_column.to_string(),
                table: "secondary",
            })?;

        let columns = headers
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != key_pos)
            .map(|(_, header)| header.clone())
            .collect();

        let mut rows = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let key = record.get(key_pos).unwrap_or_default().to_string();
            let values: Vec<String> = record
                .iter()
                .enumerate()
                .filter(|(pos, _)| *pos != key_pos)
                .map(|(_, value)| value.to_string())
                .collect();
            if rows.insert(key.clone(), values).is_some() {
                return Err(JoinError::DuplicateKey(key));
            }
        }

        Ok(Self {
            key_column: key_column.to_string(),
            columns,
            rows,
        })
    }

    /// Build a secondary table from in-memory records.
    ///
    /// Each record pairs a key value with one value per appended column.
    pub fn from_records(
        key_column: &str,
        columns: Vec<String>,
        records: Vec<(String, Vec<String>)>,
    ) -> Result<Self, JoinError> {
        let mut rows = HashMap::with_capacity(records.len());
        for (key, values) in records {
            if rows.insert(key.clone(), values).is_some() {
                return Err(JoinError::DuplicateKey(key));
            }
        }

        Ok(Self {
            key_column: key_column.to_string(),
            columns,
            rows,
        })
    }

    /// Column the join matches on.
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Columns a join appends to the particle table.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of keyed records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lookup map keyed the way a join against a key column of `kind`
    /// compares. The kind is only known on the particle side, so numerically
    /// equal duplicates surface here rather than at construction.
    fn lookup(&self, kind: ColumnKind) -> Result<HashMap<String, &Vec<String>>, JoinError> {
        let mut map = HashMap::with_capacity(self.rows.len());
        for (key, values) in &self.rows {
            let canonical = match kind {
                ColumnKind::Str => key.clone(),
                ColumnKind::Int | ColumnKind::Float => {
                    numeric_form(key).unwrap_or_else(|| key.clone())
                }
            };
            if map.insert(canonical, values).is_some() {
                return Err(JoinError::DuplicateKey(key.clone()));
            }
        }
        Ok(map)
    }
}

/// Canonical comparison form of a numeric token, shared by both sides of a
/// join on a numeric key column: `7`, `7.0` and a float cell holding 7 all
/// produce the same key.
fn numeric_form(token: &str) -> Option<String> {
    if let Ok(value) = token.parse::<i64>() {
        return Some(value.to_string());
    }
    token.parse::<f64>().ok().map(|value| value.to_string())
}

fn cell_key(cell: &CellValue) -> String {
    match cell {
        CellValue::Int(value) => value.to_string(),
        CellValue::Float(value) => value.to_string(),
        CellValue::Str(value) => value.clone(),
    }
}

impl ParticleTable {
    /// Inner-join a secondary table onto this one.
    ///
    /// Rows whose key value has no match in the secondary table are dropped;
    /// matched rows gain the secondary columns, with kinds inferred from the
    /// matched values. String key columns are compared verbatim; numeric key
    /// columns are compared by value, so a secondary key `7` matches a float
    /// cell holding 7.
    pub fn join(&self, secondary: &JoinTable) -> Result<ParticleTable, JoinError> {
        let key_ordinal = self.registry.ordinal(secondary.key_column()).ok_or_else(|| {
            JoinError::JoinKeyMissing {
                column: secondary.key_column().to_string(),
                table: "particle",
            }
        })?;

        for column in secondary.columns() {
            if self.registry.contains(column) {
                return Err(JoinError::DuplicateColumn(column.clone()));
            }
        }

        let lookup = secondary.lookup(self.registry.kind_at(key_ordinal))?;
        let matched: Vec<(usize, &Vec<String>)> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(pos, row)| {
                let key = cell_key(&row[key_ordinal]);
                lookup.get(&key).map(|values| (pos, *values))
            })
            .collect();

        let mut kinds = vec![ColumnKind::Int; secondary.columns().len()];
        for (_, values) in &matched {
            for (slot, value) in kinds.iter_mut().zip(values.iter()) {
                *slot = slot.widen(ColumnKind::of_token(value));
            }
        }

        let mut names = self.registry.names().to_vec();
        names.extend(secondary.columns().iter().cloned());
        let mut all_kinds: Vec<ColumnKind> = (0..self.registry.len())
            .map(|ordinal| self.registry.kind_at(ordinal))
            .collect();
        all_kinds.extend(kinds.iter().copied());
        let registry = ColumnRegistry::from_parts(names, all_kinds);

        let rows = matched
            .into_iter()
            .map(|(pos, values)| {
                let mut row = self.rows[pos].clone();
                row.extend(
                    values
                        .iter()
                        .zip(&kinds)
                        .map(|(value, kind)| CellValue::from_token(*kind, value)),
                );
                row
            })
            .collect();

        Ok(ParticleTable::assemble(
            registry,
            rows,
            self.identity_ordinal,
        ))
    }
}
