//! Row and column selection.
//!
//! Keeping rows by identity is strict: requesting a key the table does not
//! hold is an error, because a silent partial subset would corrupt any
//! workflow built on a curated keep list. Exclusion and column selection are
//! permissive in the other direction: naming an absent value or column is a
//! no-op, and the identity column can never be selected away.

use std::collections::HashSet;

use crate::schema::{columns, ColumnRegistry};

use super::{ParticleTable, TableError};

impl ParticleTable {
    /// Keep exactly the rows named by `keys`, in the requested order.
    ///
    /// The whole key set is validated before any row is copied; if any keys
    /// are missing the selection fails and reports how many. Duplicate
    /// requests for the same key are ignored after the first.
    pub fn keep_rows(&self, keys: &[&str]) -> Result<ParticleTable, TableError> {
        let missing = keys.iter().filter(|key| !self.index.contains_key(**key)).count();
        if missing > 0 {
            return Err(TableError::KeySubsetViolation {
                missing,
                requested: keys.len(),
            });
        }

        let mut seen = HashSet::with_capacity(keys.len());
        let mut rows = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(&pos) = self.index.get(*key) {
                if seen.insert(pos) {
                    rows.push(self.rows[pos].clone());
                }
            }
        }

        Ok(ParticleTable::assemble(
            self.registry.clone(),
            rows,
            self.identity_ordinal,
        ))
    }

    /// Drop every row whose value in `column` appears in `excluded`.
    ///
    /// Values that match nothing are ignored, and naming a column the table
    /// does not carry excludes nothing, so the operation is a no-op rather
    /// than an error in both cases.
    pub fn drop_rows(&self, column: &str, excluded: &[&str]) -> ParticleTable {
        let Some(ordinal) = self.registry.ordinal(column) else {
            return self.clone();
        };

        let excluded: HashSet<&str> = excluded.iter().copied().collect();
        let rows = self
            .rows
            .iter()
            .filter(|row| !excluded.contains(row[ordinal].to_string().as_str()))
            .cloned()
            .collect();

        ParticleTable::assemble(self.registry.clone(), rows, self.identity_ordinal)
    }

    /// Keep the identity column plus the named columns, in the requested
    /// order. Names the table does not carry are ignored.
    pub fn keep_columns(&self, names: &[&str]) -> ParticleTable {
        let mut keep: Vec<usize> = vec![self.identity_ordinal];
        for name in names {
            if *name == columns::IMAGE_NAME {
                continue;
            }
            if let Some(ordinal) = self.registry.ordinal(name) {
                if !keep.contains(&ordinal) {
                    keep.push(ordinal);
                }
            }
        }

        self.project(&keep)
    }

    /// Drop the named columns, preserving the order of the rest. The
    /// identity column and names the table does not carry are ignored.
    pub fn drop_columns(&self, names: &[&str]) -> ParticleTable {
        let dropped: HashSet<usize> = names
            .iter()
            .filter(|name| **name != columns::IMAGE_NAME)
            .filter_map(|name| self.registry.ordinal(name))
            .collect();
        let keep: Vec<usize> = (0..self.registry.len())
            .filter(|ordinal| !dropped.contains(ordinal))
            .collect();

        self.project(&keep)
    }

    /// Rebuild the table around the given column ordinals.
    fn project(&self, keep: &[usize]) -> ParticleTable {
        let names = keep
            .iter()
            .map(|&ordinal| self.registry.names()[ordinal].clone())
            .collect();
        let kinds = keep
            .iter()
            .map(|&ordinal| self.registry.kind_at(ordinal))
            .collect();
        let registry = ColumnRegistry::from_parts(names, kinds);

        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&ordinal| row[ordinal].clone()).collect())
            .collect();

        let identity_ordinal = keep
            .iter()
            .position(|&ordinal| ordinal == self.identity_ordinal)
            .unwrap_or(0);
        ParticleTable::assemble(registry, rows, identity_ordinal)
    }
}
