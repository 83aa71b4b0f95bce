use std::collections::HashMap;

/// Kind of value a column holds, inferred once at load time.
///
/// Kinds form a widening lattice `Int < Float < Str`: a column is typed as
/// the widest kind any of its tokens required, so a column mixing `12` and
/// `12.5` is `Float`, and one mixing numbers with text is `Str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColumnKind {
    /// Whole numbers (class assignments, group ids, box sizes)
    Int,
    /// Floating-point measurements, serialized with fixed 6-decimal precision
    Float,
    /// Free text (stack paths, micrograph names, group labels)
    Str,
}

impl ColumnKind {
    /// Narrowest kind able to represent a single whitespace-free token.
    pub fn of_token(token: &str) -> Self {
        if token.parse::<i64>().is_ok() {
            ColumnKind::Int
        } else if token.parse::<f64>().is_ok() {
            ColumnKind::Float
        } else {
            ColumnKind::Str
        }
    }

    /// Combine two kinds into the narrowest kind representing both.
    pub fn widen(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Ordered, typed column set declared by a STAR header.
///
/// Built once when a table is loaded; every accessor that takes a column
/// name resolves it here, so unknown-column requests behave the same way
/// everywhere instead of being handled ad hoc at each call site.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRegistry {
    names: Vec<String>,
    kinds: Vec<ColumnKind>,
    ordinals: HashMap<String, usize>,
}

impl ColumnRegistry {
    /// Build a registry from parallel name/kind lists in declaration order.
    ///
    /// Callers must have rejected duplicate names already (the header parser
    /// fails on duplicate declarations, joins on column collisions).
    pub(crate) fn from_parts(names: Vec<String>, kinds: Vec<ColumnKind>) -> Self {
        debug_assert_eq!(names.len(), kinds.len());
        let ordinals = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect::<HashMap<_, _>>();
        debug_assert_eq!(ordinals.len(), names.len(), "duplicate column name");
        Self {
            names,
            kinds,
            ordinals,
        }
    }

    /// Column names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column in declaration order.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.ordinals.get(name).copied()
    }

    /// Inferred kind of a named column.
    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        self.ordinal(name).map(|i| self.kinds[i])
    }

    /// Inferred kind of the column at `ordinal`.
    pub fn kind_at(&self, ordinal: usize) -> ColumnKind {
        self.kinds[ordinal]
    }

    /// Whether a column with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.ordinals.contains_key(name)
    }

    /// Number of declared columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Widen the kind of the column at `ordinal` to cover freshly written
    /// cells. Used by the recenter transform when an integer coordinate
    /// column receives fractional corrected values.
    pub(crate) fn widen_kind(&mut self, ordinal: usize, kind: ColumnKind) {
        self.kinds[ordinal] = self.kinds[ordinal].widen(kind);
    }
}
