//! Decoder types

use std::collections::HashMap;

// ============================================================================
// Column Index
// ============================================================================

/// Header label to zero-based column position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Build the index from a header row. A repeated label maps to its
    /// last position.
    pub fn from_header(header: &[String]) -> Self {
        let positions = header
            .iter()
            .enumerate()
            .map(|(position, label)| (label.clone(), position))
            .collect();
        Self { positions }
    }

    /// Position of a column label
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the header was empty or absent
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Labels ordered by position
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<(&str, usize)> = self
            .positions
            .iter()
            .map(|(label, position)| (label.as_str(), *position))
            .collect();
        labels.sort_by_key(|(_, position)| *position);
        labels.into_iter().map(|(label, _)| label).collect()
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One CSV record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    /// Record number; the header is record 0
    pub number: usize,
    /// Cell values, untrimmed
    pub cells: Vec<String>,
}
