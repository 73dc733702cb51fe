use std::collections::BTreeMap;

use crate::error::{ColumnRole, Result, SiftError};

// ---------------------------------------------------------------------------
// Table – the whole CSV held in memory
// ---------------------------------------------------------------------------

/// One field, kept as raw bytes so input in any encoding passes through.
pub type Field = Vec<u8>;

/// One row of fields. Rows are not required to share a width.
pub type Row = Vec<Field>;

/// An ordered set of rows. Row 0, when present, is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Table { rows }
    }

    /// All rows, header included.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[Field]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header (empty when the table has no header either).
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Split into header and data rows, consuming the table.
    pub fn into_parts(self) -> Option<(Row, Vec<Row>)> {
        let mut rows = self.rows.into_iter();
        let header = rows.next()?;
        Some((header, rows.collect()))
    }

    /// Reassemble a table from a header and its data rows.
    pub fn from_parts(header: Row, data: Vec<Row>) -> Self {
        let mut rows = Vec::with_capacity(data.len() + 1);
        rows.push(header);
        rows.extend(data);
        Table { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column positions derived from the header row.
    pub fn header_index(&self) -> HeaderIndex {
        self.header().map(HeaderIndex::build).unwrap_or_default()
    }
}

/// Field `idx` of `row`, or `b""` when the row is too short.
pub fn value_at(row: &[Field], idx: usize) -> &[u8] {
    row.get(idx).map(Vec::as_slice).unwrap_or(b"")
}

// ---------------------------------------------------------------------------
// HeaderIndex – column name → position
// ---------------------------------------------------------------------------

/// Maps each header name to its zero-based column position.
///
/// Duplicate names keep the position of their last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: BTreeMap<Field, usize>,
}

impl HeaderIndex {
    pub fn build(header: &[Field]) -> Self {
        let mut positions = BTreeMap::new();
        for (i, name) in header.iter().enumerate() {
            if let Some(prev) = positions.insert(name.clone(), i) {
                log::warn!(
                    "duplicate column {:?} at positions {prev} and {i}; using {i}",
                    String::from_utf8_lossy(name)
                );
            }
        }
        HeaderIndex { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name.as_bytes()).copied()
    }

    /// Position of `name`, or the `ColumnNotFound` error for the stage asking.
    pub fn resolve(&self, name: &str, role: ColumnRole) -> Result<usize> {
        self.position(name).ok_or_else(|| SiftError::ColumnNotFound {
            role,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    #[test]
    fn test_header_index_positions() {
        let idx = HeaderIndex::build(&row(&["name", "age", "city"]));
        assert_eq!(idx.position("name"), Some(0));
        assert_eq!(idx.position("city"), Some(2));
        assert_eq!(idx.position("zip"), None);
    }

    #[test]
    fn test_header_index_duplicate_last_wins() {
        let idx = HeaderIndex::build(&row(&["id", "name", "id"]));
        assert_eq!(idx.position("id"), Some(2));
        assert_eq!(idx.position("name"), Some(1));
    }

    #[test]
    fn test_header_index_resolve_names_role() {
        let idx = HeaderIndex::build(&row(&["name"]));
        assert_eq!(idx.resolve("name", ColumnRole::Filter).unwrap(), 0);
        let err = idx.resolve("age", ColumnRole::Sort).unwrap_err();
        assert_eq!(err.to_string(), "sort column not found: age");
    }

    #[test]
    fn test_header_index_non_utf8_names() {
        let header: Row = vec![b"\x96\xbc\x91\x4f".to_vec(), b"age".to_vec()];
        let idx = HeaderIndex::build(&header);
        assert_eq!(idx.position("age"), Some(1));
    }

    #[test]
    fn test_value_at_short_row_defaults_to_empty() {
        let r = row(&["a"]);
        assert_eq!(value_at(&r, 0), b"a");
        assert_eq!(value_at(&r, 3), b"");
    }

    #[test]
    fn test_empty_table_parts() {
        let table = Table::default();
        assert!(table.is_empty());
        assert!(table.data_rows().is_empty());
        assert_eq!(table.header_index(), HeaderIndex::default());
        assert!(table.into_parts().is_none());
    }

    #[test]
    fn test_parts_round_trip() {
        let table = Table::from_rows(vec![row(&["h"]), row(&["1"]), row(&["2"])]);
        assert_eq!(table.data_rows().len(), 2);
        let (header, data) = table.clone().into_parts().unwrap();
        assert_eq!(Table::from_parts(header, data), table);
    }
}
