use memchr::memmem;

use crate::error::{ColumnRole, Result, SiftError};

use super::model::{value_at, HeaderIndex, Table};

/// Keep the header plus every data row whose `column` field contains `needle`.
///
/// Matching is a literal, case-sensitive byte substring test. Rows too short
/// to have the column compare as empty and therefore never match. Row order
/// is preserved. `index` must come from this table's header.
pub fn apply_filter(
    table: Table,
    index: &HeaderIndex,
    column: &str,
    needle: &str,
) -> Result<Table> {
    if column.is_empty() || needle.is_empty() {
        return Err(SiftError::MissingArgument);
    }

    let idx = index.resolve(column, ColumnRole::Filter)?;

    let Some((header, data)) = table.into_parts() else {
        return Ok(Table::default());
    };
    let before = data.len();

    let finder = memmem::Finder::new(needle.as_bytes());
    let kept: Vec<_> = data
        .into_iter()
        .filter(|row| finder.find(value_at(row, idx)).is_some())
        .collect();

    log::debug!(
        "filter {column:?} contains {needle:?}: kept {} of {before} rows",
        kept.len()
    );
    Ok(Table::from_parts(header, kept))
}
