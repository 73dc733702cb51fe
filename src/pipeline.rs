use std::io::Write;

use crate::cli::Options;
use crate::data::filter::apply_filter;
use crate::data::loader::{load_table, write_table};
use crate::data::model::Table;
use crate::data::sort::{apply_sort, SortSpec};
use crate::error::{ColumnRole, Result};

/// Apply the filter and sort requested in `options` to an already loaded table.
///
/// An empty table (not even a header) passes through untouched.
pub fn transform(table: Table, options: &Options) -> Result<Table> {
    if table.is_empty() {
        return Ok(table);
    }

    // The header row survives both stages, so one index serves the whole run.
    let index = table.header_index();
    let mut table = table;

    if let Some((column, value)) = options.filter_request() {
        table = apply_filter(table, &index, column, value)?;
    }

    if let Some(column) = options.sort_column() {
        // Nothing to order: neither the column nor the descriptor is checked.
        if table.data_rows().is_empty() {
            log::debug!("no data rows; skipping sort on {column:?}");
        } else {
            index.resolve(column, ColumnRole::Sort)?;
            let spec: SortSpec = options.sort_type.parse()?;
            table = apply_sort(table, &index, column, spec)?;
        }
    }

    Ok(table)
}

/// Read the configured input, transform it, and write the result to `out`.
///
/// Output is produced only when every stage succeeds; an input with no rows
/// writes nothing.
pub fn run<W: Write>(options: &Options, out: W) -> Result<()> {
    let table = load_table(options.input_path())?;
    if table.is_empty() {
        log::debug!("input is empty; nothing to write");
        return Ok(());
    }

    let table = transform(table, options)?;
    write_table(&table, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_table;
    use crate::error::SiftError;

    fn opts(args: &[&str]) -> Options {
        let mut full = vec!["csvsift"];
        full.extend_from_slice(args);
        Options::try_from_args(full).unwrap()
    }

    fn csv(content: &str) -> Table {
        read_table(content.as_bytes()).unwrap()
    }

    #[test]
    fn test_no_requests_is_identity() {
        let t = csv("b,a\n2,x\n1,y\n,\n");
        assert_eq!(transform(t.clone(), &opts(&[])).unwrap(), t);
    }

    #[test]
    fn test_filter_then_sort() {
        let t = csv("name,age\nYamada,40\nSmith,20\nYamamoto,30\nKiyama,10\n");
        let out = transform(
            t,
            &opts(&["-filter", "name", "-value", "Yama", "-sort", "age", "-type", "desc"]),
        )
        .unwrap();
        assert_eq!(out, csv("name,age\nYamada,40\nYamamoto,30\n"));
    }

    #[test]
    fn test_half_filter_fails() {
        let err = transform(csv("a\n1\n"), &opts(&["-value", "1"])).unwrap_err();
        assert!(matches!(err, SiftError::MissingArgument));
    }

    #[test]
    fn test_bad_descriptor_fails_when_rows_exist() {
        let err = transform(csv("a\n1\n2\n"), &opts(&["-sort", "a", "-type", "up"])).unwrap_err();
        assert!(matches!(err, SiftError::UnsupportedSortDirection(_)));
    }

    #[test]
    fn test_missing_sort_column_reported_before_bad_descriptor() {
        let err = transform(csv("a\n1\n2\n"), &opts(&["-sort", "zip", "-type", "up"])).unwrap_err();
        assert_eq!(err.to_string(), "sort column not found: zip");
    }

    #[test]
    fn test_non_utf8_table_filters_and_sorts() {
        let input: &[u8] = b"name,age\n\x8eR\x93c Yama,30\nYama\x97\xe9\x96\xd8,25\n\x96\xbc\x91\x4f,40\n";
        let t = read_table(input).unwrap();
        let out = transform(
            t,
            &opts(&["-filter", "name", "-value", "Yama", "-sort", "age", "-type", "asc:num"]),
        )
        .unwrap();
        let expected = Table::from_rows(vec![
            vec![b"name".to_vec(), b"age".to_vec()],
            vec![b"Yama\x97\xe9\x96\xd8".to_vec(), b"25".to_vec()],
            vec![b"\x8eR\x93c Yama".to_vec(), b"30".to_vec()],
        ]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_bad_descriptor_ignored_without_data_rows() {
        let t = csv("name,age\nBob,1\n");
        let out = transform(
            t,
            &opts(&["-filter", "name", "-value", "zzz", "-sort", "nope", "-type", "up"]),
        )
        .unwrap();
        assert_eq!(out, csv("name,age\n"));
    }

    #[test]
    fn test_empty_table_skips_everything() {
        let out = transform(Table::default(), &opts(&["-filter", "x"])).unwrap();
        assert!(out.is_empty());
    }
}
