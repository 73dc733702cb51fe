use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use crate::error::{Result, SiftError};

use super::model::{Row, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from `path`, or from stdin when no path is given.
pub fn load_table(path: Option<&Path>) -> Result<Table> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| SiftError::OpenInput {
                path: path.to_path_buf(),
                source,
            })?;
            read_table(BufReader::new(file))
        }
        None => read_table(io::stdin().lock()),
    }
}

/// Parse comma-separated records into a [`Table`].
///
/// The first record is kept as an ordinary row (the header); records may
/// have differing widths. Fields are not required to be UTF-8.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Row> = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(SiftError::InputParse)?;
        rows.push(record.iter().map(<[u8]>::to_vec).collect());
    }

    log::debug!("read {} rows", rows.len());
    Ok(Table::from_rows(rows))
}

/// Serialise `table` as CSV into memory.
pub fn encode_table(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in table.rows() {
        writer.write_record(row).map_err(SiftError::OutputWrite)?;
    }

    writer
        .into_inner()
        .map_err(|e| SiftError::OutputIo(e.into_error()))
}

/// Write `table` as CSV. Nothing reaches `out` unless encoding succeeds.
pub fn write_table<W: Write>(table: &Table, mut out: W) -> Result<()> {
    let bytes = encode_table(table)?;
    out.write_all(&bytes).map_err(SiftError::OutputIo)?;
    out.flush().map_err(SiftError::OutputIo)
}
