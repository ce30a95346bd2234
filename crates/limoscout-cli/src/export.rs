//! CSV output for collected rows.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use limoscout_places::PlaceRow;

/// Serializes `rows` as CSV (header first) into `writer`.
///
/// The header comes from `PlaceRow`'s field names. Nothing is written for an
/// empty slice. Returns the number of data rows written.
pub(crate) fn write_rows<W: Write>(writer: W, rows: &[PlaceRow]) -> anyhow::Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("serialize row for {}", row.google_id))?;
    }
    wtr.flush().context("flush csv writer")?;
    Ok(rows.len())
}

/// Writes `rows` to `path`. No file is created when `rows` is empty.
pub(crate) fn write_csv(path: &Path, rows: &[PlaceRow]) -> anyhow::Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_rows(file, rows).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
