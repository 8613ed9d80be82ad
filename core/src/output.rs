//! CSV output for report rows.

use crate::error::ReportResult;
use serde::{Serialize, Serializer};
use std::io::Write;

/// Booleans as `True`/`False`, the spelling existing report consumers expect.
pub fn title_case_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

/// Write `header` followed by one record per row. Returns the number of
/// data rows written. Nulls serialise as empty fields.
pub fn write_rows<T: Serialize>(
    header: &[&str],
    rows: &[T],
    writer: impl Write,
) -> ReportResult<usize> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(header)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(rows.len())
}
