use {
    super::{Error, Result, create},
    serde::Serialize,
    std::{io::Write, path::Path},
    tracing::instrument,
};

/// Writes the rows as a 2-space indented JSON array. Non-ASCII text is
/// written as is.
pub fn write_json_rows<W, T>(writer: W, rows: &[T]) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(writer, rows).map_err(Error::SerializingJson)
}

#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn export_json<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = create(path)?;
    write_json_rows(&mut writer, rows)?;
    writer.flush().map_err(Error::Flushing)
}
