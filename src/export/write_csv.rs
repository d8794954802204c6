use {
    super::{Error, Result, create},
    crate::flatten_record::{PRIORITY_FIELDS, Row},
    indexmap::IndexSet,
    serde_json::Value,
    std::{borrow::Cow, io::Write, path::Path},
    tap::Pipe,
    tracing::instrument,
};

/// Outcome of a CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvExport {
    Written { rows: usize, columns: usize },
    /// There were no rows, so no file was created.
    NothingToExport,
}

/// Column order of a CSV export: the priority fields that occur in any row,
/// in canonical order, then every other key in lexicographic order.
pub fn csv_headers<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Vec<String> {
    let mut present = rows
        .into_iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect::<IndexSet<_>>();
    present.sort_unstable();
    PRIORITY_FIELDS
        .iter()
        .filter(|field| present.contains(**field))
        .map(|field| field.to_string())
        .chain(
            present
                .iter()
                .filter(|field| !PRIORITY_FIELDS.contains(*field))
                .map(|field| field.to_string()),
        )
        .collect()
}

fn cell(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(v)) => Cow::Borrowed(v.as_str()),
        Some(Value::Bool(bool)) => bool.to_string().pipe(Cow::Owned),
        Some(Value::Number(number)) => number.to_string().pipe(Cow::Owned),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => nested.to_string().pipe(Cow::Owned),
    }
}

/// Writes rows against a fixed header line; columns a row lacks are left empty.
pub struct RowCsvWriter<W: Write> {
    writer: csv::Writer<W>,
    headers: Vec<String>,
    count: usize,
}

impl<W: Write> RowCsvWriter<W> {
    pub fn new(writer: W, headers: Vec<String>) -> Result<Self> {
        csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer)
            .pipe(|mut writer| {
                writer
                    .write_record(&headers)
                    .map_err(Error::WritingHeaders)
                    .map(|_| Self {
                        writer,
                        headers,
                        count: 0,
                    })
            })
    }

    pub fn serialize(&mut self, row: &Row) -> Result<()> {
        self.count += 1;
        self.headers
            .iter()
            .map(|header| cell(row.get(header)))
            .collect::<Vec<_>>()
            .pipe(|record| {
                self.writer
                    .write_record(record.iter().map(|cell| cell.as_bytes()))
                    .map_err(|source| Error::WritingRecord {
                        idx: self.count,
                        source,
                    })
            })
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(Error::Flushing)
    }
}

/// Writes the header line and every row. Writes nothing when there are no rows.
pub fn write_csv_rows<W: Write>(writer: W, rows: &[Row]) -> Result<CsvExport> {
    if rows.is_empty() {
        return Ok(CsvExport::NothingToExport);
    }
    let headers = csv_headers(rows);
    let columns = headers.len();
    RowCsvWriter::new(writer, headers).and_then(|mut writer| {
        rows.iter()
            .try_for_each(|row| writer.serialize(row))
            .and_then(|()| writer.flush())
            .map(|()| CsvExport::Written {
                rows: writer.count,
                columns,
            })
    })
}

#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn export_csv(path: &Path, rows: &[Row]) -> Result<CsvExport> {
    match rows.is_empty() {
        true => {
            tracing::debug!("no rows to export, skipping CSV");
            Ok(CsvExport::NothingToExport)
        }
        false => create(path).and_then(|writer| write_csv_rows(writer, rows)),
    }
}
