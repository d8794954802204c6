use {
    std::{
        fs::File,
        io::BufWriter,
        path::{Path, PathBuf},
    },
    tap::Pipe,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Creating output file '{}'", path.display())]
    Creating {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serializing rows as JSON")]
    SerializingJson(#[source] serde_json::Error),
    #[error("Could not write headers")]
    WritingHeaders(#[source] csv::Error),
    #[error("Writing record #{idx}")]
    WritingRecord {
        idx: usize,
        #[source]
        source: csv::Error,
    },
    #[error("Flushing output")]
    Flushing(#[source] std::io::Error),
}

type Result<T> = std::result::Result<T, self::Error>;

const JSON_EXT: &str = ".json";
const PROCESSED_JSON_SUFFIX: &str = "_processed.json";
const CSV_EXT: &str = ".csv";

/// Replaces every `.json` in the path, or appends the replacement when there
/// is none so an output never lands on its source.
fn with_json_replaced(path: &Path, replacement: &str) -> PathBuf {
    let raw = path.to_string_lossy();
    match raw.contains(JSON_EXT) {
        true => raw.replace(JSON_EXT, replacement),
        false => format!("{raw}{replacement}"),
    }
    .pipe(PathBuf::from)
}

/// `sessions.json` -> `sessions_processed.json`
pub fn default_json_output(input: &Path) -> PathBuf {
    with_json_replaced(input, PROCESSED_JSON_SUFFIX)
}

/// `sessions_processed.json` -> `sessions_processed.csv`
pub fn csv_output(json_output: &Path) -> PathBuf {
    with_json_replaced(json_output, CSV_EXT)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| self::Error::Creating {
            path: path.to_owned(),
            source,
        })
}

pub mod write_csv;
pub mod write_json;

pub use {
    write_csv::{CsvExport, csv_headers, export_csv, write_csv_rows},
    write_json::{export_json, write_json_rows},
};
