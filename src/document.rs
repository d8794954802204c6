use {
    crate::flatten_record::{Row, boxed_iter, participant::participant_rows},
    serde_json::{Map, Value},
    std::{
        iter::empty,
        path::{Path, PathBuf},
    },
    tap::{Pipe, Tap},
    tracing::instrument,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reading input document '{}'", path.display())]
    Reading {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parsing input document '{}' as JSON", path.display())]
    Parsing {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

type Result<T> = std::result::Result<T, self::Error>;

/// Exports may wrap the participant collection as `{"data": ...}`.
pub const ENVELOPE_KEY: &str = "data";

pub fn participant_collection(document: &Value) -> &Value {
    match document {
        Value::Object(map) => map.get(ENVELOPE_KEY).unwrap_or(document),
        other => other,
    }
}

/// Participant records of a collection in document order. Mapping collections
/// are keyed by opaque ids which are ignored; entries that are not records
/// are skipped, as is any collection that is neither a mapping nor a list.
pub fn participant_records(collection: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    match collection {
        Value::Object(by_id) => by_id.values().pipe(boxed_iter),
        Value::Array(list) => list.iter().pipe(boxed_iter),
        other => {
            tracing::debug!(kind = value_kind(other), "no participant collection found");
            empty().pipe(boxed_iter)
        }
    }
    .filter_map(Value::as_object)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Flattens every participant of an export, concatenating rows in the order
/// participants appear.
pub fn document_rows(document: &Value) -> Vec<Row> {
    document
        .pipe(participant_collection)
        .pipe(participant_records)
        .flat_map(participant_rows)
        .collect()
}

#[instrument]
pub fn read_document(path: &Path) -> Result<Value> {
    std::fs::read(path)
        .map_err(|source| self::Error::Reading {
            path: path.to_owned(),
            source,
        })
        .and_then(|bytes| {
            serde_json::from_slice(&bytes).map_err(|source| self::Error::Parsing {
                path: path.to_owned(),
                source,
            })
        })
}

/// Reads an export from disk and flattens it.
#[instrument]
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    read_document(path)
        .map(|document| document_rows(&document))
        .map(|rows| rows.tap(|rows| tracing::info!(rows = rows.len(), "flattened export")))
}
