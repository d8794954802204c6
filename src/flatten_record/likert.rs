use {
    serde_json::{Number, Value},
    std::borrow::Cow,
};

/// Best-effort numeric coercion of a survey answer.
///
/// Numbers and non-string values pass through. Strings are parsed as an
/// integer, then as a float; when neither works (or the float is not
/// representable in JSON) the original string is kept. Single underscores
/// between digits group them (`"1_000"` is 1000).
pub fn likert_value(value: &Value) -> Value {
    match value {
        Value::String(raw) => parsed_number(raw).unwrap_or_else(|| value.clone()),
        other => other.clone(),
    }
}

/// Drops `_` digit separators. `None` when an underscore does not sit between
/// two digits.
fn without_digit_separators(raw: &str) -> Option<Cow<'_, str>> {
    if !raw.contains('_') {
        return Some(Cow::Borrowed(raw));
    }
    let bytes = raw.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, byte)| **byte == b'_')
        .all(|(idx, _)| {
            idx > 0
                && bytes[idx - 1].is_ascii_digit()
                && bytes.get(idx + 1).is_some_and(u8::is_ascii_digit)
        })
        .then(|| Cow::Owned(raw.replace('_', "")))
}

fn parsed_number(raw: &str) -> Option<Value> {
    let raw = without_digit_separators(raw.trim())?;
    let raw: &str = &raw;
    raw.parse::<i64>()
        .map(Value::from)
        .or_else(|_| raw.parse::<u64>().map(Value::from))
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        })
}
