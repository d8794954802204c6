use {itertools::Itertools, serde_json::Value, std::borrow::Cow};

pub const KEY_FIELD: &str = "key";

/// Keys are joined without escaping, so a literal `-` key makes the joined
/// sequence ambiguous. Consumers rely on this exact format.
pub const KEY_SEPARATOR: &str = "-";

/// The key a single keystroke event recorded. Missing or null keys are empty,
/// non-string scalars are rendered as JSON text.
pub fn keystroke_key(event: &Value) -> Cow<'_, str> {
    match event.get(KEY_FIELD) {
        Some(Value::String(key)) => Cow::Borrowed(key.as_str()),
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

pub fn joined_keystrokes(events: &[Value]) -> String {
    events.iter().map(keystroke_key).join(KEY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn test_joins_keys_in_order() {
        let events = json!([{"key": "y", "t": 10}, {"key": "e"}, {"key": "s"}]);
        assert_eq!(joined_keystrokes(events.as_array().unwrap()), "y-e-s");
    }

    #[test]
    fn test_empty_sequence_is_empty_string() {
        assert_eq!(joined_keystrokes(&[]), "");
    }

    #[test]
    fn test_missing_keys_leave_empty_slots() {
        let events = json!([{"key": "a"}, {"t": 5}, {"key": null}, "junk", {"key": "b"}]);
        assert_eq!(joined_keystrokes(events.as_array().unwrap()), "a----b");
    }

    #[test]
    fn test_dash_key_is_not_escaped() {
        let events = json!([{"key": "a"}, {"key": "-"}, {"key": "b"}]);
        assert_eq!(joined_keystrokes(events.as_array().unwrap()), "a---b");
    }

    #[test]
    fn test_non_string_keys_render_as_json() {
        let events = json!([{"key": 1}, {"key": true}]);
        assert_eq!(joined_keystrokes(events.as_array().unwrap()), "1-true");
    }
}
