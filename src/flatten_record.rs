use {
    serde_json::{Map, Value},
    std::borrow::Cow,
};

/// One flattened, export-ready record: either a single answered question or a
/// session's survey block. Field order is insertion order.
pub type Row = Map<String, Value>;

pub const UNKNOWN: &str = "unknown";
pub const SURVEY_PREFIX: &str = "survey_";
pub const SURVEY_QUESTION_NUMBER: &str = "SURVEY";
pub const SURVEY_STATE: &str = "post_survey";
pub const SURVEY_PROMPT: &str = "Post-Experiment Survey";

/// Names of the fields every row carries.
pub mod field {
    pub const PARTICIPANT_ID: &str = "participant_id";
    pub const CONDITION_ORDER: &str = "condition_order";
    pub const TEST_CONDITION: &str = "test_condition";
    pub const SESSION_NUMBER: &str = "session_number";
    pub const QUESTION_NUMBER: &str = "question_number";
    pub const QUESTION_STATE: &str = "question_state";
    pub const BOT_PROMPT: &str = "bot_prompt";
    pub const TIME_TO_FIRST_KEYSTROKE_MS: &str = "time_to_first_keystroke_ms";
    pub const TOTAL_INPUT_DURATION_MS: &str = "total_input_duration_ms";
    pub const KEYSTROKE_SEQUENCE: &str = "keystroke_sequence";
    pub const SUBMITTED_ANSWER: &str = "submitted_answer";
}

/// Columns that lead a CSV export, in this order. `bot_prompt` is
/// not among them and sorts with the remaining columns.
pub const PRIORITY_FIELDS: [&str; 10] = [
    field::PARTICIPANT_ID,
    field::CONDITION_ORDER,
    field::TEST_CONDITION,
    field::SESSION_NUMBER,
    field::QUESTION_NUMBER,
    field::QUESTION_STATE,
    field::TIME_TO_FIRST_KEYSTROKE_MS,
    field::TOTAL_INPUT_DURATION_MS,
    field::KEYSTROKE_SEQUENCE,
    field::SUBMITTED_ANSWER,
];

/// Lenient accessors over raw export records. Absent fields fall back to a
/// default, containers of the wrong shape read as empty.
#[extension_traits::extension(pub trait RecordFieldsExt)]
impl Map<String, Value> {
    fn field_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.get(key).cloned().unwrap_or_else(|| default.into())
    }

    fn object_field(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    fn array_field(&self, key: &str) -> &[Value] {
        match self.get(key) {
            Some(Value::Array(values)) => values.as_slice(),
            _ => &[],
        }
    }
}

/// Views any value as a record; anything that is not a mapping reads as an
/// empty one.
pub fn fields_of(value: &Value) -> Cow<'_, Map<String, Value>> {
    match value {
        Value::Object(map) => Cow::Borrowed(map),
        _ => Cow::Owned(Map::new()),
    }
}

pub fn boxed_iter<'a, T, I>(iter: I) -> Box<dyn Iterator<Item = T> + 'a>
where
    T: 'a,
    I: Iterator<Item = T> + 'a,
{
    Box::new(iter)
}

pub mod keystrokes;
pub mod likert;
pub mod participant;

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_field_or_only_defaults_when_absent() {
        let map = record(json!({"present": null, "number": 7}));
        assert_eq!(map.field_or("present", UNKNOWN), Value::Null);
        assert_eq!(map.field_or("number", 0), json!(7));
        assert_eq!(map.field_or("missing", UNKNOWN), json!("unknown"));
    }

    #[test]
    fn test_wrong_shaped_containers_read_as_empty() {
        let map = record(json!({"list": "not a list", "map": [1, 2]}));
        assert!(map.array_field("list").is_empty());
        assert!(map.array_field("missing").is_empty());
        assert!(map.object_field("map").is_none());
        assert!(fields_of(&json!("scalar")).is_empty());
        assert_eq!(fields_of(&json!({"a": 1})).len(), 1);
    }
}
