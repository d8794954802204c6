use {
    super::{
        RecordFieldsExt, Row, SURVEY_PREFIX, SURVEY_PROMPT, SURVEY_QUESTION_NUMBER, SURVEY_STATE,
        UNKNOWN, field, fields_of, keystrokes::joined_keystrokes, likert::likert_value,
    },
    serde_json::{Map, Value},
    tap::Tap,
    tracing::instrument,
};

const SESSIONS: &str = "sessions";
const LEGACY_SESSIONS: [&str; 2] = ["session_1", "session_2"];

const CONDITION: &str = "condition";
const USER_RESPONSES: &str = "user_responses";
const SURVEY_RESPONSES: &str = "survey_responses";

const STATE: &str = "state";
const USER_RESPONSE: &str = "user_response";
const TIMING: &str = "timing";
const TIME_TO_FIRST_KEYSTROKE_MS: &str = "time_to_first_keystroke_ms";
const INPUT_LATENCY_MS: &str = "input_latency_ms";

/// All session records of a participant, whichever shape they were exported
/// in: a `sessions` list when there is one, otherwise `session_1` and
/// `session_2` (the ones present, in that order).
pub fn session_records(participant: &Map<String, Value>) -> Vec<&Value> {
    match participant.get(SESSIONS) {
        Some(Value::Array(sessions)) => sessions.iter().collect(),
        _ => LEGACY_SESSIONS
            .iter()
            .filter_map(|key| participant.get(*key))
            .collect(),
    }
}

/// What every row of one session shares.
#[derive(Debug, Clone)]
struct SessionContext<'a> {
    participant_id: &'a Value,
    condition_order: &'a Value,
    condition: Value,
    session_number: Value,
}

impl SessionContext<'_> {
    fn row(&self, question_number: Value) -> Row {
        Row::new().tap_mut(|row| {
            row.insert(field::PARTICIPANT_ID.into(), self.participant_id.clone());
            row.insert(field::CONDITION_ORDER.into(), self.condition_order.clone());
            row.insert(field::TEST_CONDITION.into(), self.condition.clone());
            row.insert(field::SESSION_NUMBER.into(), self.session_number.clone());
            row.insert(field::QUESTION_NUMBER.into(), question_number);
        })
    }

    fn response_row(&self, question_number: usize, entry: &Map<String, Value>) -> Row {
        let timing = entry.object_field(TIMING);
        let timing_ms = |key: &str| {
            timing
                .and_then(|timing| timing.get(key))
                .cloned()
                .unwrap_or_else(|| Value::from(0))
        };
        self.row(Value::from(question_number)).tap_mut(|row| {
            row.insert(field::QUESTION_STATE.into(), entry.field_or(STATE, UNKNOWN));
            row.insert(field::BOT_PROMPT.into(), entry.field_or(field::BOT_PROMPT, ""));
            row.insert(
                field::TIME_TO_FIRST_KEYSTROKE_MS.into(),
                timing_ms(TIME_TO_FIRST_KEYSTROKE_MS),
            );
            row.insert(field::TOTAL_INPUT_DURATION_MS.into(), timing_ms(INPUT_LATENCY_MS));
            row.insert(
                field::KEYSTROKE_SEQUENCE.into(),
                joined_keystrokes(entry.array_field(field::KEYSTROKE_SEQUENCE)).into(),
            );
            row.insert(field::SUBMITTED_ANSWER.into(), entry.field_or(USER_RESPONSE, ""));
        })
    }

    fn survey_row(&self, survey: &Map<String, Value>) -> Row {
        self.row(SURVEY_QUESTION_NUMBER.into()).tap_mut(|row| {
            row.insert(field::QUESTION_STATE.into(), SURVEY_STATE.into());
            row.insert(field::BOT_PROMPT.into(), SURVEY_PROMPT.into());
            [
                field::TIME_TO_FIRST_KEYSTROKE_MS,
                field::TOTAL_INPUT_DURATION_MS,
                field::KEYSTROKE_SEQUENCE,
                field::SUBMITTED_ANSWER,
            ]
            .into_iter()
            .for_each(|blank| {
                row.insert(blank.into(), "".into());
            });
            survey.iter().for_each(|(key, answer)| {
                row.insert(format!("{SURVEY_PREFIX}{key}"), likert_value(answer));
            });
        })
    }
}

fn session_rows(
    participant_id: &Value,
    condition_order: &Value,
    session: &Map<String, Value>,
) -> Vec<Row> {
    let context = SessionContext {
        participant_id,
        condition_order,
        condition: session.field_or(CONDITION, UNKNOWN),
        session_number: session.field_or(field::SESSION_NUMBER, 0),
    };
    session
        .array_field(USER_RESPONSES)
        .iter()
        .map(fields_of)
        .enumerate()
        .map(|(idx, entry)| context.response_row(idx + 1, &entry))
        .chain(
            session
                .object_field(SURVEY_RESPONSES)
                .filter(|survey| !survey.is_empty())
                .map(|survey| context.survey_row(survey)),
        )
        .collect()
}

/// Flattens one participant into rows: every answered question of every
/// session, each session followed by its survey row when it has one.
#[instrument(level = "trace", skip_all, fields(participant_id = ?participant.get(field::PARTICIPANT_ID)))]
pub fn participant_rows(participant: &Map<String, Value>) -> Vec<Row> {
    let participant_id = participant.field_or(field::PARTICIPANT_ID, UNKNOWN);
    let condition_order = participant.field_or(field::CONDITION_ORDER, UNKNOWN);
    session_records(participant)
        .into_iter()
        .map(fields_of)
        .flat_map(|session| session_rows(&participant_id, &condition_order, &session))
        .collect::<Vec<_>>()
        .tap(|rows| tracing::trace!(rows = rows.len(), "flattened participant"))
}
