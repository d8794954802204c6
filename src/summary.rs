use {
    crate::flatten_record::{Row, field},
    itertools::Itertools,
    std::fmt,
};

/// Totals reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub unique_participants: usize,
    pub total_entries: usize,
}

impl Summary {
    /// Participant ids are compared as JSON values, so `1` and `"1"` count twice.
    pub fn of(rows: &[Row]) -> Self {
        Self {
            unique_participants: rows
                .iter()
                .filter_map(|row| row.get(field::PARTICIPANT_ID))
                .map(|id| id.to_string())
                .unique()
                .count(),
            total_entries: rows.len(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  - Unique participants: {}", self.unique_participants)?;
        write!(f, "  - Total entries: {}", self.total_entries)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn test_counts_unique_participants() {
        let rows: Vec<Row> = serde_json::from_value(json!([
            {"participant_id": "A"},
            {"participant_id": "B"},
            {"participant_id": "A"},
            {"participant_id": 1},
            {"participant_id": "1"}
        ]))
        .expect("rows");
        let summary = Summary::of(&rows);
        assert_eq!(
            summary,
            Summary {
                unique_participants: 4,
                total_entries: 5
            }
        );
        assert_eq!(
            summary.to_string(),
            "Summary:\n  - Unique participants: 4\n  - Total entries: 5"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            Summary::of(&[]),
            Summary {
                unique_participants: 0,
                total_entries: 0
            }
        );
    }
}
