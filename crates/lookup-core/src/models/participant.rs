use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// Column holding the participant's display name. Every record carries it.
pub const PARTICIPANT_KEY: &str = "Participant";

/// A single recorded value for one competency.
///
/// Numeric scores and letter grades live side by side in the same column,
/// so both shapes are kept rather than coerced at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum CompetencyValue {
    Score(f64),
    Level(String),
}

impl CompetencyValue {
    pub fn as_score(&self) -> Option<f64> {
        match self {
            CompetencyValue::Score(score) => Some(*score),
            CompetencyValue::Level(_) => None,
        }
    }

    pub fn as_level(&self) -> Option<&str> {
        match self {
            CompetencyValue::Score(_) => None,
            CompetencyValue::Level(level) => Some(level),
        }
    }
}

impl fmt::Display for CompetencyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display already drops a trailing ".0"
            CompetencyValue::Score(score) => write!(f, "{}", score),
            CompetencyValue::Level(level) => f.write_str(level),
        }
    }
}

/// One row of the dataset: a participant and their competency columns.
///
/// Columns keep the order they appeared in the source document, which is
/// what drives the order of the competency selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantRecord {
    name: String,
    columns: Vec<(String, Option<CompetencyValue>)>,
}

impl ParticipantRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_score(mut self, competency: impl Into<String>, score: f64) -> Self {
        self.set(competency.into(), Some(CompetencyValue::Score(score)));
        self
    }

    pub fn with_level(mut self, competency: impl Into<String>, level: impl Into<String>) -> Self {
        self.set(competency.into(), Some(CompetencyValue::Level(level.into())));
        self
    }

    /// Add a column with no recorded value (a JSON `null`).
    pub fn with_absent(mut self, competency: impl Into<String>) -> Self {
        self.set(competency.into(), None);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Competency column names in document order, excluding the name column.
    pub fn competency_keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(key, _)| key.as_str())
    }

    /// The recorded value for a competency, or None when the column is
    /// missing or holds no value.
    pub fn value(&self, competency: &str) -> Option<&CompetencyValue> {
        self.columns
            .iter()
            .find(|(key, _)| key == competency)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn remove_column(&mut self, key: &str) {
        self.columns.retain(|(existing, _)| existing != key);
    }

    // Duplicate keys keep their first position but take the last value,
    // matching how JSON objects resolve them.
    fn set(&mut self, key: String, value: Option<CompetencyValue>) {
        match self.columns.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((key, value)),
        }
    }
}

// Helper to deserialize a competency cell: number, string, or null.
// Empty strings count as "no value".
struct ColumnValue(Option<CompetencyValue>);

impl<'de> Deserialize<'de> for ColumnValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ColumnValueVisitor;

        impl<'de> Visitor<'de> for ColumnValueVisitor {
            type Value = ColumnValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, a string, or null")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ColumnValue(Some(CompetencyValue::Score(v as f64))))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ColumnValue(Some(CompetencyValue::Score(v as f64))))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ColumnValue(Some(CompetencyValue::Score(v))))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
                if v.is_empty() {
                    Ok(ColumnValue(None))
                } else {
                    Ok(ColumnValue(Some(CompetencyValue::Level(v.to_string()))))
                }
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(ColumnValue(None))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(ColumnValue(None))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(ColumnValueVisitor)
            }
        }

        deserializer.deserialize_any(ColumnValueVisitor)
    }
}

impl<'de> Deserialize<'de> for ParticipantRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = ParticipantRecord;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a participant object with a \"Participant\" name")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut record = ParticipantRecord::default();

                while let Some(key) = map.next_key::<String>()? {
                    if key == PARTICIPANT_KEY {
                        name = Some(map.next_value()?);
                    } else {
                        let ColumnValue(value) = map.next_value()?;
                        record.set(key, value);
                    }
                }

                record.name = name.ok_or_else(|| de::Error::missing_field(PARTICIPANT_KEY))?;
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ParticipantRecord {
        serde_json::from_str(json).expect("Failed to parse participant test JSON")
    }

    #[test]
    fn test_parse_numbers_and_levels() {
        let record = parse(r#"{"Participant": "Alice", "Competency1": "A", "Competency2": 85}"#);

        assert_eq!(record.name(), "Alice");
        assert_eq!(
            record.value("Competency1"),
            Some(&CompetencyValue::Level("A".to_string()))
        );
        assert_eq!(record.value("Competency2"), Some(&CompetencyValue::Score(85.0)));
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let record = parse(r#"{"Zeta": 1, "Participant": "Bob", "Alpha": 2, "Mid": "C"}"#);
        let keys: Vec<&str> = record.competency_keys().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_parse_null_and_empty_are_absent() {
        let record = parse(r#"{"Participant": "Carol", "Writing": null, "Speaking": ""}"#);

        assert_eq!(record.value("Writing"), None);
        assert_eq!(record.value("Speaking"), None);
        // The columns still exist for extraction purposes
        assert_eq!(record.competency_keys().count(), 2);
    }

    #[test]
    fn test_parse_fractional_and_zero_scores() {
        let record = parse(r#"{"Participant": "Dan", "Maths": 4.25, "Art": 0}"#);
        assert_eq!(record.value("Maths").and_then(|v| v.as_score()), Some(4.25));
        assert_eq!(record.value("Art").and_then(|v| v.as_score()), Some(0.0));
    }

    #[test]
    fn test_parse_requires_participant() {
        let result = serde_json::from_str::<ParticipantRecord>(r#"{"Competency1": 3}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<ParticipantRecord>(r#"{"Participant": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unsupported_values() {
        let result = serde_json::from_str::<ParticipantRecord>(
            r#"{"Participant": "Eve", "Flag": true}"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<ParticipantRecord>(
            r#"{"Participant": "Eve", "Nested": {"a": 1}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_key_takes_last_value() {
        let record = parse(r#"{"Participant": "Fay", "X": 1, "X": 2}"#);
        assert_eq!(record.value("X"), Some(&CompetencyValue::Score(2.0)));
        assert_eq!(record.competency_keys().count(), 1);
    }

    #[test]
    fn test_remove_column() {
        let mut record = parse(r#"{"id": "7", "Participant": "Gus", "Listening": "B"}"#);
        record.remove_column("id");
        let keys: Vec<&str> = record.competency_keys().collect();
        assert_eq!(keys, vec!["Listening"]);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(CompetencyValue::Score(85.0).to_string(), "85");
        assert_eq!(CompetencyValue::Score(4.5).to_string(), "4.5");
        assert_eq!(CompetencyValue::Level("b".to_string()).to_string(), "b");
    }

    #[test]
    fn test_builder_matches_parsed() {
        let built = ParticipantRecord::new("Alice")
            .with_level("Competency1", "A")
            .with_score("Competency2", 85.0)
            .with_absent("Competency3");
        let parsed = parse(
            r#"{"Participant": "Alice", "Competency1": "A", "Competency2": 85, "Competency3": null}"#,
        );
        assert_eq!(built, parsed);
    }
}
