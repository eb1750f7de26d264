use std::collections::HashSet;

use crate::models::{CompetencyValue, ParticipantRecord};

/// Unique competency names across all records, in first-seen order.
pub fn extract_competencies(records: &[ParticipantRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .flat_map(|record| record.competency_keys())
        .filter(|key| seen.insert(*key))
        .map(str::to_string)
        .collect()
}

/// Participant names in dataset order, first occurrence kept.
pub fn participant_names(records: &[ParticipantRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|record| record.name())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Recorded values of one competency across all participants. Participants
/// without a value for it are skipped.
pub fn competency_values<'a>(
    records: &'a [ParticipantRecord],
    competency: &str,
) -> Vec<&'a CompetencyValue> {
    records
        .iter()
        .filter_map(|record| record.value(competency))
        .collect()
}
