use std::fmt;

use crate::models::{CompetencyValue, ParticipantRecord};

/// Outcome of looking up one participant's value for one competency.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Scored {
        participant: String,
        competency: String,
        value: CompetencyValue,
    },
    NoScore {
        participant: String,
        competency: String,
    },
    UnknownParticipant {
        participant: String,
    },
}

impl LookupResult {
    pub fn is_scored(&self) -> bool {
        matches!(self, LookupResult::Scored { .. })
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupResult::Scored {
                participant,
                competency,
                value,
            } => write!(f, "{} scored {} on {}", participant, value, competency),
            LookupResult::NoScore {
                participant,
                competency,
            } => write!(f, "{} has no score for {}", participant, competency),
            LookupResult::UnknownParticipant { participant } => {
                write!(f, "No participant named {}", participant)
            }
        }
    }
}

/// Look up a participant's value for a competency.
///
/// Matches the first record whose name equals `participant` exactly.
/// A score of zero counts as a recorded score.
pub fn lookup(records: &[ParticipantRecord], participant: &str, competency: &str) -> LookupResult {
    let Some(record) = records.iter().find(|r| r.name() == participant) else {
        return LookupResult::UnknownParticipant {
            participant: participant.to_string(),
        };
    };

    match record.value(competency) {
        Some(value) => LookupResult::Scored {
            participant: record.name().to_string(),
            competency: competency.to_string(),
            value: value.clone(),
        },
        None => LookupResult::NoScore {
            participant: record.name().to_string(),
            competency: competency.to_string(),
        },
    }
}
