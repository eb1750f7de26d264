//! Selection state for a lookup or summary request.
//!
//! `LookupForm` holds what the user has chosen so far and the last output.
//! Switching between participant and summary mode clears every dependent
//! field, so a stale participant can never leak into a summary request.

use thiserror::Error;
use tracing::debug;

use crate::analysis::{competency_values, lookup, summarize};
use crate::models::{ParticipantRecord, SelectionMode, SummaryMode};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Select a competency and a participant first")]
    MissingParticipant,

    #[error("Select a competency and a summary method first")]
    MissingSummaryMode,
}

/// Text shown in the output area, and whether a value was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub text: String,
    pub found: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupForm {
    mode: SelectionMode,
    competency: Option<String>,
    participant: Option<String>,
    summary_mode: Option<SummaryMode>,
    output: Option<Outcome>,
}

impl LookupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn competency(&self) -> Option<&str> {
        self.competency.as_deref()
    }

    pub fn participant(&self) -> Option<&str> {
        self.participant.as_deref()
    }

    pub fn summary_mode(&self) -> Option<SummaryMode> {
        self.summary_mode
    }

    pub fn output(&self) -> Option<&Outcome> {
        self.output.as_ref()
    }

    /// Switch modes. Selecting the current mode changes nothing.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        debug!(from = ?self.mode, to = ?mode, "Switching selection mode");
        *self = Self {
            mode,
            ..Self::default()
        };
    }

    pub fn select_competency(&mut self, competency: impl Into<String>) {
        self.competency = Some(competency.into());
    }

    pub fn select_participant(&mut self, participant: impl Into<String>) {
        self.participant = Some(participant.into());
    }

    pub fn select_summary_mode(&mut self, mode: SummaryMode) {
        self.summary_mode = Some(mode);
    }

    /// Reset everything, keeping the current mode.
    pub fn clear(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::default()
        };
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> Result<(), FormError> {
        match self.mode {
            SelectionMode::Participant if self.competency.is_none() || self.participant.is_none() => {
                Err(FormError::MissingParticipant)
            }
            SelectionMode::Summary if self.competency.is_none() || self.summary_mode.is_none() => {
                Err(FormError::MissingSummaryMode)
            }
            _ => Ok(()),
        }
    }

    /// Compute the output for the current selections.
    ///
    /// Identical resubmissions recompute the same output.
    pub fn submit(&mut self, records: &[ParticipantRecord]) -> Result<&Outcome, FormError> {
        self.validate()?;

        let competency = self.competency.as_deref().unwrap_or_default();
        let outcome = match (self.mode, self.participant.as_deref(), self.summary_mode) {
            (SelectionMode::Participant, Some(participant), _) => {
                let result = lookup(records, participant, competency);
                Outcome {
                    found: result.is_scored(),
                    text: result.to_string(),
                }
            }
            (SelectionMode::Summary, _, Some(mode)) => {
                let values = competency_values(records, competency);
                let summary = summarize(&values, competency, mode);
                Outcome {
                    found: summary.is_computed(),
                    text: summary.to_string(),
                }
            }
            // validate() rules out the remaining combinations
            (SelectionMode::Participant, None, _) => return Err(FormError::MissingParticipant),
            (SelectionMode::Summary, _, None) => return Err(FormError::MissingSummaryMode),
        };

        debug!(text = %outcome.text, found = outcome.found, "Form submitted");
        Ok(&*self.output.insert(outcome))
    }
}
