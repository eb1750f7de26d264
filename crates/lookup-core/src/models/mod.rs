//! Data models for the competency dataset.
//!
//! - `ParticipantRecord`, `CompetencyValue`: one row and its cells
//! - `Dataset`: the records loaded for a session
//! - `SummaryMode`, `SelectionMode`: the user's choices

pub mod dataset;
pub mod mode;
pub mod participant;

pub use dataset::Dataset;
pub use mode::{ParseSummaryModeError, SelectionMode, SummaryMode};
pub use participant::{CompetencyValue, ParticipantRecord, PARTICIPANT_KEY};
