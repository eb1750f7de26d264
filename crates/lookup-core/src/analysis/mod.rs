//! Pure analysis over a loaded dataset.
//!
//! - `extract`: competency and participant lists for the selectors
//! - `lookup`: one participant's value for one competency
//! - `summary`: lowest/highest/average/type across all participants
//! - `scale`: the letter grade scale

pub mod extract;
pub mod lookup;
pub mod scale;
pub mod summary;

pub use extract::{competency_values, extract_competencies, participant_names};
pub use lookup::{lookup, LookupResult};
pub use scale::{level_for_score, score_for_level, LETTER_SCALE};
pub use summary::{summarize, summarize_named, Summary, SummaryValue, ValueKind, INVALID_DATA};
