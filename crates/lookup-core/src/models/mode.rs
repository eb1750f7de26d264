use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which aggregate the summary engine computes for a competency column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    Lowest,
    Highest,
    Average,
    Type,
}

impl SummaryMode {
    /// All modes in selector order.
    pub const ALL: [SummaryMode; 4] = [
        SummaryMode::Lowest,
        SummaryMode::Highest,
        SummaryMode::Average,
        SummaryMode::Type,
    ];

    /// Lower-case word used inside output sentences.
    pub fn word(&self) -> &'static str {
        match self {
            SummaryMode::Lowest => "lowest",
            SummaryMode::Highest => "highest",
            SummaryMode::Average => "average",
            SummaryMode::Type => "type",
        }
    }

    /// Title-case label for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            SummaryMode::Lowest => "Lowest",
            SummaryMode::Highest => "Highest",
            SummaryMode::Average => "Average",
            SummaryMode::Type => "Type",
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown summary mode: {0}")]
pub struct ParseSummaryModeError(pub String);

impl FromStr for SummaryMode {
    type Err = ParseSummaryModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lowest" => Ok(SummaryMode::Lowest),
            "highest" => Ok(SummaryMode::Highest),
            "average" => Ok(SummaryMode::Average),
            "type" => Ok(SummaryMode::Type),
            _ => Err(ParseSummaryModeError(s.to_string())),
        }
    }
}

/// Top-level form mode: look up one participant, or summarize a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Participant,
    Summary,
}
