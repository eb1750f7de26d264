//! Summary engine: lowest, highest, average and type of one competency column.
//!
//! A column is classified once as all scores, all levels, or mixed, and every
//! mode branches on that shape. Mixed columns are normalized to numbers via
//! the letter scale before lowest/highest/average are taken.

use std::fmt;

use tracing::debug;

use super::scale::{level_for_score, score_for_level};
use crate::models::{CompetencyValue, SummaryMode};

/// Message used when a summary mode name is not recognized.
pub const INVALID_DATA: &str = "Invalid data";

/// Shape of a competency column, computed once per summary.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnShape<'a> {
    Empty,
    Scores(Vec<f64>),
    Levels(Vec<&'a str>),
    Mixed(Vec<&'a CompetencyValue>),
}

/// Declared type of a column, as reported by the `type` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Score,
    Level,
    Both,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Score => f.write_str("'score'"),
            ValueKind::Level => f.write_str("'level'"),
            ValueKind::Both => f.write_str("both 'level' and 'score'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryValue {
    Score(f64),
    Level(String),
    Kind(ValueKind),
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Score(score) => write!(f, "{}", score),
            SummaryValue::Level(level) => f.write_str(level),
            SummaryValue::Kind(kind) => write!(f, "{}", kind),
        }
    }
}

/// Result of summarizing a column. `Display` renders the user-facing sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Computed {
        mode: SummaryMode,
        competency: String,
        value: SummaryValue,
    },
    NoData(SummaryMode),
    InvalidMode,
}

impl Summary {
    pub fn is_computed(&self) -> bool {
        matches!(self, Summary::Computed { .. })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Computed {
                mode: SummaryMode::Type,
                competency,
                value,
            } => write!(f, "The type of {} is {}", competency, value),
            Summary::Computed {
                mode,
                competency,
                value,
            } => write!(f, "The {} score for {} is {}", mode.word(), competency, value),
            Summary::NoData(SummaryMode::Type) => f.write_str("No valid type found"),
            Summary::NoData(mode) => write!(f, "No valid {} scores found", mode.word()),
            Summary::InvalidMode => f.write_str(INVALID_DATA),
        }
    }
}

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // Avoid printing "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn classify<'a>(values: &[&'a CompetencyValue]) -> ColumnShape<'a> {
    if values.is_empty() {
        return ColumnShape::Empty;
    }

    let scores: Vec<f64> = values.iter().filter_map(|v| v.as_score()).collect();
    if scores.len() == values.len() {
        return ColumnShape::Scores(scores);
    }

    let levels: Vec<&'a str> = values.iter().filter_map(|v| v.as_level()).collect();
    if levels.len() == values.len() {
        return ColumnShape::Levels(levels);
    }

    ColumnShape::Mixed(values.to_vec())
}

/// Convert mixed values to comparable numbers. Scores pass through, levels
/// go through the letter scale, unrecognized levels are dropped.
pub fn normalize(values: &[&CompetencyValue]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|value| match value {
            CompetencyValue::Score(score) => Some(*score),
            CompetencyValue::Level(level) => score_for_level(level).map(|s| s as f64),
        })
        .collect()
}

/// Summarize the recorded values of one competency.
pub fn summarize(values: &[&CompetencyValue], competency: &str, mode: SummaryMode) -> Summary {
    let shape = classify(values);
    debug!(competency, ?mode, count = values.len(), "Summarizing competency");

    let value = match mode {
        SummaryMode::Lowest => lowest(&shape),
        SummaryMode::Highest => highest(&shape),
        SummaryMode::Average => average(&shape),
        SummaryMode::Type => value_kind(&shape).map(SummaryValue::Kind),
    };

    match value {
        Some(value) => Summary::Computed {
            mode,
            competency: competency.to_string(),
            value,
        },
        None => Summary::NoData(mode),
    }
}

/// Like `summarize`, with the mode given by name. Unknown names produce
/// `Summary::InvalidMode`.
pub fn summarize_named(values: &[&CompetencyValue], competency: &str, mode: &str) -> Summary {
    match mode.parse::<SummaryMode>() {
        Ok(mode) => summarize(values, competency, mode),
        Err(e) => {
            debug!(error = %e, "Rejecting summary request");
            Summary::InvalidMode
        }
    }
}

// Letter grades sort so that A (best) is lexicographically first: the lowest
// grade is the greatest string and the highest grade is the least.
fn lowest(shape: &ColumnShape) -> Option<SummaryValue> {
    match shape {
        ColumnShape::Empty => None,
        ColumnShape::Scores(scores) => min(scores).map(score_value),
        ColumnShape::Levels(levels) => levels.iter().max().map(|l| SummaryValue::Level(l.to_string())),
        ColumnShape::Mixed(values) => min(&normalize(values)).map(SummaryValue::Score),
    }
}

fn highest(shape: &ColumnShape) -> Option<SummaryValue> {
    match shape {
        ColumnShape::Empty => None,
        ColumnShape::Scores(scores) => max(scores).map(score_value),
        ColumnShape::Levels(levels) => levels.iter().min().map(|l| SummaryValue::Level(l.to_string())),
        ColumnShape::Mixed(values) => max(&normalize(values)).map(SummaryValue::Score),
    }
}

fn average(shape: &ColumnShape) -> Option<SummaryValue> {
    match shape {
        ColumnShape::Empty => None,
        ColumnShape::Scores(scores) => mean(scores).map(score_value),
        ColumnShape::Levels(levels) => {
            let scores: Vec<f64> = levels
                .iter()
                .filter_map(|level| score_for_level(level))
                .map(|s| s as f64)
                .collect();
            let rounded = mean(&scores)?.round() as i64;
            level_for_score(rounded).map(|letter| SummaryValue::Level(letter.to_string()))
        }
        ColumnShape::Mixed(values) => mean(&normalize(values)).map(score_value),
    }
}

fn value_kind(shape: &ColumnShape) -> Option<ValueKind> {
    match shape {
        ColumnShape::Empty => None,
        ColumnShape::Scores(_) => Some(ValueKind::Score),
        ColumnShape::Levels(_) => Some(ValueKind::Level),
        ColumnShape::Mixed(_) => Some(ValueKind::Both),
    }
}

fn score_value(score: f64) -> SummaryValue {
    SummaryValue::Score(round_one_decimal(score))
}

fn min(scores: &[f64]) -> Option<f64> {
    scores.iter().copied().reduce(f64::min)
}

fn max(scores: &[f64]) -> Option<f64> {
    scores.iter().copied().reduce(f64::max)
}

fn mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}
