//! Letter grade scale used to compare grades with numeric scores.

/// Grade letters and their scores, in declaration order. A is best.
pub const LETTER_SCALE: [(&str, i64); 5] = [("A", 5), ("B", 4), ("C", 3), ("D", 2), ("E", 1)];

/// Score for a grade letter, case-insensitive. Anything other than a
/// single scale letter yields None.
pub fn score_for_level(level: &str) -> Option<i64> {
    let upper = level.to_uppercase();
    LETTER_SCALE
        .iter()
        .find(|(letter, _)| *letter == upper)
        .map(|(_, score)| *score)
}

/// First letter in declaration order whose score equals `score`.
pub fn level_for_score(score: i64) -> Option<&'static str> {
    LETTER_SCALE
        .iter()
        .find(|(_, value)| *value == score)
        .map(|(letter, _)| *letter)
}
