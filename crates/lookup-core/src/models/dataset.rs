use chrono::{DateTime, Utc};

use super::ParticipantRecord;

/// The participant records for one session, as returned by the provider.
///
/// Never mutated after load; extraction and summaries are re-derived from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<ParticipantRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(records: Vec<ParticipantRecord>) -> Self {
        Self {
            records,
            fetched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn age_display(&self) -> String {
        self.age_display_at(Utc::now())
    }

    pub fn age_display_at(&self, now: DateTime<Utc>) -> String {
        let minutes = (now - self.fetched_at).num_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fetched_minutes_ago(minutes: i64) -> (Dataset, DateTime<Utc>) {
        let dataset = Dataset::default();
        let now = dataset.fetched_at + Duration::minutes(minutes);
        (dataset, now)
    }

    #[test]
    fn test_age_display() {
        let cases = [
            (-5, "just now"),
            (0, "just now"),
            (5, "5m ago"),
            (59, "59m ago"),
            (60, "1h ago"),
            (89, "1h ago"),
            (90, "2h ago"),
            (1440, "1d ago"),
            (1440 + 12 * 60, "2d ago"),
        ];
        for (minutes, expected) in cases {
            let (dataset, now) = fetched_minutes_ago(minutes);
            assert_eq!(dataset.age_display_at(now), expected, "minutes = {}", minutes);
        }
    }

    #[test]
    fn test_len() {
        let dataset = Dataset::new(vec![
            ParticipantRecord::new("Alice"),
            ParticipantRecord::new("Bob"),
        ]);
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
        assert!(Dataset::default().is_empty());
    }
}
