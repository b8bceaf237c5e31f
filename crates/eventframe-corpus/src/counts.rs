//! Label distribution

use crate::record::CorpusRecord;
use eventframe_domain::Label;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Number of records per label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    counts: BTreeMap<Label, usize>,
    unlabeled: usize,
}

impl LabelCounts {
    /// Empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribution of a record list
    pub fn from_records(records: &[CorpusRecord]) -> Self {
        let mut counts = Self::new();
        for record in records {
            match record.label {
                Some(label) => counts.record(label),
                None => counts.unlabeled += 1,
            }
        }
        counts
    }

    /// Count one more record with `label`
    pub fn record(&mut self, label: Label) {
        *self.counts.entry(label).or_insert(0) += 1;
    }

    /// Count of one label
    pub fn get(&self, label: Label) -> usize {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Records without a label
    pub fn unlabeled(&self) -> usize {
        self.unlabeled
    }

    /// Total number of labeled records
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Records labeled with anything but `NO_EVENT`
    pub fn events(&self) -> usize {
        self.total() - self.get(Label::NoEvent)
    }

    /// Labels with non-zero counts, most frequent first (ties in label order)
    pub fn most_common(&self) -> Vec<(Label, usize)> {
        let mut entries: Vec<(Label, usize)> = self
            .counts
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&label, &count)| (label, count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }

    /// Multi-line human-readable report
    pub fn summary(&self) -> String {
        let total = self.total();
        let mut lines = vec![format!("Total: {} records", total)];
        for (label, count) in self.most_common() {
            let share = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            lines.push(format!("  {:<10} {:>6} ({:.1}%)", label.as_str(), count, share));
        }
        if self.unlabeled > 0 {
            lines.push(format!("  {:<10} {:>6}", "unlabeled", self.unlabeled));
        }
        lines.join("\n")
    }
}

impl fmt::Display for LabelCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .most_common()
            .into_iter()
            .map(|(label, count)| format!("{}={}", label, count))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> LabelCounts {
        let mut counts = LabelCounts::new();
        for label in [
            Label::Crime,
            Label::NoEvent,
            Label::NoEvent,
            Label::Accident,
            Label::Crime,
            Label::ErrorApi,
            Label::NoEvent,
        ] {
            counts.record(label);
        }
        counts
    }

    #[test]
    fn test_totals() {
        let counts = counts();
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.events(), 4);
        assert_eq!(counts.get(Label::Politics), 0);
    }

    #[test]
    fn test_most_common_order() {
        assert_eq!(
            counts().most_common(),
            vec![
                (Label::NoEvent, 3),
                (Label::Crime, 2),
                (Label::Accident, 1),
                (Label::ErrorApi, 1),
            ]
        );
    }

    #[test]
    fn test_from_records_counts_unlabeled() {
        let records = vec![
            CorpusRecord::labeled("a", Label::Business),
            CorpusRecord::new("b"),
        ];
        let counts = LabelCounts::from_records(&records);
        assert_eq!(counts.total(), 1);
        assert_eq!(counts.unlabeled(), 1);
        assert!(counts.summary().contains("unlabeled"));
    }

    #[test]
    fn test_summary_and_display() {
        let counts = counts();
        let summary = counts.summary();
        assert!(summary.starts_with("Total: 7 records"));
        assert!(summary.contains("NO_EVENT"));
        assert_eq!(
            counts.to_string(),
            "{NO_EVENT=3, CRIME=2, ACCIDENT=1, ERROR_API=1}"
        );
    }
}
