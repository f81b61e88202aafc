use std::collections::BTreeMap;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Total-ordered score threshold used as a table key
pub type Threshold = OrderedFloat<f64>;

/// Truth category of a benchmark read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Read simulated from the reference genome
    Ref,
    /// Read simulated from a contaminant genome; the positive class
    Contam,
}

impl Category {
    /// Column label used in count tables
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ref => "REF",
            Self::Contam => "CONTAM",
        }
    }

    /// Parse a column label (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "REF" => Some(Self::Ref),
            "CONTAM" => Some(Self::Contam),
            _ => None,
        }
    }

    /// Category labels in sorted (column) order
    #[must_use]
    pub fn sorted_labels() -> [&'static str; 2] {
        let mut labels = [Self::Ref.label(), Self::Contam.label()];
        labels.sort_unstable();
        labels
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Read counts observed at a single threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub ref_count: u64,
    pub contam_count: u64,
}

impl CategoryCounts {
    #[must_use]
    pub fn new(ref_count: u64, contam_count: u64) -> Self {
        Self {
            ref_count,
            contam_count,
        }
    }

    #[must_use]
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Ref => self.ref_count,
            Category::Contam => self.contam_count,
        }
    }

    /// Add `n` reads of `category`, saturating at `u64::MAX`
    pub fn add(&mut self, category: Category, n: u64) {
        let count = match category {
            Category::Ref => &mut self.ref_count,
            Category::Contam => &mut self.contam_count,
        };
        *count = count.saturating_add(n);
    }

    /// Reads of both categories, saturating at `u64::MAX`
    #[must_use]
    pub fn total(&self) -> u64 {
        self.ref_count.saturating_add(self.contam_count)
    }
}

/// Per-threshold read counts for one benchmark run, ordered by threshold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdCounts {
    counts: BTreeMap<Threshold, CategoryCounts>,
}

impl ThresholdCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one read of `category` at `threshold`
    pub fn record(&mut self, threshold: f64, category: Category) {
        self.add(threshold, category, 1);
    }

    pub fn add(&mut self, threshold: f64, category: Category, n: u64) {
        self.counts
            .entry(OrderedFloat(threshold))
            .or_default()
            .add(category, n);
    }

    /// Set the counts at `threshold`, replacing any existing entry
    pub fn insert(&mut self, threshold: f64, counts: CategoryCounts) {
        self.counts.insert(OrderedFloat(threshold), counts);
    }

    #[must_use]
    pub fn get(&self, threshold: f64) -> Option<&CategoryCounts> {
        self.counts.get(&OrderedFloat(threshold))
    }

    /// Summed counts over every threshold, saturating at `u64::MAX`
    #[must_use]
    pub fn totals(&self) -> CategoryCounts {
        self.counts
            .values()
            .fold(CategoryCounts::default(), |mut acc, c| {
                acc.add(Category::Ref, c.ref_count);
                acc.add(Category::Contam, c.contam_count);
                acc
            })
    }

    /// Entries in ascending threshold order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (f64, &CategoryCounts)> {
        self.counts.iter().map(|(t, c)| (t.into_inner(), c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(f64, CategoryCounts)> for ThresholdCounts {
    fn from_iter<I: IntoIterator<Item = (f64, CategoryCounts)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (threshold, c) in iter {
            counts.insert(threshold, c);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_totals() {
        let mut counts = ThresholdCounts::new();
        counts.record(3.0, Category::Ref);
        counts.record(3.0, Category::Contam);
        counts.record(-5.0, Category::Contam);
        counts.add(10.0, Category::Ref, 4);

        assert_eq!(counts.len(), 3);
        assert_eq!(counts.get(3.0), Some(&CategoryCounts::new(1, 1)));
        assert_eq!(counts.totals(), CategoryCounts::new(5, 2));
    }

    #[test]
    fn test_sums_saturate() {
        let mut counts = ThresholdCounts::new();
        counts.add(0.0, Category::Contam, u64::MAX);
        counts.record(0.0, Category::Contam);
        counts.add(1.0, Category::Contam, 1);
        counts.add(1.0, Category::Ref, u64::MAX);

        assert_eq!(counts.get(0.0), Some(&CategoryCounts::new(0, u64::MAX)));
        assert_eq!(counts.totals(), CategoryCounts::new(u64::MAX, u64::MAX));
        assert_eq!(counts.totals().total(), u64::MAX);
    }

    #[test]
    fn test_iter_is_ascending() {
        let counts: ThresholdCounts = [
            (2.0, CategoryCounts::new(1, 0)),
            (-1.5, CategoryCounts::new(0, 1)),
            (0.0, CategoryCounts::new(1, 1)),
        ]
        .into_iter()
        .collect();
        let thresholds: Vec<f64> = counts.iter().map(|(t, _)| t).collect();
        assert_eq!(thresholds, vec![-1.5, 0.0, 2.0]);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::sorted_labels(), ["CONTAM", "REF"]);
        assert_eq!(Category::parse("contam"), Some(Category::Contam));
        assert_eq!(Category::parse(" REF "), Some(Category::Ref));
        assert_eq!(Category::parse("OTHER"), None);
    }
}
