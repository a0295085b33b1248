use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A positive label id
pub type LabelId = u64;

/// How many unused ids are listed by name in [`LabelStats`]
pub const UNUSED_SAMPLE_LIMIT: usize = 10;

/// Labels attached to one vector, in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet(Vec<LabelId>);

impl LabelSet {
    /// Callers guarantee the ids are positive and pairwise distinct.
    pub(crate) fn new(labels: Vec<LabelId>) -> Self {
        Self(labels)
    }

    pub fn labels(&self) -> &[LabelId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Number of label sets containing each label id.
///
/// Counts only grow: the table has no way to remove or decrement an entry.
/// Iteration is ascending by label id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<LabelId, u64>,
    sets: u64,
    smallest_set: usize,
    largest_set: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one label set
    pub fn record(&mut self, set: &LabelSet) {
        for &label in set.labels() {
            *self.counts.entry(label).or_insert(0) += 1;
        }

        self.smallest_set = if self.sets == 0 {
            set.len()
        } else {
            self.smallest_set.min(set.len())
        };
        self.largest_set = self.largest_set.max(set.len());
        self.sets += 1;
    }

    /// Frequency of `label`, zero when never seen
    pub fn get(&self, label: LabelId) -> u64 {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Number of distinct label ids
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of label sets recorded
    pub fn sets(&self) -> u64 {
        self.sets
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelId, u64)> + '_ {
        self.counts.iter().map(|(&label, &count)| (label, count))
    }

    /// Adjacent (by id) pairs where the larger id is the more frequent one
    pub fn order_warnings(&self) -> Vec<OrderWarning> {
        let pairs: Vec<(LabelId, u64)> = self.iter().collect();

        pairs
            .windows(2)
            .filter(|w| w[1].1 > w[0].1)
            .map(|w| OrderWarning {
                label: w[1].0,
                frequency: w[1].1,
                previous_label: w[0].0,
                previous_frequency: w[0].1,
            })
            .collect()
    }

    pub fn stats(&self) -> LabelStats {
        let occurrences: u64 = self.counts.values().sum();
        let max_label = self.counts.keys().next_back().copied();

        // every id in [1, max] is either a key or unused
        let unused_labels = max_label.map_or(0, |max| max - self.counts.len() as u64);
        let first_unused = self.first_unused(UNUSED_SAMPLE_LIMIT);

        let mean_labels_per_set = if self.sets == 0 {
            0.0
        } else {
            occurrences as f64 / self.sets as f64
        };

        LabelStats {
            label_sets: self.sets,
            distinct_labels: self.counts.len() as u64,
            max_label,
            label_occurrences: occurrences,
            min_labels_per_set: self.smallest_set,
            max_labels_per_set: self.largest_set,
            mean_labels_per_set,
            unused_labels,
            first_unused,
        }
    }

    fn first_unused(&self, limit: usize) -> Vec<LabelId> {
        let mut unused = Vec::new();
        let mut expected: LabelId = 1;

        for &label in self.counts.keys() {
            while expected < label && unused.len() < limit {
                unused.push(expected);
                expected += 1;
            }
            if unused.len() >= limit {
                break;
            }
            expected = label.saturating_add(1);
        }

        unused
    }

    pub fn to_entries(&self) -> Vec<LabelFrequency> {
        self.iter()
            .map(|(label, frequency)| LabelFrequency { label, frequency })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFrequency {
    pub label: LabelId,
    pub frequency: u64,
}

/// A violation of the "smaller ids are at least as frequent" convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWarning {
    pub label: LabelId,
    pub frequency: u64,
    pub previous_label: LabelId,
    pub previous_frequency: u64,
}

/// Summary of a label file, informational only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStats {
    pub label_sets: u64,
    pub distinct_labels: u64,
    pub max_label: Option<LabelId>,
    pub label_occurrences: u64,
    pub min_labels_per_set: usize,
    pub max_labels_per_set: usize,
    pub mean_labels_per_set: f64,
    /// Ids in `[1, max_label]` that no set uses
    pub unused_labels: u64,
    pub first_unused: Vec<LabelId>,
}

/// Outcome of a successful validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub path: String,
    pub stats: LabelStats,
    pub frequencies: Vec<LabelFrequency>,
    pub warnings: Vec<OrderWarning>,
}
