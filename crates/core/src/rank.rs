//! Stop-word filtering, counting, and top-N selection.
//!
//! Ranking is by count, highest first. Equal counts keep the order in which
//! the tokens first appeared after filtering, so the ranking for a given token
//! stream is fully determined and never alphabetical.

use std::collections::HashMap;

use serde::Serialize;

use crate::stopwords::StopWordSet;

/// Number of entries kept when no cutoff is configured.
pub const DEFAULT_TOP_N: usize = 20;

/// Occurrence counts of the tokens that survived filtering.
///
/// Entries are kept in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every token not in `stop_words`, in a single scan.
    pub fn from_tokens(tokens: &[String], stop_words: &StopWordSet) -> Self {
        let mut table = Self::new();
        for token in tokens.iter().filter(|t| !stop_words.contains(t)) {
            table.record(token);
        }
        table
    }

    /// Adds one occurrence of `token`.
    pub fn record(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    /// Occurrences of `token`, zero when absent.
    pub fn count(&self, token: &str) -> usize {
        self.index.get(token).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Sorts by count and keeps the first `top_n` entries.
    pub fn into_ranked(self, top_n: usize) -> RankedList {
        let mut entries = self.entries;
        // sort_by is stable: ties stay in first-occurrence order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(top_n);

        RankedList(entries.into_iter().map(|(token, count)| RankedEntry { token, count }).collect())
    }
}

/// One ranked token and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub token: String,
    pub count: usize,
}

/// Tokens ordered by descending count, at most top-N long.
///
/// This is the only artifact presentation layers consume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedList(Vec<RankedEntry>);

impl RankedList {
    pub fn entries(&self) -> &[RankedEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest count in the list, zero when empty.
    pub fn max_count(&self) -> usize {
        self.0.first().map_or(0, |entry| entry.count)
    }

    /// Returns `(token, count)` pairs in rank order.
    pub fn into_pairs(self) -> Vec<(String, usize)> {
        self.0.into_iter().map(|entry| (entry.token, entry.count)).collect()
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a RankedEntry;
    type IntoIter = std::slice::Iter<'a, RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Filters, counts, and ranks a token stream.
///
/// The result has `min(top_n, distinct surviving tokens)` entries, all with
/// a count of at least one, none of them stop words.
///
/// # Example
///
/// ```rust
/// use cipin_core::{StopWordSet, rank};
///
/// let tokens: Vec<String> = ["我", "喜欢", "猫", "和", "狗", "我", "喜欢", "猫"]
///     .into_iter()
///     .map(String::from)
///     .collect();
/// let stop_words = StopWordSet::from_words(["我", "和"]);
///
/// let ranked = rank(&tokens, &stop_words, 20);
/// assert_eq!(
///     ranked.into_pairs(),
///     vec![("喜欢".to_string(), 2), ("猫".to_string(), 2), ("狗".to_string(), 1)]
/// );
/// ```
pub fn rank(tokens: &[String], stop_words: &StopWordSet, top_n: usize) -> RankedList {
    FrequencyTable::from_tokens(tokens, stop_words).into_ranked(top_n)
}
