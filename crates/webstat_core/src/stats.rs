use std::collections::HashMap;

use engine_logging::engine_debug;

/// Number of entries shown in the statistics report and chart.
pub const TOP_WORDS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Occurrence count per distinct token.
///
/// Entries are kept in first-seen order so that ranking ties resolve the
/// same way on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    entries: Vec<WordCount>,
    index: HashMap<String, usize>,
}

impl WordFrequencyTable {
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let mut table = Self::default();
        for word in words {
            table.record(word.as_ref());
        }
        engine_debug!(
            "Counted {} tokens into {} distinct words",
            words.len(),
            table.len()
        );
        table
    }

    pub fn record(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push(WordCount {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn count(&self, word: &str) -> usize {
        self.index
            .get(word)
            .map(|&slot| self.entries[slot].count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts; equals the number of recorded tokens.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// The `k` most frequent words, highest count first.
    pub fn top(&self, k: usize) -> Vec<WordCount> {
        let mut ranked = self.entries.clone();
        // Stable sort: equal counts stay in first-seen order.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(k);
        ranked
    }
}
