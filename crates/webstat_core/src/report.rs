use std::io::{self, Write};

use crate::stats::{WordCount, WordFrequencyTable, TOP_WORDS};

/// Counted view of a token list, ready to be printed and charted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordStatistics {
    pub total: usize,
    pub top: Vec<WordCount>,
}

impl WordStatistics {
    pub fn from_words<S: AsRef<str>>(words: &[S], top_k: usize) -> Self {
        let table = WordFrequencyTable::from_words(words);
        Self {
            total: words.len(),
            top: table.top(top_k),
        }
    }
}

/// Write the statistics block:
///
/// ```text
/// Total words: <n>
/// Top 7 occurring words:
/// <word>: <count>
/// ```
pub fn write_word_statistics<W: Write>(out: &mut W, stats: &WordStatistics) -> io::Result<()> {
    writeln!(out, "Total words: {}", stats.total)?;
    writeln!(out, "Top {TOP_WORDS} occurring words:")?;
    for entry in &stats.top {
        writeln!(out, "{}: {}", entry.word, entry.count)?;
    }
    Ok(())
}

/// Count `words`, print the report to `out` and hand back the top entries.
pub fn print_word_statistics<W: Write, S: AsRef<str>>(
    out: &mut W,
    words: &[S],
) -> io::Result<Vec<WordCount>> {
    let stats = WordStatistics::from_words(words, TOP_WORDS);
    write_word_statistics(out, &stats)?;
    Ok(stats.top)
}
