//! Webstat core: pure word cleaning, counting and report formatting.
mod report;
mod stats;
mod words;

pub use report::{print_word_statistics, write_word_statistics, WordStatistics};
pub use stats::{WordCount, WordFrequencyTable, TOP_WORDS};
pub use words::{clean_word, split_fragments, tokenize, FRAGMENT_SEPARATORS};
