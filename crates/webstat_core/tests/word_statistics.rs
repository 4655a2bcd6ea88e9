use std::sync::Once;

use pretty_assertions::assert_eq;
use webstat_core::{print_word_statistics, tokenize, WordCount, WordFrequencyTable};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn report(words: &[String]) -> (String, Vec<WordCount>) {
    let mut out = Vec::new();
    let top = print_word_statistics(&mut out, words).expect("write to vec");
    (String::from_utf8(out).expect("utf8 report"), top)
}

#[test]
fn hello_world_scenario() {
    init_logging();
    let words = tokenize("Hello, World! Hello");
    assert_eq!(words, vec!["hello", "world", "hello"]);

    let table = WordFrequencyTable::from_words(&words);
    assert_eq!(table.len(), 2);
    assert_eq!(table.count("hello"), 2);
    assert_eq!(table.count("world"), 1);

    let (text, top) = report(&words);
    assert_eq!(
        text,
        "Total words: 3\nTop 7 occurring words:\nhello: 2\nworld: 1\n"
    );
    assert_eq!(top.len(), 2);
}

#[test]
fn empty_word_list_prints_zero_and_no_entries() {
    init_logging();
    let (text, top) = report(&[]);
    assert_eq!(text, "Total words: 0\nTop 7 occurring words:\n");
    assert!(top.is_empty());
}

#[test]
fn punctuation_only_fragments_count_toward_total() {
    init_logging();
    let words = tokenize("wait ... what ?!");
    assert_eq!(words, vec!["wait", "", "what", ""]);

    let (text, top) = report(&words);
    assert!(text.starts_with("Total words: 4\n"));
    assert!(text.contains("\n: 2\n"), "empty token line missing: {text:?}");
    assert_eq!(top[0].count, 2);
}

#[test]
fn top_list_is_capped_at_seven() {
    init_logging();
    let text = "a a a a a a a a b b b b b b b c c c c c c d d d d d e e e e f f f g g h i j";
    let words = tokenize(text);
    let (report_text, top) = report(&words);

    assert_eq!(top.len(), 7);
    assert_eq!(
        top.iter().map(|e| e.count).collect::<Vec<_>>(),
        vec![8, 7, 6, 5, 4, 3, 2]
    );
    assert_eq!(report_text.lines().count(), 2 + 7);
    assert!(report_text.starts_with(&format!("Total words: {}\n", words.len())));
}
