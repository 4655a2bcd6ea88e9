/// Characters that separate word fragments in page text.
pub const FRAGMENT_SEPARATORS: &[char] = &[' ', '\t', '\n', '\r'];

/// Split text on spaces, tabs and line breaks, dropping empty fragments.
///
/// Other whitespace (form feeds, non-breaking spaces) stays inside the
/// fragment and is removed later by [`clean_word`].
pub fn split_fragments(text: &str) -> impl Iterator<Item = &str> {
    text.split(FRAGMENT_SEPARATORS)
        .filter(|fragment| !fragment.is_empty())
}

/// Keep ASCII letters and digits only, lowercased.
///
/// A fragment made of punctuation alone yields an empty string.
pub fn clean_word(fragment: &str) -> String {
    fragment
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split and clean every fragment of `text`, preserving order and empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    split_fragments(text).map(clean_word).collect()
}
