//! Sentence splitting and word-budget chunking of input text.

use std::sync::OnceLock;

use regex::Regex;

fn sentence_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"[.!?]\s+").expect("valid sentence boundary regex"))
}

/// Splits after `.`, `!` or `?` followed by whitespace, keeping the
/// punctuation with its sentence.
///
/// ```
/// use lexigrade_flow::split_sentences;
///
/// assert_eq!(
///     split_sentences("It rains. Is it cold?  Yes!"),
///     vec!["It rains.", "Is it cold?", "Yes!"]
/// );
/// ```
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in sentence_boundary().find_iter(text) {
        // punctuation is a single ASCII byte
        let end = boundary.start() + 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, sentence: &'a str) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

/// Greedily packs whole sentences into chunks of at most `max_words`
/// whitespace-separated words.
///
/// A sentence longer than the budget becomes a chunk of its own; no chunk
/// is ever empty.
pub fn chunk_text_by_words(text: &str, max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut count = 0;

    for sentence in split_sentences(text) {
        let words = sentence.split_whitespace().count();
        if !current.is_empty() && count + words > max_words {
            chunks.push(current.join(" "));
            current.clear();
            count = 0;
        }
        current.push(sentence);
        count += words;
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}
