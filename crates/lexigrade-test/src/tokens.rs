//! Token and sentence builders.

use lexigrade_core::{AnnotatedToken, PartOfSpeech, Sentence};

/// Creates a token with explicit lemma, tag and dependency label.
pub fn token(text: &str, lemma: &str, pos: PartOfSpeech, dep: &str) -> AnnotatedToken {
    AnnotatedToken::new(text, lemma, pos, dep)
}

/// Creates a noun whose lemma is its lowercased surface form.
pub fn noun(text: &str, dep: &str) -> AnnotatedToken {
    AnnotatedToken::new(text, text, PartOfSpeech::Noun, dep)
}

/// Creates a verb with the given lemma.
pub fn verb(text: &str, lemma: &str, dep: &str) -> AnnotatedToken {
    AnnotatedToken::new(text, lemma, PartOfSpeech::Verb, dep)
}

/// Creates a punctuation token.
pub fn punct(text: &str) -> AnnotatedToken {
    AnnotatedToken::new(text, text, PartOfSpeech::Punct, "punct")
}

/// Creates a proper noun inside a named entity.
pub fn entity(text: &str, label: &str) -> AnnotatedToken {
    AnnotatedToken::new(text, text, PartOfSpeech::Propn, "nsubj").with_entity(label)
}

/// Builds a sentence whose text is reconstructed from the tokens.
pub fn sentence(tokens: Vec<AnnotatedToken>) -> Sentence {
    Sentence::from_tokens(tokens)
}
