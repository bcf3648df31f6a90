//! Rule-based annotator for tests.
//!
//! Splits on whitespace and punctuation, ends sentences at `.`, `!` and `?`,
//! and annotates each word from a table of known surface forms. Unknown words
//! get their lowercased form as lemma, `NOUN` as tag (`PROPN` when
//! capitalized mid-sentence, `NUM` when numeric) and `dep` as label.

use std::collections::HashMap;

use lexigrade_core::{
    AnnotatedToken, Annotator, Language, LexigradeError, PartOfSpeech, Result, Sentence,
};

const PUNCTUATION: &str = ".,!?;:\"()";
const SENTENCE_END: &str = ".!?";

/// Annotation of a known surface form.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpec {
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub dep: String,
    pub entity: Option<String>,
}

impl TokenSpec {
    pub fn new(lemma: &str, pos: PartOfSpeech, dep: &str) -> Self {
        Self {
            lemma: lemma.to_string(),
            pos,
            dep: dep.to_string(),
            entity: None,
        }
    }

    pub fn with_entity(mut self, label: &str) -> Self {
        self.entity = Some(label.to_string());
        self
    }
}

/// Deterministic annotator driven by a surface-form table.
#[derive(Debug, Clone, Default)]
pub struct FixtureAnnotator {
    entries: HashMap<String, TokenSpec>,
    fail: bool,
}

impl FixtureAnnotator {
    /// Creates an annotator with no known words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotator that knows the inflections used by the English fixtures.
    pub fn english() -> Self {
        use PartOfSpeech::*;
        Self::new()
            .with_word("is", TokenSpec::new("be", Aux, "cop"))
            .with_word("are", TokenSpec::new("be", Aux, "cop"))
            .with_word("was", TokenSpec::new("be", Aux, "cop"))
            .with_word("the", TokenSpec::new("the", Det, "det"))
            .with_word("a", TokenSpec::new("a", Det, "det"))
            .with_word("my", TokenSpec::new("my", Pron, "poss"))
            .with_word("i", TokenSpec::new("i", Pron, "nsubj"))
            .with_word("we", TokenSpec::new("we", Pron, "nsubj"))
            .with_word("it", TokenSpec::new("it", Pron, "nsubj"))
            .with_word("and", TokenSpec::new("and", Cconj, "cc"))
            .with_word("in", TokenSpec::new("in", Adp, "prep"))
            .with_word("to", TokenSpec::new("to", Part, "aux"))
            .with_word("cat", TokenSpec::new("cat", Noun, "nsubj"))
            .with_word("cats", TokenSpec::new("cat", Noun, "nsubj"))
            .with_word("dog", TokenSpec::new("dog", Noun, "nsubj"))
            .with_word("house", TokenSpec::new("house", Noun, "pobj"))
            .with_word("park", TokenSpec::new("park", Noun, "pobj"))
            .with_word("fish", TokenSpec::new("fish", Noun, "dobj"))
            .with_word("big", TokenSpec::new("big", Adj, "amod"))
            .with_word("red", TokenSpec::new("red", Adj, "amod"))
            .with_word("small", TokenSpec::new("small", Adj, "acomp"))
            .with_word("happy", TokenSpec::new("happy", Adj, "acomp"))
            .with_word("sleeps", TokenSpec::new("sleep", Verb, "ROOT"))
            .with_word("runs", TokenSpec::new("run", Verb, "ROOT"))
            .with_word("eat", TokenSpec::new("eat", Verb, "ROOT"))
            .with_word("eats", TokenSpec::new("eat", Verb, "ROOT"))
            .with_word("like", TokenSpec::new("like", Verb, "ROOT"))
            .with_word("likes", TokenSpec::new("like", Verb, "ROOT"))
            .with_word("play", TokenSpec::new("play", Verb, "xcomp"))
            .with_word("because", TokenSpec::new("because", Sconj, "mark"))
            .with_word("although", TokenSpec::new("although", Sconj, "mark"))
            .with_word("decided", TokenSpec::new("decide", Verb, "advcl"))
            .with_word("improve", TokenSpec::new("improve", Verb, "xcomp"))
            .with_word("walked", TokenSpec::new("walk", Verb, "advcl"))
            .with_word("quickly", TokenSpec::new("quickly", Adv, "advmod"))
            .with_word("happiness", TokenSpec::new("happiness", Noun, "dobj"))
            .with_word("environment", TokenSpec::new("environment", Noun, "dobj"))
            .with_word("developments", TokenSpec::new("development", Noun, "nsubj"))
            .with_word("sustainable", TokenSpec::new("sustainable", Adj, "amod"))
            .with_word("consequently", TokenSpec::new("consequently", Adv, "advmod"))
            .with_word("ubiquitous", TokenSpec::new("ubiquitous", Adj, "acomp"))
            .with_word("ambiguity", TokenSpec::new("ambiguity", Noun, "dobj"))
            .with_word("meticulously", TokenSpec::new("meticulous", Adv, "advmod"))
            .with_word("perspicacity", TokenSpec::new("perspicacity", Noun, "dobj"))
            .with_word("which", TokenSpec::new("which", Pron, "nsubj"))
            .with_word("shines", TokenSpec::new("shine", Verb, "relcl"))
            .with_word("sun", TokenSpec::new("sun", Noun, "nsubj"))
    }

    /// Annotator that knows the inflections used by the Spanish fixtures.
    pub fn spanish() -> Self {
        use PartOfSpeech::*;
        Self::new()
            .with_word("el", TokenSpec::new("el", Det, "det"))
            .with_word("la", TokenSpec::new("el", Det, "det"))
            .with_word("es", TokenSpec::new("ser", Aux, "cop"))
            .with_word("gato", TokenSpec::new("gato", Noun, "nsubj"))
            .with_word("perro", TokenSpec::new("perro", Noun, "nsubj"))
            .with_word("casa", TokenSpec::new("casa", Noun, "obl"))
            .with_word("grande", TokenSpec::new("grande", Adj, "amod"))
            .with_word("come", TokenSpec::new("comer", Verb, "ROOT"))
            .with_word("duerme", TokenSpec::new("dormir", Verb, "ROOT"))
            .with_word("en", TokenSpec::new("en", Adp, "case"))
            .with_word("aunque", TokenSpec::new("aunque", Sconj, "mark"))
            .with_word("desarrollo", TokenSpec::new("desarrollo", Noun, "nsubj"))
            .with_word("sostenible", TokenSpec::new("sostenible", Adj, "amod"))
            .with_word("ubicuo", TokenSpec::new("ubicuo", Adj, "amod"))
            .with_word("llueve", TokenSpec::new("llover", Verb, "advcl"))
    }

    /// Annotator whose every call fails.
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail: true,
        }
    }

    /// Registers the annotation of a (case-insensitive) surface form.
    pub fn with_word(mut self, surface: &str, spec: TokenSpec) -> Self {
        self.entries.insert(surface.to_lowercase(), spec);
        self
    }

    /// Marks a surface form as a named entity (`PROPN`).
    pub fn with_entity(self, surface: &str, label: &str) -> Self {
        let spec = TokenSpec::new(&surface.to_lowercase(), PartOfSpeech::Propn, "nsubj")
            .with_entity(label);
        self.with_word(surface, spec)
    }

    fn annotate_word(&self, word: &str, sentence_initial: bool) -> AnnotatedToken {
        if PUNCTUATION.contains(word) {
            return AnnotatedToken::new(word, word, PartOfSpeech::Punct, "punct");
        }
        if let Some(spec) = self.entries.get(&word.to_lowercase()) {
            let token = AnnotatedToken::new(word, spec.lemma.as_str(), spec.pos, spec.dep.as_str());
            return match &spec.entity {
                Some(label) => token.with_entity(label.as_str()),
                None => token,
            };
        }
        let pos = if word.chars().all(|c| c.is_ascii_digit()) {
            PartOfSpeech::Num
        } else if !sentence_initial && word.chars().next().is_some_and(char::is_uppercase) {
            PartOfSpeech::Propn
        } else {
            PartOfSpeech::Noun
        };
        AnnotatedToken::new(word, word, pos, "dep")
    }
}

impl Annotator for FixtureAnnotator {
    fn annotate(&self, _language: Language, text: &str) -> Result<Vec<Sentence>> {
        if self.fail {
            return Err(LexigradeError::Annotation(
                "fixture annotator configured to fail".to_string(),
            ));
        }

        let mut sentences = Vec::new();
        let mut current: Vec<AnnotatedToken> = Vec::new();

        for word in split_words(text) {
            let token = self.annotate_word(word, current.is_empty());
            let ends_sentence = SENTENCE_END.contains(word);
            current.push(token);
            if ends_sentence {
                sentences.push(Sentence::from_tokens(std::mem::take(&mut current)));
            }
        }
        if !current.is_empty() {
            sentences.push(Sentence::from_tokens(current));
        }
        Ok(sentences)
    }
}

/// Splits on whitespace, emitting punctuation characters as separate words.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for chunk in text.split_whitespace() {
        let mut start = 0;
        for (idx, c) in chunk.char_indices() {
            if PUNCTUATION.contains(c) {
                if start < idx {
                    words.push(&chunk[start..idx]);
                }
                words.push(&chunk[idx..idx + c.len_utf8()]);
                start = idx + c.len_utf8();
            }
        }
        if start < chunk.len() {
            words.push(&chunk[start..]);
        }
    }
    words
}
