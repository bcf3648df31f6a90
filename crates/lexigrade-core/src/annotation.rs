//! Annotated tokens and the annotator contract.
//!
//! The annotator is an external capability (a dependency parser with lemma,
//! part-of-speech and named-entity layers). The scoring crates only see its
//! output: sentences of [`AnnotatedToken`]s.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::language::Language;

/// Universal Dependencies part-of-speech tag.
///
/// Tags the annotator reports that are not in the universal set map to
/// [`PartOfSpeech::X`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PartOfSpeech {
    pub const fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Adj => "ADJ",
            PartOfSpeech::Adp => "ADP",
            PartOfSpeech::Adv => "ADV",
            PartOfSpeech::Aux => "AUX",
            PartOfSpeech::Cconj => "CCONJ",
            PartOfSpeech::Det => "DET",
            PartOfSpeech::Intj => "INTJ",
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Num => "NUM",
            PartOfSpeech::Part => "PART",
            PartOfSpeech::Pron => "PRON",
            PartOfSpeech::Propn => "PROPN",
            PartOfSpeech::Punct => "PUNCT",
            PartOfSpeech::Sconj => "SCONJ",
            PartOfSpeech::Sym => "SYM",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::X => "X",
        }
    }
}

impl From<&str> for PartOfSpeech {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "ADJ" => PartOfSpeech::Adj,
            "ADP" => PartOfSpeech::Adp,
            "ADV" => PartOfSpeech::Adv,
            "AUX" => PartOfSpeech::Aux,
            "CCONJ" | "CONJ" => PartOfSpeech::Cconj,
            "DET" => PartOfSpeech::Det,
            "INTJ" => PartOfSpeech::Intj,
            "NOUN" => PartOfSpeech::Noun,
            "NUM" => PartOfSpeech::Num,
            "PART" => PartOfSpeech::Part,
            "PRON" => PartOfSpeech::Pron,
            "PROPN" => PartOfSpeech::Propn,
            "PUNCT" => PartOfSpeech::Punct,
            "SCONJ" => PartOfSpeech::Sconj,
            "SYM" => PartOfSpeech::Sym,
            "VERB" => PartOfSpeech::Verb,
            _ => PartOfSpeech::X,
        }
    }
}

impl From<String> for PartOfSpeech {
    fn from(tag: String) -> Self {
        PartOfSpeech::from(tag.as_str())
    }
}

impl From<PartOfSpeech> for String {
    fn from(pos: PartOfSpeech) -> Self {
        pos.as_str().to_string()
    }
}

/// A single token as produced by the annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Surface form.
    pub text: String,
    /// Dictionary form, lowercased.
    pub lemma: String,
    pub pos: PartOfSpeech,
    /// Dependency relation to the head token (`nsubj`, `relcl`, ...).
    pub dep: String,
    /// Named-entity type (`PERSON`, `GPE`, ...), if the token is inside an entity.
    #[serde(default)]
    pub entity: Option<String>,
    pub is_alpha: bool,
}

impl AnnotatedToken {
    /// Creates a token, lowercasing the lemma and deriving the alphabetic flag
    /// from the surface form.
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: PartOfSpeech,
        dep: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let is_alpha = !text.is_empty() && text.chars().all(char::is_alphabetic);
        Self {
            lemma: lemma.into().to_lowercase(),
            text,
            pos,
            dep: dep.into(),
            entity: None,
            is_alpha,
        }
    }

    /// Marks the token as part of a named entity.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    #[inline]
    pub fn is_proper_noun(&self) -> bool {
        self.pos == PartOfSpeech::Propn
    }

    /// Returns true if the token counts as a word for complexity purposes:
    /// alphabetic, not a proper noun and not inside an excluded entity.
    pub fn is_eligible(&self, filter: &EntityFilter) -> bool {
        self.is_alpha && !self.is_proper_noun() && !filter.excludes(self)
    }

    /// Surface form with surrounding punctuation removed.
    pub fn stripped_text(&self) -> &str {
        self.text
            .trim_matches(|c: char| ".,!?;:()[]{}'\"".contains(c))
    }
}

/// Named-entity types excluded from every lexical measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityFilter {
    excluded: Vec<String>,
}

impl EntityFilter {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the token's entity type is excluded.
    pub fn excludes(&self, token: &AnnotatedToken) -> bool {
        token
            .entity
            .as_deref()
            .is_some_and(|entity| self.excluded.iter().any(|e| e == entity))
    }

    pub fn types(&self) -> &[String] {
        &self.excluded
    }
}

impl Default for EntityFilter {
    /// People, places and organisations, in both the OntoNotes (English) and
    /// WikiNER (Spanish) label sets.
    fn default() -> Self {
        Self::new(["PERSON", "PER", "GPE", "LOC", "ORG"])
    }
}

/// A sentence: its surface text and its tokens in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<AnnotatedToken>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, tokens: Vec<AnnotatedToken>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    /// Builds a sentence whose text is reconstructed from its tokens.
    pub fn from_tokens(tokens: Vec<AnnotatedToken>) -> Self {
        let mut text = String::new();
        for token in &tokens {
            let attaches_left = token.pos == PartOfSpeech::Punct
                && token.text.chars().all(|c| ".,!?;:)]}".contains(c));
            if !text.is_empty() && !attaches_left {
                text.push(' ');
            }
            text.push_str(&token.text);
        }
        Self { text, tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Iterates the tokens of `sentences` that count as words.
pub fn eligible_tokens<'a>(
    sentences: &'a [Sentence],
    filter: &'a EntityFilter,
) -> impl Iterator<Item = &'a AnnotatedToken> + 'a {
    sentences
        .iter()
        .flat_map(|sentence| sentence.tokens.iter())
        .filter(move |token| token.is_eligible(filter))
}

/// Joins sentence texts with single spaces.
pub fn joined_text(sentences: &[Sentence]) -> String {
    sentences
        .iter()
        .map(|sentence| sentence.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Produces per-token linguistic annotation for a language.
///
/// Implementations wrap a dependency parser (local or remote). They must be
/// deterministic for a given text so that repeated scoring is idempotent.
pub trait Annotator: Send + Sync {
    /// Splits `text` into sentences of annotated tokens.
    fn annotate(&self, language: Language, text: &str) -> Result<Vec<Sentence>>;
}

impl<A: Annotator + ?Sized> Annotator for &A {
    fn annotate(&self, language: Language, text: &str) -> Result<Vec<Sentence>> {
        (**self).annotate(language, text)
    }
}

impl<A: Annotator + ?Sized> Annotator for std::sync::Arc<A> {
    fn annotate(&self, language: Language, text: &str) -> Result<Vec<Sentence>> {
        (**self).annotate(language, text)
    }
}
