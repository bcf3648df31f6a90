//! Lexicon and corpus frequency accumulation.

use std::path::Path;

use lexigrade_core::profile::files;
use lexigrade_core::{
    Annotator, CefrLevel, CorpusFrequencies, Language, Lexicon, Result, Sentence,
};
use tracing::info;

use crate::artifacts::write_json;
use crate::corpus::TextsByLevel;

/// Running lexicon and lemma counts over annotated texts.
///
/// Every alphabetic lemma is recorded at the lowest level it appears in and
/// its occurrences are summed across levels.
///
/// ```
/// use lexigrade_calibration::LexiconAccumulator;
/// use lexigrade_core::CefrLevel;
/// use lexigrade_test::{noun, sentence};
///
/// let mut acc = LexiconAccumulator::new();
/// acc.add_sentences(CefrLevel::B1, &[sentence(vec![noun("house", "nsubj")])]);
/// acc.add_sentences(CefrLevel::A2, &[sentence(vec![noun("house", "nsubj")])]);
/// assert_eq!(acc.lexicon().level("house"), Some(CefrLevel::A2));
/// assert_eq!(acc.corpus().count("house"), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexiconAccumulator {
    lexicon: Lexicon,
    corpus: CorpusFrequencies,
    texts: usize,
}

impl LexiconAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the alphabetic tokens of one annotated text.
    pub fn add_sentences(&mut self, level: CefrLevel, sentences: &[Sentence]) {
        let words = sentences
            .iter()
            .flat_map(|sentence| sentence.tokens.iter())
            .filter(|token| token.is_alpha);
        for token in words {
            self.lexicon.insert_min(token.lemma.as_str(), level);
            self.corpus.add(token.lemma.as_str(), 1);
        }
        self.texts += 1;
    }

    /// Annotates and records every text of `texts`.
    pub fn add_texts(
        &mut self,
        annotator: &dyn Annotator,
        language: Language,
        texts: &TextsByLevel,
    ) -> Result<()> {
        for (level, samples) in texts.iter() {
            info!(event = "lexicon_level", level = %level, texts = samples.len());
            for text in samples {
                let sentences = annotator.annotate(language, text)?;
                self.add_sentences(level, &sentences);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    #[inline]
    pub fn corpus(&self) -> &CorpusFrequencies {
        &self.corpus
    }

    /// Number of texts recorded so far.
    pub fn texts(&self) -> usize {
        self.texts
    }

    pub fn into_parts(self) -> (Lexicon, CorpusFrequencies) {
        (self.lexicon, self.corpus)
    }

    /// Writes the lexicon and corpus frequency files into `dir`.
    pub fn write(&self, dir: &Path) -> Result<()> {
        info!(
            event = "lexicon_built",
            lemmas = self.lexicon.len(),
            total_tokens = self.corpus.total_tokens,
        );
        write_json(&dir.join(files::LEXICON), &self.lexicon)?;
        write_json(&dir.join(files::CORPUS_FREQUENCIES), &self.corpus)
    }
}

#[cfg(test)]
mod tests {
    use lexigrade_core::LanguageProfile;
    use lexigrade_test::{punct, sentence, verb, FixtureAnnotator};

    use super::*;
    use crate::artifacts::read_json;

    #[test]
    fn test_punctuation_is_not_counted() {
        let mut acc = LexiconAccumulator::new();
        acc.add_sentences(
            CefrLevel::A1,
            &[sentence(vec![verb("runs", "run", "ROOT"), punct(".")])],
        );
        assert_eq!(acc.corpus().total_tokens, 1);
        assert!(!acc.lexicon().contains("."));
        assert_eq!(acc.texts(), 1);
    }

    #[test]
    fn test_add_texts_keeps_lowest_level() {
        let mut texts = TextsByLevel::new();
        texts.push(CefrLevel::B1, "The dog runs.");
        texts.push(CefrLevel::A1, "The cat sleeps.");
        texts.push(CefrLevel::A2, "The cats sleep.");

        let mut acc = LexiconAccumulator::new();
        acc.add_texts(&FixtureAnnotator::english(), Language::English, &texts)
            .unwrap();

        assert_eq!(acc.lexicon().level("the"), Some(CefrLevel::A1));
        assert_eq!(acc.lexicon().level("cat"), Some(CefrLevel::A1));
        assert_eq!(acc.lexicon().level("dog"), Some(CefrLevel::B1));
        assert_eq!(acc.corpus().count("the"), 3);
        assert_eq!(acc.corpus().count("cat"), 2);
        assert_eq!(acc.corpus().total_tokens, 9);
    }

    #[test]
    fn test_write_produces_loadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut acc = LexiconAccumulator::new();
        acc.add_sentences(CefrLevel::A2, &[sentence(vec![verb("runs", "run", "ROOT")])]);
        acc.write(dir.path()).unwrap();

        let lexicon: Lexicon = read_json(&dir.path().join(files::LEXICON)).unwrap();
        assert_eq!(lexicon.level("run"), Some(CefrLevel::A2));
        let corpus: CorpusFrequencies =
            read_json(&dir.path().join(files::CORPUS_FREQUENCIES)).unwrap();
        assert_eq!(corpus.total_tokens, 1);
        assert!(LanguageProfile::directory(dir.path(), Language::English).ends_with("english"));
    }
}
