//! Remote linguistic annotation.
//!
//! Request: `{"language": "english", "text": "..."}`.
//! Reply: `{"sentences": [{"text": "...", "tokens": [{"text", "lemma",
//! "pos", "dep", "ent_type", "is_alpha"}]}]}` where `ent_type` may be empty
//! or missing and `is_alpha` defaults to the alphabetic test of `text`.

use lexigrade_config::ServicesConfig;
use lexigrade_core::{
    AnnotatedToken, Annotator, Language, LexigradeError, PartOfSpeech, Result, Sentence,
};
use serde::{Deserialize, Serialize};

use crate::client::JsonClient;

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    language: Language,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    sentences: Vec<WireSentence>,
}

#[derive(Debug, Deserialize)]
struct WireSentence {
    text: String,
    tokens: Vec<WireToken>,
}

#[derive(Debug, Deserialize)]
struct WireToken {
    text: String,
    lemma: String,
    pos: PartOfSpeech,
    dep: String,
    #[serde(default, alias = "entity")]
    ent_type: Option<String>,
    #[serde(default)]
    is_alpha: Option<bool>,
}

impl From<WireToken> for AnnotatedToken {
    fn from(wire: WireToken) -> Self {
        let mut token = AnnotatedToken::new(wire.text, wire.lemma, wire.pos, wire.dep);
        if let Some(entity) = wire.ent_type.filter(|label| !label.is_empty()) {
            token = token.with_entity(entity);
        }
        if let Some(is_alpha) = wire.is_alpha {
            token.is_alpha = is_alpha;
        }
        token
    }
}

impl From<WireSentence> for Sentence {
    fn from(wire: WireSentence) -> Self {
        Sentence::new(wire.text, wire.tokens.into_iter().map(Into::into).collect())
    }
}

/// Annotator backed by a remote parsing service.
#[derive(Debug, Clone)]
pub struct HttpAnnotator {
    client: JsonClient,
}

impl HttpAnnotator {
    pub fn new(client: JsonClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns a configuration error when no annotator URL is configured.
    pub fn from_config(config: &ServicesConfig) -> Result<Self> {
        let url = config.annotator_url.clone().ok_or_else(|| {
            LexigradeError::Config("services.annotator_url is not set".to_string())
        })?;
        Ok(Self::new(JsonClient::new(url, config.request_timeout())?))
    }
}

impl Annotator for HttpAnnotator {
    fn annotate(&self, language: Language, text: &str) -> Result<Vec<Sentence>> {
        let reply: AnnotateResponse = self
            .client
            .post(&AnnotateRequest { language, text })
            .map_err(|err| LexigradeError::Annotation(err.to_string()))?;
        Ok(reply.sentences.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lexigrade_config::LexigradeConfig;

    use super::*;
    use crate::client::testing::{closed_url, serve_once};

    const REPLY: &str = r#"{"sentences": [{"text": "Ana runs.", "tokens": [
        {"text": "Ana", "lemma": "Ana", "pos": "PROPN", "dep": "nsubj", "ent_type": "PERSON"},
        {"text": "runs", "lemma": "run", "pos": "VERB", "dep": "ROOT", "ent_type": ""},
        {"text": ".", "lemma": ".", "pos": "PUNCT", "dep": "punct", "is_alpha": false}
    ]}]}"#;

    #[test]
    fn test_annotate_decodes_sentences() {
        let (url, server) = serve_once(200, REPLY);
        let annotator = HttpAnnotator::new(JsonClient::new(url, Duration::from_secs(5)).unwrap());
        let sentences = annotator.annotate(Language::English, "Ana runs.").unwrap();

        assert_eq!(sentences.len(), 1);
        let tokens = &sentences[0].tokens;
        assert_eq!(tokens[0].entity.as_deref(), Some("PERSON"));
        assert_eq!(tokens[0].lemma, "ana");
        assert_eq!(tokens[1].entity, None);
        assert_eq!(tokens[1].pos, PartOfSpeech::Verb);
        assert!(tokens[1].is_alpha);
        assert!(!tokens[2].is_alpha);

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["language"], "english");
        assert_eq!(sent["text"], "Ana runs.");
    }

    #[test]
    fn test_transport_failure_is_an_annotation_error() {
        let annotator =
            HttpAnnotator::new(JsonClient::new(closed_url(), Duration::from_secs(5)).unwrap());
        let err = annotator.annotate(Language::English, "Text.").unwrap_err();
        assert!(matches!(err, LexigradeError::Annotation(_)));
    }

    #[test]
    fn test_missing_url_is_a_config_error() {
        let err = HttpAnnotator::from_config(&LexigradeConfig::default().services).unwrap_err();
        assert!(matches!(err, LexigradeError::Config(_)));
    }
}
