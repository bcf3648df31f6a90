use lexigrade_config::ServicesConfig;
use lexigrade_core::{CefrLevel, Language, Result};
use lexigrade_flow::{Generator, Regeneration};

use crate::client::JsonClient;
use crate::prompts::{generation_prompt, regeneration_prompt, GenerateRequest, GenerateResponse};

/// Generator backed by the text generation service.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: JsonClient,
    model: String,
    stop: Vec<String>,
}

impl HttpGenerator {
    pub fn new(client: JsonClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            stop: Vec::new(),
        }
    }

    pub fn from_config(config: &ServicesConfig) -> Result<Self> {
        let client = JsonClient::new(config.models_url.clone(), config.request_timeout())?;
        Ok(Self::new(client, config.generator_model.clone())
            .with_stop(config.generator_stop.clone()))
    }

    /// Stop sequences sent with first-pass generations.
    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = stop;
        self
    }

    fn complete(&self, request: &GenerateRequest) -> Result<String> {
        let reply: GenerateResponse = self.client.post(request)?;
        Ok(reply.response)
    }
}

impl Generator for HttpGenerator {
    fn generate(&self, language: Language, text: &str, target: CefrLevel) -> Result<String> {
        let request = GenerateRequest::new(&self.model, generation_prompt(language, text, target))
            .with_stop(&self.stop);
        self.complete(&request)
    }

    fn regenerate(&self, request: &Regeneration<'_>) -> Result<String> {
        self.complete(&GenerateRequest::new(&self.model, regeneration_prompt(request)))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lexigrade_core::LexigradeError;

    use super::*;
    use crate::client::testing::{closed_url, serve_once};

    fn generator(url: String) -> HttpGenerator {
        let client = JsonClient::new(url, Duration::from_secs(5)).unwrap();
        HttpGenerator::new(client, "lexigrade-generator")
            .with_stop(vec!["Here is the rewritten".to_string()])
    }

    #[test]
    fn test_generate_returns_response_field() {
        let (url, server) = serve_once(200, r#"{"response": "The cat sleeps.", "done": true}"#);
        let output = generator(url)
            .generate(Language::English, "The feline slumbers.", CefrLevel::A1)
            .unwrap();
        assert_eq!(output, "The cat sleeps.");

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["model"], "lexigrade-generator");
        assert_eq!(sent["stream"], false);
        assert_eq!(sent["options"]["stop"][0], "Here is the rewritten");
        assert!(sent["prompt"].as_str().unwrap().ends_with("Text: The feline slumbers."));
    }

    #[test]
    fn test_regenerate_sends_no_stop_sequence() {
        let (url, server) = serve_once(200, r#"{"response": "Short."}"#);
        let output = generator(url)
            .regenerate(&Regeneration {
                language: Language::English,
                original: "Long.",
                previous: "Still long.",
                target: CefrLevel::A2,
                feedback: "Shorter.",
            })
            .unwrap();
        assert_eq!(output, "Short.");

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert!(sent.get("options").is_none());
        assert!(sent["prompt"].as_str().unwrap().contains("Because: Shorter."));
    }

    #[test]
    fn test_unreachable_generator_fails() {
        let err = generator(closed_url())
            .generate(Language::English, "Text.", CefrLevel::A1)
            .unwrap_err();
        assert!(matches!(err, LexigradeError::Service(_)));
    }
}
