use lexigrade_config::ServicesConfig;
use lexigrade_core::{Language, Result};
use lexigrade_flow::Reviewer;

use crate::client::JsonClient;
use crate::prompts::{review_prompt, GenerateRequest, GenerateResponse};

/// Semantic reviewer backed by the text generation service.
///
/// The raw model output is returned as is; the flow parses it.
#[derive(Debug, Clone)]
pub struct HttpReviewer {
    client: JsonClient,
    model: String,
}

impl HttpReviewer {
    pub fn new(client: JsonClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn from_config(config: &ServicesConfig) -> Result<Self> {
        let client = JsonClient::new(config.models_url.clone(), config.request_timeout())?;
        Ok(Self::new(client, config.reviewer_model.clone()))
    }
}

impl Reviewer for HttpReviewer {
    fn review(&self, language: Language, original: &str, simplified: &str) -> Result<String> {
        let prompt = review_prompt(language, original, simplified);
        let request = GenerateRequest::new(&self.model, prompt);
        let reply: GenerateResponse = self.client.post(&request)?;
        Ok(reply.response)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::client::testing::serve_once;

    #[test]
    fn test_review_returns_raw_output() {
        let (url, server) = serve_once(
            200,
            r#"{"response": "{\"final_decision\": \"PASS\", \"brief_explanation\": \"ok\"}"}"#,
        );
        let client = JsonClient::new(url, Duration::from_secs(5)).unwrap();
        let raw = HttpReviewer::new(client, "lexigrade-reviewer")
            .review(Language::Spanish, "Original.", "Simple.")
            .unwrap();
        assert_eq!(raw, r#"{"final_decision": "PASS", "brief_explanation": "ok"}"#);

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent["model"], "lexigrade-reviewer");
        assert_eq!(
            sent["prompt"],
            "LANGUAGE: spanish\nORIGINAL TEXT: Original.\nSIMPLIFIED TEXT: Simple."
        );
    }
}
