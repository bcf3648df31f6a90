//! Remote sequence classifier producing CEFR logits.

use lexigrade_classifier::SequenceClassifier;
use lexigrade_config::ServicesConfig;
use lexigrade_core::{LexigradeError, Result};
use serde::{Deserialize, Serialize};

use crate::client::JsonClient;

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    logits: Vec<f64>,
}

/// Sends `{"text"}` and expects `{"logits": [A1, ..., C2]}`.
#[derive(Debug, Clone)]
pub struct RemoteSequenceClassifier {
    client: JsonClient,
}

impl RemoteSequenceClassifier {
    pub fn new(client: JsonClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns a configuration error when no classifier URL is configured.
    pub fn from_config(config: &ServicesConfig) -> Result<Self> {
        let url = config.classifier_url.clone().ok_or_else(|| {
            LexigradeError::Config("services.classifier_url is not set".to_string())
        })?;
        Ok(Self::new(JsonClient::new(url, config.request_timeout())?))
    }
}

impl SequenceClassifier for RemoteSequenceClassifier {
    fn logits(&self, text: &str) -> Result<Vec<f64>> {
        let reply: ClassifyResponse = self.client.post(&ClassifyRequest { text })?;
        Ok(reply.logits)
    }
}
