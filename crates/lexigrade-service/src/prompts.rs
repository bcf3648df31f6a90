//! Prompt formats and wire types of the text generation service.

use lexigrade_core::{CefrLevel, Language};
use lexigrade_flow::Regeneration;
use serde::{Deserialize, Serialize};

const NO_META: &str = "[NO META TEXT — OUTPUT ONLY THE REWRITTEN CONTENT]";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOptions {
    pub stop: Vec<String>,
}

/// Request body of the generation service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
    pub stream: bool,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: String) -> Self {
        Self {
            model: model.into(),
            prompt,
            options: None,
            stream: false,
        }
    }

    /// Adds stop sequences; an empty list leaves the options out.
    pub fn with_stop(mut self, stop: &[String]) -> Self {
        if !stop.is_empty() {
            self.options = Some(GenerationOptions {
                stop: stop.to_vec(),
            });
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

pub fn generation_prompt(language: Language, text: &str, target: CefrLevel) -> String {
    format!("{NO_META}\nLANGUAGE: {language}\nCEFR TARGET: {target}\nText: {text}")
}

pub fn regeneration_prompt(request: &Regeneration<'_>) -> String {
    format!(
        "{NO_META}\n\
         LANGUAGE: {}\n\
         The original sentence: '{}'\n\
         Your previous simplification: '{}'\n\
         Failed to meet the CEFR level target of: '{}'\n\
         Because: {}\n\
         Please provide a new simplification respecting the feedback.",
        request.language, request.original, request.previous, request.target, request.feedback
    )
}

pub fn review_prompt(language: Language, original: &str, simplified: &str) -> String {
    format!("LANGUAGE: {language}\nORIGINAL TEXT: {original}\nSIMPLIFIED TEXT: {simplified}")
}
