//! Blocking HTTP clients for Lexigrade's external collaborators.
//!
//! - [`HttpGenerator`] and [`HttpReviewer`] talk to a text generation
//!   service (`{"model", "prompt", "stream": false}` in, `{"response"}` out)
//! - [`HttpAnnotator`] fetches sentence annotations
//! - [`RemoteSequenceClassifier`] fetches CEFR logits

pub mod annotator;
pub mod classifier;
pub mod client;
pub mod generator;
pub mod prompts;
pub mod reviewer;

pub use annotator::HttpAnnotator;
pub use classifier::RemoteSequenceClassifier;
pub use client::JsonClient;
pub use generator::HttpGenerator;
pub use prompts::{GenerateRequest, GenerateResponse, GenerationOptions};
pub use reviewer::HttpReviewer;
