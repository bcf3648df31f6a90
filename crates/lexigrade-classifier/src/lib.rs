//! CEFR level estimation for Lexigrade.
//!
//! Two strategies implement [`CefrEstimator`]:
//! - [`NlpCefrClassifier`] - windowed aggregation of the linguistic metrics
//! - [`NeuralCefrClassifier`] - softmax over a black-box sequence classifier
//!
//! [`CefrClassifier`] selects one per language from configuration.

pub mod estimate;
pub mod metric;
pub mod metrics;
pub mod neural;
pub mod selector;

pub use estimate::{Aggregation, CefrEstimate, CefrEstimator, WindowReport};
pub use metric::{split_into_windows, NlpCefrClassifier, ScoreBands};
pub use metrics::TextMetrics;
pub use neural::{softmax, NeuralCefrClassifier, SequenceClassifier};
pub use selector::CefrClassifier;
