//! Scripted collaborators for flow tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use lexigrade_classifier::{CefrEstimate, CefrEstimator};
use lexigrade_core::{Annotator, CefrLevel, Language, LexigradeError, Result, Sentence};

use crate::collaborators::{Generator, Regeneration, Reviewer};

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorCall {
    Generate {
        text: String,
        target: CefrLevel,
    },
    Regenerate {
        original: String,
        previous: String,
        target: CefrLevel,
        feedback: String,
    },
}

impl GeneratorCall {
    pub fn target(&self) -> CefrLevel {
        match self {
            GeneratorCall::Generate { target, .. } | GeneratorCall::Regenerate { target, .. } => {
                *target
            }
        }
    }
}

/// Replies from a fixed script; `Err` entries simulate service failures.
///
/// Once the script is exhausted the last reply repeats.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    last: Mutex<Option<std::result::Result<String, String>>>,
    calls: Mutex<Vec<GeneratorCall>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<std::result::Result<&str, &str>>) -> Self {
        Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|reply| reply.map(String::from).map_err(String::from))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Always answers with `text`.
    pub fn always(text: &str) -> Self {
        Self::new(vec![Ok(text)])
    }

    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn reply(&self, call: GeneratorCall) -> Result<String> {
        self.calls.lock().unwrap().push(call);
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = Some(next);
        }
        match last.clone() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LexigradeError::Service(message)),
            None => Err(LexigradeError::Service("empty script".to_string())),
        }
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self, _language: Language, text: &str, target: CefrLevel) -> Result<String> {
        self.reply(GeneratorCall::Generate {
            text: text.to_string(),
            target,
        })
    }

    fn regenerate(&self, request: &Regeneration<'_>) -> Result<String> {
        self.reply(GeneratorCall::Regenerate {
            original: request.original.to_string(),
            previous: request.previous.to_string(),
            target: request.target,
            feedback: request.feedback.to_string(),
        })
    }
}

/// Returns the same raw review every time and counts calls.
#[derive(Debug)]
pub struct ScriptedReviewer {
    reply: std::result::Result<String, String>,
    calls: Mutex<usize>,
}

impl ScriptedReviewer {
    pub fn new(reply: std::result::Result<&str, &str>) -> Self {
        Self {
            reply: reply.map(String::from).map_err(String::from),
            calls: Mutex::new(0),
        }
    }

    pub fn passing() -> Self {
        Self::new(Ok(r#"{"final_decision": "PASS", "brief_explanation": "Meaning kept."}"#))
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Reviewer for ScriptedReviewer {
    fn review(&self, _language: Language, _original: &str, _simplified: &str) -> Result<String> {
        *self.calls.lock().unwrap() += 1;
        self.reply.clone().map_err(LexigradeError::Service)
    }
}

/// Estimates every text at one level.
#[derive(Debug, Clone, Copy)]
pub struct FixedEstimator(pub CefrLevel);

impl CefrEstimator for FixedEstimator {
    fn estimate(&self, _text: &str) -> Result<CefrEstimate> {
        Ok(CefrEstimate::new(self.0, 1.0))
    }
}

/// Delegates to `inner` until the `fail_on`-th call (1-based), which fails
/// along with every later call.
#[derive(Debug)]
pub struct FailingAnnotator<A> {
    inner: A,
    fail_on: usize,
    calls: Mutex<usize>,
}

impl<A: Annotator> FailingAnnotator<A> {
    pub fn new(inner: A, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            calls: Mutex::new(0),
        }
    }
}

impl<A: Annotator> Annotator for FailingAnnotator<A> {
    fn annotate(&self, language: Language, text: &str) -> Result<Vec<Sentence>> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if *calls >= self.fail_on {
            return Err(LexigradeError::Annotation("annotator went away".to_string()));
        }
        self.inner.annotate(language, text)
    }
}
