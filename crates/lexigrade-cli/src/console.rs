//! Colored console logging for Lexigrade events.
//!
//! Events are written to stderr so stdout carries only JSON results.
//!
//! ## Log Levels
//!
//! - **INFO**: Flow lifecycle, strategy selection, calibration steps
//! - **DEBUG**: Attempts, verdicts and constraint batteries
//! - **WARN**: Degraded external calls and sparse calibration samples

use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "lexigrade=info";

/// Initializes console logging.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `lexigrade=info` directive.
pub fn init() {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

/// A tracing layer that prints Lexigrade events on one colored line each.
pub struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("lexigrade") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let line = format_event(&visitor, *metadata.level());
        let _ = writeln!(io::stderr(), "{} {}", format_elapsed(elapsed_secs()), line);
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn record_value(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "message" => self.message = Some(value),
            name => self.fields.push((name, value)),
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        self.record_value(field, rendered.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, format!("{:.4}", value));
    }
}

fn format_elapsed(secs: f64) -> String {
    format!("{:>7.3}s", secs).bright_black().to_string()
}

fn marker(event: &str, level: Level) -> String {
    match (event, level) {
        (_, Level::ERROR) => "✖".bright_red().bold().to_string(),
        (_, Level::WARN) => "⚠".bright_yellow().bold().to_string(),
        ("flow_start" | "stage_start", _) => "▶".bright_green().bold().to_string(),
        ("flow_end", _) => "■".bright_cyan().bold().to_string(),
        (_, Level::INFO) => "●".bright_blue().to_string(),
        _ => "·".bright_black().to_string(),
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("log");
    let mut output = format!("{} {}", marker(event, level), event.white().bold());

    if let Some(message) = &v.message {
        output.push_str(&format!(" │ {}", message));
    }
    for (name, value) in &v.fields {
        let value = match *name {
            "accepted" if value == "true" => value.bright_green().to_string(),
            "accepted" => value.bright_red().to_string(),
            "level" | "target" | "original" => value.bright_yellow().to_string(),
            _ => value.clone(),
        };
        output.push_str(&format!(" │ {}={}", name.bright_black(), value));
    }
    output
}
