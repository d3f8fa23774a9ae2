//! Metrics for LLM API calls.
//!
//! OpenTelemetry counters and a latency histogram shared by every provider
//! client, labeled by provider, model and operation.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use simplechat_error::{SimpleChatError, SimpleChatErrorKind};
use std::sync::OnceLock;
use std::time::Instant;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Kind of provider call being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Chat completion
    Chat,
    /// Image generation or edit
    Image,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Operation::Chat => "chat",
            Operation::Image => "image",
        }
    }
}

/// Metrics for LLM API interactions.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total LLM API requests
    pub requests: Counter<u64>,
    /// Failed LLM API requests
    pub errors: Counter<u64>,
    /// LLM API call duration in seconds
    pub duration: Histogram<f64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("simplechat_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total LLM API requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed LLM API requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("LLM API call duration")
                .build(),
        }
    }

    /// Get the global LLM metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful LLM API request.
    pub fn record_request(
        &self,
        provider: &str,
        model: &str,
        operation: Operation,
        duration_secs: f64,
    ) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("operation", operation.as_str()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed LLM API request.
    pub fn record_error(&self, provider: &str, model: &str, operation: Operation, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("operation", operation.as_str()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record the outcome of a call started at `started`.
    pub fn observe<T>(
        &self,
        provider: &str,
        model: &str,
        operation: Operation,
        started: Instant,
        result: &Result<T, SimpleChatError>,
    ) {
        match result {
            Ok(_) => {
                self.record_request(provider, model, operation, started.elapsed().as_secs_f64())
            }
            Err(e) => self.record_error(provider, model, operation, classify_error(e)),
        }
    }
}

impl Default for LlmMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}

/// Classify an error for metrics labeling.
pub fn classify_error(error: &SimpleChatError) -> &'static str {
    match error.kind() {
        SimpleChatErrorKind::Provider(e) => e.kind().label(),
        SimpleChatErrorKind::Config(_) => "config",
        SimpleChatErrorKind::NotImplemented(_) => "not_implemented",
        SimpleChatErrorKind::Json(_) => "json",
        SimpleChatErrorKind::Template(_) => "template",
        SimpleChatErrorKind::Image(_) => "image",
        SimpleChatErrorKind::Builder(_) => "builder",
    }
}
