use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::{BridgeError, Result};

#[derive(Clone)]
pub struct BridgeMetrics {
    pub registry: Registry,
    pub handled: IntCounterVec,
    pub ignored: IntCounter,
    pub rejected: IntCounterVec,
    pub published: IntCounterVec,
    pub publish_failures: IntCounterVec,
}

fn metrics_err(e: prometheus::Error) -> BridgeError {
    BridgeError::Metrics(format!("metrics init error: {e}"))
}

impl BridgeMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let handled = IntCounterVec::new(
            Opts::new(
                "mavbridge_messages_handled_total",
                "Messages routed to a translator",
            ),
            &["kind"],
        )
        .map_err(metrics_err)?;
        let ignored = IntCounter::new(
            "mavbridge_messages_ignored_total",
            "Messages with no registered handler",
        )
        .map_err(metrics_err)?;
        let rejected = IntCounterVec::new(
            Opts::new(
                "mavbridge_messages_rejected_total",
                "Messages rejected by input validation",
            ),
            &["kind"],
        )
        .map_err(metrics_err)?;
        let published = IntCounterVec::new(
            Opts::new(
                "mavbridge_messages_published_total",
                "Translated messages accepted by the sink",
            ),
            &["topic"],
        )
        .map_err(metrics_err)?;
        let publish_failures = IntCounterVec::new(
            Opts::new(
                "mavbridge_publish_failures_total",
                "Translated messages the sink refused",
            ),
            &["topic"],
        )
        .map_err(metrics_err)?;

        registry
            .register(Box::new(handled.clone()))
            .map_err(metrics_err)?;
        registry
            .register(Box::new(ignored.clone()))
            .map_err(metrics_err)?;
        registry
            .register(Box::new(rejected.clone()))
            .map_err(metrics_err)?;
        registry
            .register(Box::new(published.clone()))
            .map_err(metrics_err)?;
        registry
            .register(Box::new(publish_failures.clone()))
            .map_err(metrics_err)?;

        Ok(Self {
            registry,
            handled,
            ignored,
            rejected,
            published,
            publish_failures,
        })
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}
