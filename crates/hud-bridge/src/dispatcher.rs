//! Message-kind registration table and the lookup-and-invoke step.
//!
//! The table is built once from a list of [`HandlerEntry`] values and never
//! changes afterwards, so a `Dispatcher` can be shared across threads and
//! dispatched from through `&self`.

use std::collections::HashMap;
use std::sync::Arc;

use mavlink::ardupilotmega::MavMessage;
use mavlink::Message;
use telemetry_sink::{PublishSink, SinkError};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::config::TopicConfig;
use crate::translate::Handler;
use crate::{validate, BridgeError, BridgeMetrics, MessageKind};

/// Source of translation stamps.
pub type Clock = fn() -> OffsetDateTime;

/// One row of the registration table.
#[derive(Clone, Copy)]
pub struct HandlerEntry {
    pub kind: MessageKind,
    pub handler: Handler,
}

impl HandlerEntry {
    pub fn new(kind: MessageKind, handler: Handler) -> Self {
        Self { kind, handler }
    }

    pub fn id(&self) -> u32 {
        self.kind.id()
    }
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// What happened to one incoming message.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// No handler is registered for the message kind.
    Ignored,
    /// A handler ran. `dropped` counts outputs the sink refused.
    Handled { published: usize, dropped: usize },
    /// Input validation refused the message; nothing was published.
    Rejected(BridgeError),
    /// The sink is gone for good; the host should stop feeding messages.
    SinkClosed(BridgeError),
}

impl DispatchOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, DispatchOutcome::Ignored)
    }

    pub fn is_sink_closed(&self) -> bool {
        matches!(self, DispatchOutcome::SinkClosed(_))
    }

    pub fn published(&self) -> usize {
        match self {
            DispatchOutcome::Handled { published, .. } => *published,
            _ => 0,
        }
    }
}

pub struct Dispatcher {
    entries: Vec<HandlerEntry>,
    index: HashMap<u32, usize>,
    sink: Arc<dyn PublishSink>,
    topics: TopicConfig,
    validate_inputs: bool,
    clock: Clock,
    metrics: Option<BridgeMetrics>,
}

impl Dispatcher {
    /// Build the lookup table. If two entries name the same kind the first one wins.
    pub fn new(entries: Vec<HandlerEntry>, sink: Arc<dyn PublishSink>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.contains_key(&entry.id()) {
                warn!(kind = %entry.kind, "duplicate handler entry ignored");
                continue;
            }
            index.insert(entry.id(), i);
        }
        Self {
            entries,
            index,
            sink,
            topics: TopicConfig::default(),
            validate_inputs: false,
            clock: OffsetDateTime::now_utc,
            metrics: None,
        }
    }

    pub fn with_topics(mut self, topics: TopicConfig) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_inputs = enabled;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: BridgeMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Registration table in the order it was given.
    pub fn entries(&self) -> &[HandlerEntry] {
        &self.entries
    }

    pub fn handles(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    pub fn topics(&self) -> &TopicConfig {
        &self.topics
    }

    /// Route one decoded message to its handler and publish the results.
    pub fn dispatch(&self, message: &MavMessage) -> DispatchOutcome {
        let id = message.message_id();
        let Some(entry) = self
            .index
            .get(&id)
            .and_then(|&i| self.entries.get(i))
            .copied()
        else {
            debug!(id, name = message.message_name(), "no handler registered");
            if let Some(m) = &self.metrics {
                m.ignored.inc();
            }
            return DispatchOutcome::Ignored;
        };

        if self.validate_inputs {
            if let Err(e) = validate::check_message(message) {
                warn!(kind = %entry.kind, error = %e, "rejecting message");
                if let Some(m) = &self.metrics {
                    m.rejected.with_label_values(&[entry.kind.label()]).inc();
                }
                return DispatchOutcome::Rejected(e);
            }
        }

        let stamp = (self.clock)();
        let outputs = (entry.handler)(message, stamp);
        if let Some(m) = &self.metrics {
            m.handled.with_label_values(&[entry.kind.label()]).inc();
        }
        debug!(kind = %entry.kind, outputs = outputs.len(), "translated");

        let mut published = 0;
        let mut dropped = 0;
        for output in outputs {
            let topic = self.topics.topic_for(&output);
            match self.sink.publish(topic, output) {
                Ok(()) => {
                    published += 1;
                    if let Some(m) = &self.metrics {
                        m.published.with_label_values(&[topic]).inc();
                    }
                }
                Err(e) => {
                    if let Some(m) = &self.metrics {
                        m.publish_failures.with_label_values(&[topic]).inc();
                    }
                    if matches!(e, SinkError::Disconnected(_)) {
                        warn!(%topic, error = %e, "sink closed");
                        return DispatchOutcome::SinkClosed(e.into());
                    }
                    dropped += 1;
                    warn!(%topic, error = %e, "publish failed, message dropped");
                }
            }
        }
        DispatchOutcome::Handled { published, dropped }
    }
}
