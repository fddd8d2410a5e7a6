use std::io::Write;
use std::sync::Mutex;

use crate::{OutboundMessage, PublishSink, Published, Result, SinkError};

/// Writes one JSON object per published message, newline separated.
pub struct JsonLinesSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|_| SinkError::Io("json sink writer poisoned".into()))
    }
}

/// Serialize a published item to a single JSON line without the newline.
pub fn encode_line(item: &Published) -> Result<String> {
    serde_json::to_string(item).map_err(|e| SinkError::Encode(e.to_string()))
}

impl<W: Write + Send> PublishSink for JsonLinesSink<W> {
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<()> {
        let line = encode_line(&Published {
            topic: topic.to_string(),
            message,
        })?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| SinkError::Io("json sink writer poisoned".into()))?;
        writeln!(out, "{line}").map_err(|e| SinkError::Io(e.to_string()))?;
        out.flush().map_err(|e| SinkError::Io(e.to_string()))
    }
}
