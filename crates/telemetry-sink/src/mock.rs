use std::sync::Mutex;

use crate::{OutboundMessage, PublishSink, Published, Result, SinkError};

/// In-process sink that keeps every published message in memory.
#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<Published>>,
    reject_all: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every publish fails, for exercising the drop path.
    pub fn rejecting() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            reject_all: true,
        }
    }

    /// Snapshot of everything published so far, in order.
    pub fn published(&self) -> Vec<Published> {
        self.published
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Messages published on one topic, in order.
    pub fn on_topic(&self, topic: &str) -> Vec<OutboundMessage> {
        self.published()
            .into_iter()
            .filter(|p| p.topic == topic)
            .map(|p| p.message)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.published.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain and return everything recorded.
    pub fn take(&self) -> Vec<Published> {
        self.published
            .lock()
            .map(|mut p| std::mem::take(&mut *p))
            .unwrap_or_default()
    }
}

impl PublishSink for RecordingSink {
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<()> {
        if self.reject_all {
            return Err(SinkError::Disconnected(topic.to_string()));
        }
        let mut published = self
            .published
            .lock()
            .map_err(|_| SinkError::Disconnected("recording sink poisoned".into()))?;
        published.push(Published {
            topic: topic.to_string(),
            message,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vector3, WindEstimate};
    use time::OffsetDateTime;

    fn wind(x: f64) -> OutboundMessage {
        OutboundMessage::WindEstimate(WindEstimate {
            stamp: OffsetDateTime::UNIX_EPOCH,
            linear_velocity: Vector3::new(x, 0.0, 0.0),
        })
    }

    #[test]
    fn test_records_in_order() {
        let sink = RecordingSink::new();
        sink.publish("a", wind(1.0)).unwrap();
        sink.publish("b", wind(2.0)).unwrap();
        sink.publish("a", wind(3.0)).unwrap();

        assert_eq!(sink.len(), 3);
        let on_a = sink.on_topic("a");
        assert_eq!(on_a, vec![wind(1.0), wind(3.0)]);
    }

    #[test]
    fn test_take_drains() {
        let sink = RecordingSink::new();
        sink.publish("a", wind(1.0)).unwrap();
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_rejecting_sink_fails_and_records_nothing() {
        let sink = RecordingSink::rejecting();
        assert!(matches!(
            sink.publish("a", wind(1.0)),
            Err(SinkError::Disconnected(_))
        ));
        assert!(sink.is_empty());
    }
}
