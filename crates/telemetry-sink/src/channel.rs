use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use tracing::debug;

use crate::{OutboundMessage, PublishSink, Published, Result, SinkError};

/// Bounded queue between the dispatching thread and a consumer.
///
/// A full queue drops the new message instead of blocking the dispatcher.
pub struct ChannelSink {
    tx: SyncSender<Published>,
    capacity: usize,
}

impl ChannelSink {
    /// Create a sink and the receiving end. A zero capacity is raised to 1.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Published>) {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self { tx, capacity }, rx)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl PublishSink for ChannelSink {
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<()> {
        let item = Published {
            topic: topic.to_string(),
            message,
        };
        self.tx.try_send(item).map_err(|e| match e {
            TrySendError::Full(_) => {
                debug!(topic, capacity = self.capacity, "publish queue full");
                SinkError::QueueFull {
                    topic: topic.to_string(),
                    capacity: self.capacity,
                }
            }
            TrySendError::Disconnected(_) => SinkError::Disconnected(topic.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vector3, WindEstimate};
    use time::OffsetDateTime;

    fn wind() -> OutboundMessage {
        OutboundMessage::WindEstimate(WindEstimate {
            stamp: OffsetDateTime::UNIX_EPOCH,
            linear_velocity: Vector3::default(),
        })
    }

    #[test]
    fn test_delivers_until_full() {
        let (sink, rx) = ChannelSink::bounded(2);
        sink.publish("wind_estimation", wind()).unwrap();
        sink.publish("wind_estimation", wind()).unwrap();

        let err = sink.publish("wind_estimation", wind()).unwrap_err();
        assert!(matches!(err, SinkError::QueueFull { capacity: 2, .. }));

        let first = rx.recv().unwrap();
        assert_eq!(first.topic, "wind_estimation");
        // Room again after draining one.
        sink.publish("wind_estimation", wind()).unwrap();
    }

    #[test]
    fn test_disconnected_receiver() {
        let (sink, rx) = ChannelSink::bounded(4);
        drop(rx);
        assert!(matches!(
            sink.publish("vfr_hud", wind()),
            Err(SinkError::Disconnected(_))
        ));
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let (sink, _rx) = ChannelSink::bounded(0);
        assert_eq!(sink.capacity(), 1);
        sink.publish("vfr_hud", wind()).unwrap();
    }
}
