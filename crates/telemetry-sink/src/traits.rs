use std::sync::Arc;

use crate::{OutboundMessage, Result};

/// Destination for translated messages.
///
/// Publishing is fire-and-forget from the caller's side: an `Err` means this
/// one message was not delivered, nothing more. Implementations take `&self`
/// so a single sink can be shared between bridges.
pub trait PublishSink: Send + Sync {
    /// Publish one message on the named stream.
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<()>;
}

impl<S: PublishSink + ?Sized> PublishSink for Arc<S> {
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<()> {
        (**self).publish(topic, message)
    }
}

impl<S: PublishSink + ?Sized> PublishSink for Box<S> {
    fn publish(&self, topic: &str, message: OutboundMessage) -> Result<()> {
        (**self).publish(topic, message)
    }
}
