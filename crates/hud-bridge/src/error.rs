use telemetry_sink::SinkError;
use thiserror::Error;

use crate::MessageKind;

pub type Result<T, E = BridgeError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid {kind} input: {reason}")]
    InvalidInput { kind: MessageKind, reason: String },
    #[error("message id {id} already routed to {owner}")]
    DuplicateSubscription { id: u32, owner: String },
    #[error("publish failed: {0}")]
    Sink(#[from] SinkError),
    #[error("metrics error: {0}")]
    Metrics(String),
}
