use thiserror::Error;

pub type Result<T, E = SinkError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("queue full on {topic} (capacity {capacity})")]
    QueueFull { topic: String, capacity: usize },
    #[error("sink disconnected: {0}")]
    Disconnected(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("encode error: {0}")]
    Encode(String),
}
