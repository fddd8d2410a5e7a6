//! telemetry-sink: application-facing telemetry messages and publish sinks
//!
//! This crate defines the messages a bridge produces and the [`PublishSink`]
//! trait they are delivered through. The default build enables an in-memory
//! `mock` sink for tests and a `json` lines sink for command-line hosts.

mod types;
pub use types::{OutboundMessage, Published, Vector3, VfrHudReport, WindEstimate};

mod error;
pub use error::{Result, SinkError};

mod traits;
pub use traits::PublishSink;

mod channel;
pub use channel::ChannelSink;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::RecordingSink;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "json")]
pub use json::{encode_line, JsonLinesSink};
