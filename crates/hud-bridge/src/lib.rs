//! hud-bridge: MAVLink `VFR_HUD` and `WIND` telemetry translation
//!
//! Decoded messages come in from a `mavlink` connection; a [`Dispatcher`]
//! looks up the handler registered for the message id and publishes the
//! translated output on a [`telemetry_sink::PublishSink`]. [`VfrHudBridge`]
//! owns the registration table and [`Router`] is the host side that feeds it.

mod kinds;
pub use kinds::MessageKind;

mod error;
pub use error::{BridgeError, Result};

pub mod translate;
pub use translate::{translate_vfr_hud, translate_wind, Handler};

pub mod validate;

mod config;
pub use config::{load_config_file, parse_config, BridgeConfig, TopicConfig};

mod metrics;
pub use metrics::BridgeMetrics;

mod dispatcher;
pub use dispatcher::{Clock, DispatchOutcome, Dispatcher, HandlerEntry};

mod bridge;
pub use bridge::{BridgePlugin, VfrHudBridge};

mod router;
pub use router::Router;
