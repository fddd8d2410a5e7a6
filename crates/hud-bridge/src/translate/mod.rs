//! Per-kind translators and the handler adapters the dispatcher calls.
//!
//! Translators are pure: the stamp is captured by the caller and passed in.

mod vfr_hud;
mod wind;

pub use vfr_hud::translate_vfr_hud;
pub use wind::translate_wind;

use mavlink::ardupilotmega::MavMessage;
use telemetry_sink::OutboundMessage;
use time::OffsetDateTime;

/// Handler signature stored in the registration table.
///
/// Returns the translated messages, or nothing when the payload is not the
/// variant the handler was registered for.
pub type Handler = fn(&MavMessage, OffsetDateTime) -> Vec<OutboundMessage>;

pub fn handle_vfr_hud(message: &MavMessage, stamp: OffsetDateTime) -> Vec<OutboundMessage> {
    match message {
        MavMessage::VFR_HUD(hud) => vec![translate_vfr_hud(hud, stamp).into()],
        _ => Vec::new(),
    }
}

pub fn handle_wind(message: &MavMessage, stamp: OffsetDateTime) -> Vec<OutboundMessage> {
    match message {
        MavMessage::WIND(wind) => vec![translate_wind(wind, stamp).into()],
        _ => Vec::new(),
    }
}
