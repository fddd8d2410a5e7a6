use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Cartesian vector, components in m/s when used as a velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// HUD summary of the vehicle's air data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VfrHudReport {
    #[serde(with = "time::serde::rfc3339")]
    pub stamp: OffsetDateTime,
    /// m/s
    pub airspeed: f32,
    /// m/s
    pub groundspeed: f32,
    /// Compass heading in degrees
    pub heading: i16,
    /// Normalized throttle, 0.0..=1.0 for well-formed input
    pub throttle: f32,
    /// m
    pub altitude: f32,
    /// m/s
    pub climb: f32,
}

/// Wind velocity estimate in the local horizontal frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindEstimate {
    #[serde(with = "time::serde::rfc3339")]
    pub stamp: OffsetDateTime,
    pub linear_velocity: Vector3,
}

/// Every message kind a bridge can hand to a sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    VfrHud(VfrHudReport),
    WindEstimate(WindEstimate),
}

impl OutboundMessage {
    pub fn stamp(&self) -> OffsetDateTime {
        match self {
            OutboundMessage::VfrHud(m) => m.stamp,
            OutboundMessage::WindEstimate(m) => m.stamp,
        }
    }

    pub fn as_vfr_hud(&self) -> Option<&VfrHudReport> {
        match self {
            OutboundMessage::VfrHud(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_wind_estimate(&self) -> Option<&WindEstimate> {
        match self {
            OutboundMessage::WindEstimate(m) => Some(m),
            _ => None,
        }
    }
}

impl From<VfrHudReport> for OutboundMessage {
    fn from(m: VfrHudReport) -> Self {
        OutboundMessage::VfrHud(m)
    }
}

impl From<WindEstimate> for OutboundMessage {
    fn from(m: WindEstimate) -> Self {
        OutboundMessage::WindEstimate(m)
    }
}

/// A message together with the stream it was published on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Published {
    pub topic: String,
    pub message: OutboundMessage,
}
