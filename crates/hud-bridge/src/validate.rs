//! Opt-in input checks, applied before translation when
//! `BridgeConfig::validate_inputs` is set.

use mavlink::ardupilotmega::MavMessage;

use crate::{BridgeError, MessageKind, Result};

const MAX_THROTTLE_PERCENT: u16 = 100;

/// Reject a single malformed message. Kinds without checks always pass.
pub fn check_message(message: &MavMessage) -> Result<()> {
    match message {
        MavMessage::VFR_HUD(hud) => {
            if hud.throttle > MAX_THROTTLE_PERCENT {
                return Err(invalid(
                    MessageKind::VfrHud,
                    format!("throttle {} exceeds {MAX_THROTTLE_PERCENT}%", hud.throttle),
                ));
            }
            finite(
                MessageKind::VfrHud,
                &[
                    ("airspeed", hud.airspeed),
                    ("groundspeed", hud.groundspeed),
                    ("alt", hud.alt),
                    ("climb", hud.climb),
                ],
            )
        }
        MavMessage::WIND(wind) => finite(
            MessageKind::Wind,
            &[
                ("direction", wind.direction),
                ("speed", wind.speed),
                ("speed_z", wind.speed_z),
            ],
        ),
        _ => Ok(()),
    }
}

fn finite(kind: MessageKind, fields: &[(&str, f32)]) -> Result<()> {
    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(invalid(kind, format!("{name} is not finite ({v})"))),
        None => Ok(()),
    }
}

fn invalid(kind: MessageKind, reason: String) -> BridgeError {
    BridgeError::InvalidInput { kind, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mavlink::ardupilotmega::{VFR_HUD_DATA, WIND_DATA};

    fn hud(throttle: u16, alt: f32) -> MavMessage {
        MavMessage::VFR_HUD(VFR_HUD_DATA {
            airspeed: 10.0,
            groundspeed: 9.0,
            alt,
            climb: 0.0,
            heading: 90,
            throttle,
        })
    }

    #[test]
    fn test_accepts_well_formed() {
        assert!(check_message(&hud(100, 50.0)).is_ok());
        assert!(check_message(&MavMessage::WIND(WIND_DATA {
            direction: 359.0,
            speed: 4.0,
            speed_z: -0.2,
        }))
        .is_ok());
    }

    #[test]
    fn test_rejects_throttle_over_100() {
        let err = check_message(&hud(101, 50.0)).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::InvalidInput {
                kind: MessageKind::VfrHud,
                ..
            }
        ));
        assert!(err.to_string().contains("throttle 101"));
    }

    #[test]
    fn test_rejects_non_finite_fields() {
        assert!(check_message(&hud(50, f32::INFINITY)).is_err());
        let err = check_message(&MavMessage::WIND(WIND_DATA {
            direction: f32::NAN,
            speed: 1.0,
            speed_z: 0.0,
        }))
        .unwrap_err();
        assert!(err.to_string().contains("direction"));
    }
}
