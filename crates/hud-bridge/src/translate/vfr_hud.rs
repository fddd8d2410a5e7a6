use mavlink::ardupilotmega::VFR_HUD_DATA;
use telemetry_sink::VfrHudReport;
use time::OffsetDateTime;

/// Translate a `VFR_HUD` into a report.
///
/// Throttle arrives as a percentage (0..100 by protocol contract) and is scaled
/// to 0.0..1.0. Values above 100 are scaled the same way, not clamped.
pub fn translate_vfr_hud(hud: &VFR_HUD_DATA, stamp: OffsetDateTime) -> VfrHudReport {
    VfrHudReport {
        stamp,
        airspeed: hud.airspeed,
        groundspeed: hud.groundspeed,
        heading: hud.heading,
        throttle: (f64::from(hud.throttle) / 100.0) as f32,
        altitude: hud.alt,
        climb: hud.climb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hud(throttle: u16) -> VFR_HUD_DATA {
        VFR_HUD_DATA {
            airspeed: 12.5,
            groundspeed: 11.0,
            alt: 120.3,
            climb: 0.5,
            heading: 180,
            throttle,
        }
    }

    #[test]
    fn test_cruise_report() {
        let stamp = OffsetDateTime::UNIX_EPOCH;
        let out = translate_vfr_hud(&hud(75), stamp);
        assert_eq!(
            out,
            VfrHudReport {
                stamp,
                airspeed: 12.5,
                groundspeed: 11.0,
                heading: 180,
                throttle: 0.75,
                altitude: 120.3,
                climb: 0.5,
            }
        );
    }

    #[test]
    fn test_throttle_bounds() {
        let stamp = OffsetDateTime::UNIX_EPOCH;
        assert_eq!(translate_vfr_hud(&hud(0), stamp).throttle, 0.0);
        assert_eq!(translate_vfr_hud(&hud(100), stamp).throttle, 1.0);
    }

    #[test]
    fn test_throttle_scaling_over_full_range() {
        let stamp = OffsetDateTime::UNIX_EPOCH;
        for t in 0..=100u16 {
            let out = translate_vfr_hud(&hud(t), stamp).throttle;
            assert_eq!(out, (f64::from(t) / 100.0) as f32);
            assert!((0.0..=1.0).contains(&out));
        }
    }

    #[test]
    fn test_out_of_range_throttle_passes_through() {
        let out = translate_vfr_hud(&hud(250), OffsetDateTime::UNIX_EPOCH);
        assert_eq!(out.throttle, 2.5);
    }

    #[test]
    fn test_negative_heading_and_nan_pass_through() {
        let mut input = hud(10);
        input.heading = -1;
        input.climb = f32::NAN;
        let out = translate_vfr_hud(&input, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(out.heading, -1);
        assert!(out.climb.is_nan());
    }
}
