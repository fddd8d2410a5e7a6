use mavlink::ardupilotmega::WIND_DATA;
use telemetry_sink::{Vector3, WindEstimate};
use time::OffsetDateTime;

/// Translate an ArduPilot `WIND` estimate into a velocity vector.
///
/// `direction` is the compass bearing the wind blows from. The horizontal
/// components are `speed * sin(course)` on x and `speed * cos(course)` on y;
/// `speed_z` passes through as z.
// TODO: confirm whether x/y are meant as east/north (ENU) or north/east (NED)
// against an ArduPilot SITL capture before changing the formula.
pub fn translate_wind(wind: &WIND_DATA, stamp: OffsetDateTime) -> WindEstimate {
    let speed = f64::from(wind.speed);
    let course = f64::from(wind.direction).to_radians();

    WindEstimate {
        stamp,
        linear_velocity: Vector3 {
            x: speed * course.sin(),
            y: speed * course.cos(),
            z: f64::from(wind.speed_z),
        },
    }
}
