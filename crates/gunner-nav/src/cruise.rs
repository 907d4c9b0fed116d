//! Cruise control.

/// Acceleration (one unit, or zero) that moves `speed` toward `target`.
pub fn to_speed(speed: f64, target: f64) -> f64 {
    if speed > target {
        -1.0
    } else if speed < target {
        1.0
    } else {
        0.0
    }
}
