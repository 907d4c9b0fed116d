//! Bearing arithmetic shared by the gun, radar and fire gate.
//!
//! Bearings are degrees in `[0, 360)`. Differences are signed but are not
//! guaranteed to be the shortest rotation (see [`bearing_difference`]).

use crate::constants::{FULL_CIRCLE, HALF_CIRCLE};

/// Reduce any angle to `[0, 360)`.
pub fn normalize(angle: f64) -> f64 {
    let r = angle.rem_euclid(FULL_CIRCLE);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if r >= FULL_CIRCLE {
        0.0
    } else {
        r
    }
}

/// Signed rotation from `from` to `to`.
///
/// Differences larger than 180 in magnitude get 360 added, never subtracted:
/// a raw +270 comes back as +630 rather than -90. Both land on the same
/// bearing once normalized, and the tuned robot relies on exactly this
/// output, so it is left alone.
pub fn bearing_difference(from: f64, to: f64) -> f64 {
    let delta = to - from;
    if delta.abs() > HALF_CIRCLE {
        delta + FULL_CIRCLE
    } else {
        delta
    }
}

/// Rotation still needed to reach `to` after `already_turned` degrees have
/// been applied this tick by a frame we ride on.
pub fn bearing_correction(from: f64, to: f64, already_turned: f64) -> f64 {
    bearing_difference(from, to) - already_turned
}

/// Reduce an angle to the signed range `(-180, 180]`.
pub fn fold(angle: f64) -> f64 {
    let n = normalize(angle);
    if n > HALF_CIRCLE {
        n - FULL_CIRCLE
    } else {
        n
    }
}

/// Unsigned separation between two bearings, at most 180.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize(a - b);
    d.min(FULL_CIRCLE - d)
}

/// Whether `bearing` lies on the arc running clockwise (increasing) from
/// `start` to `end`, both ends included. `start > end` means the arc crosses
/// 0°.
pub fn within_arc(bearing: f64, start: f64, end: f64) -> bool {
    let bearing = normalize(bearing);
    let start = normalize(start);
    let end = normalize(end);
    if start <= end {
        bearing >= start && bearing <= end
    } else {
        bearing >= start || bearing <= end
    }
}
