//! Controller constants and tuning parameters.
//!
//! These are the defaults behind `ControllerConfig`; everything here can be
//! overridden per robot through configuration.

/// Full circle in degrees. All bearings live in `[0, FULL_CIRCLE)`.
pub const FULL_CIRCLE: f64 = 360.0;

/// Half circle in degrees.
pub const HALF_CIRCLE: f64 = 180.0;

// --- Radar search ---

/// Sweep amplitudes (degrees), widest first. Each consecutive contact
/// narrows the sweep by one band.
pub const SEARCH_BANDS: [f64; 6] = [60.0, 50.0, 40.0, 30.0, 20.0, 10.0];

/// Band index at which the radar counts as locked.
///
/// At 0 every band is locked, so the first contact already hands off to the
/// fire gate and the "narrow before firing" gate never engages. Kept as-is
/// to match the tuned robot; raise it to require narrowing first.
pub const LOCK_THRESHOLD: usize = 0;

// --- Fire control ---

/// Highest shot power that does not overheat the gun.
pub const HEAT_LIMIT: f64 = 3.0;

/// Distance over which shot power decays from `HEAT_LIMIT` to `MINIMUM_POWER`.
pub const DECAY_RANGE: f64 = 700.0;

/// Power floor for any shot.
pub const MINIMUM_POWER: f64 = 0.2;

/// Degrees the gun is nudged per tick while sweeping a locked arc.
pub const GUN_NUDGE: f64 = 1.0;

// --- Chassis ---

/// Cruising speed the chassis accelerates toward.
pub const MAX_SPEED: f64 = 8.0;

/// Distance from a wall at which edge avoidance takes over.
pub const NEAR_EDGE_PROXIMITY: f64 = 30.0;

/// Chassis turn (degrees) issued while steering away from a wall.
pub const EDGE_TURN: f64 = 10.0;

/// Chassis turn rate (degrees per tick) while zig-zagging.
pub const ZIG_TURN_SPEED: f64 = 10.0;

/// Shortest zig leg in ticks.
pub const ZIG_DECISION_MIN: u32 = 4;

/// Longest zig leg in ticks (inclusive).
pub const ZIG_DECISION_MAX: u32 = 20;

/// Default navigator seed.
pub const DEFAULT_SEED: u64 = 42;
