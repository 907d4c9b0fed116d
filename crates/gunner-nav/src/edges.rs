//! Wall proximity checks and the turns that steer away from walls.
//!
//! Headings follow the host convention: 0 = east, 90 = north (toward y = 0).

use gunner_core::state::TickSnapshot;

// --- Facing ---

pub fn facing_north(heading: f64) -> bool {
    heading < 180.0
}

pub fn facing_south(heading: f64) -> bool {
    heading >= 180.0
}

pub fn facing_east(heading: f64) -> bool {
    heading >= 270.0 || heading < 90.0
}

pub fn facing_west(heading: f64) -> bool {
    (90.0..270.0).contains(&heading)
}

// --- Proximity ---

/// Which wall the robot is closing on, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Right,
    Left,
    Top,
    Bottom,
}

/// First wall within `proximity` of the robot's body, checking right, left,
/// top, bottom in that order.
pub fn nearest_wall(snapshot: &TickSnapshot, proximity: f64) -> Option<Wall> {
    let left_edge = snapshot.position.x - snapshot.size;
    let right_edge = snapshot.position.x + snapshot.size;
    let top_edge = snapshot.position.y - snapshot.size;
    let bottom_edge = snapshot.position.y + snapshot.size;
    let field = snapshot.battlefield;

    if right_edge + proximity >= field.width {
        Some(Wall::Right)
    } else if left_edge - proximity <= 0.0 {
        Some(Wall::Left)
    } else if top_edge - proximity <= 0.0 {
        Some(Wall::Top)
    } else if bottom_edge + proximity >= field.height {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Turn that points the chassis away from `wall` given the current heading.
pub fn turn_away_from(wall: Wall, heading: f64, turn: f64) -> f64 {
    match wall {
        Wall::Right if facing_north(heading) => turn,
        Wall::Right => -turn,
        Wall::Left if facing_north(heading) => -turn,
        Wall::Left => turn,
        Wall::Top if facing_east(heading) => -turn,
        Wall::Top => turn,
        Wall::Bottom if facing_east(heading) => turn,
        Wall::Bottom => -turn,
    }
}

/// Chassis turn for edge avoidance, or `None` when no wall is near.
pub fn avoid_edges(snapshot: &TickSnapshot, proximity: f64, turn: f64) -> Option<f64> {
    let wall = nearest_wall(snapshot, proximity)?;
    Some(turn_away_from(wall, snapshot.chassis_heading, turn))
}
