//! Radar sweep controller: the search/lock state machine.
//!
//! Every tick falls into exactly one [`SweepCase`]:
//!
//! - **Search**: nothing seen this tick or last. Widest band, clockwise.
//! - **Contact**: something seen this tick. Snap the gun onto the radar (not
//!   yet locked) or hand the swept arc to the fire gate (locked), then zone
//!   in: reverse the sweep and narrow it by one band.
//! - **Dropout**: seen last tick only. Repeat the previous sweep unchanged,
//!   so a single missed sweep does not throw the lock away.
//!
//! The band index only grows while contact holds and snaps back to 0 only
//! when two consecutive ticks pass without contact.

use serde::Serialize;

use gunner_core::angles::{angular_distance, normalize, within_arc};
use gunner_core::config::ControllerConfig;
use gunner_core::enums::{SweepCase, SweepDirection};

use crate::gun::GunStabilizer;

/// Sweep bookkeeping carried across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SweepState {
    pub band_index: usize,
    pub direction: SweepDirection,
    pub contact_this_tick: bool,
    pub contact_previous_tick: bool,
}

/// The bearing interval the radar covered during the sweep that produced a
/// contact. Runs clockwise from `start` to `end`; `start > end` crosses 0°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContactArc {
    pub start: f64,
    pub end: f64,
}

impl ContactArc {
    pub fn contains(&self, bearing: f64) -> bool {
        within_arc(bearing, self.start, self.end)
    }

    /// The arc boundary angularly closest to `bearing` (start wins ties).
    pub fn closer_boundary(&self, bearing: f64) -> f64 {
        if angular_distance(bearing, self.start) <= angular_distance(bearing, self.end) {
            self.start
        } else {
            self.end
        }
    }
}

/// What the radar decided this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepUpdate {
    pub case: SweepCase,
    /// Lock state going into this tick, before any narrowing.
    pub locked: bool,
    /// World-frame radar rotation wanted this tick, before gun compensation.
    pub radar_step: f64,
    /// Arc to hand to the fire gate when a locked contact was seen.
    pub engage: Option<ContactArc>,
}

#[derive(Debug, Clone)]
pub struct RadarSweepController {
    bands: Vec<f64>,
    lock_threshold: usize,
    state: SweepState,
    /// Radar heading observed on the previous tick.
    last_radar_heading: f64,
}

impl RadarSweepController {
    /// Start in search: widest band, clockwise, no contact memory.
    ///
    /// `bands` must be non-empty; [`ControllerConfig::validate`] guarantees it.
    pub fn new(bands: Vec<f64>, lock_threshold: usize) -> Self {
        Self {
            bands,
            lock_threshold,
            state: SweepState {
                band_index: 0,
                direction: SweepDirection::Clockwise,
                contact_this_tick: false,
                contact_previous_tick: false,
            },
            last_radar_heading: 0.0,
        }
    }

    pub fn from_config(config: &ControllerConfig) -> Self {
        Self::new(config.search_bands.clone(), config.lock_threshold)
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state.band_index >= self.lock_threshold
    }

    /// Sweep amplitude for a band, clamped to the table.
    pub fn band_amplitude(&self, band_index: usize) -> f64 {
        let last = self.bands.len().saturating_sub(1);
        self.bands.get(band_index.min(last)).copied().unwrap_or(0.0)
    }

    /// Record whether this tick's snapshot carried a usable contact.
    pub fn observe_contact(&mut self, contact: bool) {
        self.state.contact_this_tick = contact;
    }

    /// Arc swept between the previous tick's radar heading and `radar_heading`,
    /// oriented by the sweep direction that was in force.
    pub fn contact_arc(&self, radar_heading: f64) -> ContactArc {
        let previous = self.last_radar_heading;
        let current = normalize(radar_heading);
        match self.state.direction {
            SweepDirection::Clockwise => ContactArc {
                start: previous,
                end: current,
            },
            SweepDirection::CounterClockwise => ContactArc {
                start: current,
                end: previous,
            },
        }
    }

    /// Run the state machine for this tick.
    ///
    /// Call after [`observe_contact`](Self::observe_contact) and before
    /// [`end_tick`](Self::end_tick). Lock snapping goes through `gun`.
    pub fn advance(&mut self, radar_heading: f64, gun: &mut GunStabilizer) -> SweepUpdate {
        let radar_heading = normalize(radar_heading);
        let case = SweepCase::classify(
            self.state.contact_this_tick,
            self.state.contact_previous_tick,
        );
        let locked = self.is_locked();
        let mut engage = None;

        match case {
            SweepCase::Search => {
                if self.state.band_index != 0 {
                    log::info!("contact lost; resuming wide search");
                }
                self.state.direction = SweepDirection::Clockwise;
                self.state.band_index = 0;
            }
            SweepCase::Contact => {
                if !self.state.contact_previous_tick {
                    log::info!("contact acquired at radar bearing {radar_heading:.1}");
                }
                if locked {
                    engage = Some(self.contact_arc(radar_heading));
                } else {
                    gun.point_at(radar_heading);
                }
                self.zone_in();
            }
            SweepCase::Dropout => {
                log::debug!(
                    "contact dropped for one sweep; holding band {}",
                    self.state.band_index
                );
            }
        }

        let radar_step = self.sweep_step();
        self.last_radar_heading = radar_heading;

        log::debug!(
            "radar {case:?}: band {} dir {:?} step {radar_step}",
            self.state.band_index,
            self.state.direction
        );

        SweepUpdate {
            case,
            locked,
            radar_step,
            engage,
        }
    }

    /// Shift the contact memory for the next tick.
    pub fn end_tick(&mut self) {
        self.state.contact_previous_tick = self.state.contact_this_tick;
        self.state.contact_this_tick = false;
    }

    /// Reverse the sweep and narrow it by one band.
    fn zone_in(&mut self) {
        self.state.direction = self.state.direction.flipped();
        let last = self.bands.len().saturating_sub(1);
        self.state.band_index = (self.state.band_index + 1).min(last);
    }

    /// Rotation for the current band and direction.
    fn sweep_step(&self) -> f64 {
        self.band_amplitude(self.state.band_index) * self.state.direction.sign()
    }
}
