//! Events reported by the host for a single tick.
//!
//! Each field mirrors one host event kind. `None` means the event did not
//! occur this tick; that is not the same as `Some(vec![])`, which the host
//! should never send but which is tolerated.

use serde::{Deserialize, Serialize};

use crate::enums::EventKind;
use crate::types::{Broadcast, Hit, ScanReading};

/// All events delivered with one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickEvents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robot_scanned: Option<Vec<ScanReading>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub got_hit: Option<Vec<Hit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcasts: Option<Vec<Broadcast>>,
}

impl TickEvents {
    /// Events carrying only the given radar returns.
    pub fn scanned(readings: Vec<ScanReading>) -> Self {
        Self {
            robot_scanned: Some(readings),
            ..Default::default()
        }
    }

    /// Whether the host reported this kind of event at all.
    pub fn contains(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::RobotScanned => self.robot_scanned.is_some(),
            EventKind::GotHit => self.got_hit.is_some(),
            EventKind::Broadcasts => self.broadcasts.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.robot_scanned.is_none() && self.got_hit.is_none() && self.broadcasts.is_none()
    }

    /// The closest usable radar return, if any.
    ///
    /// Readings with a non-finite distance or bearing are skipped; negative
    /// distances are treated as point blank. A present but empty (or fully
    /// unusable) list yields `None`, same as no scan at all.
    pub fn nearest_contact(&self) -> Option<ScanReading> {
        let readings = self.robot_scanned.as_ref()?;
        let nearest = readings
            .iter()
            .filter(|r| r.distance.is_finite() && r.bearing.is_finite())
            .map(|r| ScanReading::new(r.distance.max(0.0), r.bearing))
            .min_by(|a, b| a.distance.total_cmp(&b.distance));

        if nearest.is_none() {
            log::warn!(
                "robot_scanned reported {} reading(s) but none usable; treating as no contact",
                readings.len()
            );
        }
        nearest
    }
}
