//! Daylight-saving state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{AuditLogRecord, AuditSubject};

/// Current season of the ecosystem clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Standard (winter) time.
    Winter,
    /// Daylight-saving (summer) time.
    Summer,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => f.write_str("winter"),
            Season::Summer => f.write_str("summer"),
        }
    }
}

/// Daylight-saving state owned by the coordinator.
///
/// `scheduled` is set by every transition and never cleared here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaylightState {
    /// True while the ecosystem runs on winter time.
    pub is_winter_time: bool,
    /// Set once any transition has been applied.
    #[serde(default)]
    pub scheduled: bool,
}

impl DaylightState {
    /// State that has not transitioned yet.
    pub fn new(is_winter_time: bool) -> Self {
        Self {
            is_winter_time,
            scheduled: false,
        }
    }

    /// Season view of `is_winter_time`.
    pub fn season(&self) -> Season {
        if self.is_winter_time {
            Season::Winter
        } else {
            Season::Summer
        }
    }
}

/// Read side of the daylight state, as observed by Pool.
pub trait DaylightObserver {
    /// True while the ecosystem runs on winter time.
    fn is_winter_time(&self) -> bool;
    /// True once a transition has been scheduled.
    fn daylight_saving_scheduled(&self) -> bool;
}

impl DaylightObserver for DaylightState {
    fn is_winter_time(&self) -> bool {
        self.is_winter_time
    }

    fn daylight_saving_scheduled(&self) -> bool {
        self.scheduled
    }
}

/// Flips the season and produces the audit record for the flip.
///
/// Winter goes to summer with `ChangeToSummerTime`; summer goes to winter
/// with `ChangeToWinterTime`. The new state is always `scheduled`.
pub fn adjust_daylight_saving(
    current: DaylightState,
    timestamp: u64,
) -> (DaylightState, AuditLogRecord) {
    let subject = if current.is_winter_time {
        AuditSubject::ChangeToSummerTime
    } else {
        AuditSubject::ChangeToWinterTime
    };
    let next = DaylightState {
        is_winter_time: !current.is_winter_time,
        scheduled: true,
    };
    (next, AuditLogRecord::new(subject, timestamp))
}
