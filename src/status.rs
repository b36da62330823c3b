// SPDX-License-Identifier: AGPL-3.0-or-later

//! Check status and the severity merge rule
//!
//! Monitoring systems read the plugin exit code as OK=0, WARNING=1,
//! CRITICAL=2, UNKNOWN=3. Aggregation does not follow that encoding: the
//! badness order is OK < WARNING < UNKNOWN < CRITICAL, and CRITICAL is
//! absorbing. [`Status`]'s `Ord` implements the badness order, and both
//! [`Status::merge`] and message sorting go through it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Result of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Everything is fine
    #[default]
    Ok,
    /// Above a warning threshold or otherwise degraded
    Warning,
    /// Above a critical threshold or down
    Critical,
    /// The check could not determine the state
    Unknown,
}

impl Status {
    /// All statuses, in exit code order
    pub const ALL: [Status; 4] = [Status::Ok, Status::Warning, Status::Critical, Status::Unknown];

    /// Plugin exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }

    /// Map an exit code to a status; anything outside 0..=3 is UNKNOWN.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::Warning,
            2 => Self::Critical,
            _ => Self::Unknown,
        }
    }

    /// Case-insensitive name lookup; unrecognised names are UNKNOWN.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("OK") {
            Self::Ok
        } else if name.eq_ignore_ascii_case("WARNING") {
            Self::Warning
        } else if name.eq_ignore_ascii_case("CRITICAL") {
            Self::Critical
        } else {
            Self::Unknown
        }
    }

    /// Upper-case name as printed in front of the plugin output
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Combine the current status with a proposed one.
    ///
    /// Once CRITICAL is reached nothing changes it; otherwise the worse of
    /// the two wins.
    pub fn merge(self, proposed: Status) -> Status {
        self.max(proposed)
    }

    /// Position in the badness order
    fn severity_rank(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Unknown => 2,
            Self::Critical => 3,
        }
    }
}

impl Ord for Status {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity_rank().cmp(&other.severity_rank())
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.code()
    }
}
