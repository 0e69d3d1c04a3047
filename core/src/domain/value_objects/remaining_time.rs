//! Human-readable durations used in guard error messages.

use serde::{Deserialize, Serialize};
use std::fmt;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// Time left on a live block, taken from the store TTL
///
/// Rendered as `"{m}m {s}s"` under an hour and `"{h}h {m}m"` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingTime(pub u64);

impl RemainingTime {
    pub fn seconds(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0;
        if secs >= SECONDS_PER_HOUR {
            let hours = secs / SECONDS_PER_HOUR;
            let minutes = (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
            write!(f, "{}h {}m", hours, minutes)
        } else {
            let minutes = secs / SECONDS_PER_MINUTE;
            write!(f, "{}m {}s", minutes, secs % SECONDS_PER_MINUTE)
        }
    }
}

/// Length of a freshly set block
///
/// Rendered in the largest whole unit: `"20 minutes"`, `"24 hours"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDuration(pub u64);

impl BlockDuration {
    pub fn seconds(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0;
        let (value, unit) = if secs >= SECONDS_PER_HOUR && secs % SECONDS_PER_HOUR == 0 {
            (secs / SECONDS_PER_HOUR, "hour")
        } else if secs >= SECONDS_PER_MINUTE && secs % SECONDS_PER_MINUTE == 0 {
            (secs / SECONDS_PER_MINUTE, "minute")
        } else {
            (secs, "second")
        };
        let plural = if value == 1 { "" } else { "s" };
        write!(f, "{} {}{}", value, unit, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_time_under_an_hour() {
        assert_eq!(RemainingTime(1199).to_string(), "19m 59s");
        assert_eq!(RemainingTime(45).to_string(), "0m 45s");
        assert_eq!(RemainingTime(0).to_string(), "0m 0s");
    }

    #[test]
    fn test_remaining_time_hours() {
        assert_eq!(RemainingTime(3600).to_string(), "1h 0m");
        assert_eq!(RemainingTime(86399).to_string(), "23h 59m");
    }

    #[test]
    fn test_block_duration_units() {
        assert_eq!(BlockDuration(1200).to_string(), "20 minutes");
        assert_eq!(BlockDuration(1800).to_string(), "30 minutes");
        assert_eq!(BlockDuration(86400).to_string(), "24 hours");
        assert_eq!(BlockDuration(3600).to_string(), "1 hour");
        assert_eq!(BlockDuration(90).to_string(), "90 seconds");
    }
}
