use std::time::Duration;

/// Default minimum interval between full temperature checks
pub const DEFAULT_MIN_RECHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Default sleep between polls while waiting for the GPU to cool
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(5);

/// Default maximum total wait; zero is the "unbounded" sentinel
pub const DEFAULT_MAX_WAIT: Duration = Duration::ZERO;

/// Default temperature above which the gate starts waiting, in °C
pub const DEFAULT_HIGH_THRESHOLD: i32 = 82;

/// Default temperature below which the gate stops waiting, in °C
pub const DEFAULT_LOW_THRESHOLD: i32 = 52;

/// Lowest configurable threshold, in °C
pub const THRESHOLD_MIN: i32 = 0;

/// Highest configurable threshold, in °C
pub const THRESHOLD_MAX: i32 = 125;

/// Temperature reported when the sensor cannot be read
///
/// Zero sits below any positive threshold, so a failed read never keeps the
/// gate waiting.
pub const FALLBACK_TEMPERATURE: i32 = 0;
