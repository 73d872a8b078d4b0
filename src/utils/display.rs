//! Utilities related to displaying things.

use std::fmt;
use std::time::Duration;

/// Utility struct for displaying a duration as minutes with one decimal place.
pub struct MinutesFormat(pub Duration);

impl fmt::Display for MinutesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0.as_secs_f64() / 60.0)
    }
}
