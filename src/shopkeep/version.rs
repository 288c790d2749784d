//! Data version counter.
//!
//! Published files carry the version as a JSON number with one decimal
//! (`"appVersion": 1.3`). Internally the counter is kept in tenths so that
//! repeated saves never accumulate floating-point drift: `1.0 -> 1.1 -> 1.2`
//! is exactly `10 -> 11 -> 12`.
//!
//! Parsing rules, applied to every source (published file, records, imports):
//! - values are rounded to the nearest tenth
//! - a zero version is treated as the initial version `1.0`
//! - negative or non-finite values are rejected

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u32);

impl Version {
    pub const INITIAL: Version = Version(10);

    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    pub const fn tenths(self) -> u32 {
        self.0
    }

    /// Parse a decimal version. Returns `None` for negative, non-finite or
    /// out-of-range input.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let tenths = (value * 10.0).round();
        if tenths > f64::from(u32::MAX) {
            return None;
        }
        match tenths as u32 {
            0 => Some(Self::INITIAL),
            t => Some(Self(t)),
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// The version that follows this one on save.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Version::from_f64(raw)
            .ok_or_else(|| de::Error::custom(format!("invalid version number: {}", raw)))
    }
}
