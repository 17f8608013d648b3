//! Capacity and length bounds
//!
//! A capacity is persistent: every insert is checked against it. A length
//! target is a one-shot trim. Both clamp negative input to zero, but loose
//! "not a number" input is read differently:
//!
//! | input      | capacity          | length target |
//! |------------|-------------------|---------------|
//! | `NaN`      | unbounded         | 0             |
//! | negative   | 0                 | 0             |
//! | `2.7`      | 2                 | 2             |
//! | `+inf`     | unbounded         | `usize::MAX`  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on the number of live entries in a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCapacity", into = "RawCapacity")]
pub enum Capacity {
    /// No limit; cropping never triggers on insert
    #[default]
    Unbounded,

    /// At most this many entries
    Bounded(usize),
}

impl Capacity {
    /// Bounded capacity of `n` entries
    pub fn bounded(n: usize) -> Self {
        Capacity::Bounded(n)
    }

    /// Capacity from a signed count, clamping negatives to zero
    pub fn from_signed(n: i64) -> Self {
        Capacity::Bounded(n.max(0) as usize)
    }

    /// Capacity from a loose float.
    ///
    /// `NaN` and `+inf` are unbounded, negatives clamp to zero and fractions
    /// are floored.
    pub fn from_f64(raw: f64) -> Self {
        if raw.is_nan() || raw == f64::INFINITY {
            Capacity::Unbounded
        } else if raw <= 0.0 {
            Capacity::Bounded(0)
        } else {
            Capacity::Bounded(raw.floor() as usize)
        }
    }

    /// The numeric limit, or `None` when unbounded
    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Unbounded => None,
            Capacity::Bounded(n) => Some(*n),
        }
    }

    /// Whether this capacity never evicts
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Capacity::Unbounded)
    }
}

impl From<usize> for Capacity {
    fn from(n: usize) -> Self {
        Capacity::Bounded(n)
    }
}

impl From<Option<usize>> for Capacity {
    fn from(n: Option<usize>) -> Self {
        n.map_or(Capacity::Unbounded, Capacity::Bounded)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Unbounded => write!(f, "unbounded"),
            Capacity::Bounded(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for Capacity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("unbounded") || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Capacity::Unbounded);
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Capacity::from_signed(n));
        }
        // f64 parsing also accepts "nan" and "inf"
        trimmed
            .parse::<f64>()
            .map(Capacity::from_f64)
            .map_err(|_| Error::InvalidCapacity(s.to_string()))
    }
}

/// Wire shape of a capacity in config files
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCapacity {
    Unbounded,
    Count(i64),
    Fraction(f64),
    Text(String),
}

impl TryFrom<RawCapacity> for Capacity {
    type Error = Error;

    fn try_from(raw: RawCapacity) -> Result<Self> {
        match raw {
            RawCapacity::Unbounded => Ok(Capacity::Unbounded),
            RawCapacity::Count(n) => Ok(Capacity::from_signed(n)),
            RawCapacity::Fraction(f) => Ok(Capacity::from_f64(f)),
            RawCapacity::Text(s) => s.parse(),
        }
    }
}

impl From<Capacity> for RawCapacity {
    fn from(cap: Capacity) -> Self {
        match cap {
            Capacity::Unbounded => RawCapacity::Unbounded,
            Capacity::Bounded(n) => RawCapacity::Count(i64::try_from(n).unwrap_or(i64::MAX)),
        }
    }
}

/// Length target from a signed count, clamping negatives to zero
pub fn len_from_signed(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

/// Clamp a loose float to a length target.
///
/// Unlike [`Capacity::from_f64`], `NaN` trims everything.
pub fn clamp_len(raw: f64) -> usize {
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        // saturating cast
        raw.trunc() as usize
    }
}

/// Parse a length target from text
pub fn parse_len(s: &str) -> Result<usize> {
    let trimmed = s.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        return Ok(n);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(len_from_signed(n));
    }
    trimmed
        .parse::<f64>()
        .map(clamp_len)
        .map_err(|_| Error::InvalidLength(s.to_string()))
}
