// SPDX-License-Identifier: AGPL-3.0-or-later

//! Numeric metric values
//!
//! A closed set of numeric kinds sharing one total order, so thresholds and
//! display bounds can be compared against any value regardless of how the
//! check produced it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Error, Result};

/// A metric value, bound or threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Signed integer
    Int(i64),
    /// Unsigned integer too large for `Int`
    UInt(u64),
    /// Floating point
    Float(f64),
}

impl Value {
    /// True for integer zero and for both float zeros
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::Int(v) => v == 0,
            Self::UInt(v) => v == 0,
            Self::Float(v) => v == 0.0,
        }
    }

    /// Lossy conversion, used when an integer meets a float
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::Int(v) => Some(v as i128),
            Self::UInt(v) => Some(v as i128),
            Self::Float(_) => None,
        }
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    // -0.0 == 0.0, NaN falls back to IEEE total order
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => compare_f64(self.as_f64(), other.as_f64()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // f64's Display is the shortest representation that round-trips
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

impl std::str::FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Self::Int(v));
        }
        if let Ok(v) = s.parse::<u64>() {
            return Ok(Self::UInt(v));
        }
        s.parse::<f64>()
            .map(Self::Float)
            .map_err(|_| Error::InvalidValue(format!("'{}' is not a number", s)))
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(v as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::UInt(v as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_shortest() {
        assert_eq!(Value::from(10).to_string(), "10");
        assert_eq!(Value::from(10.0).to_string(), "10");
        assert_eq!(Value::from(50.6).to_string(), "50.6");
        assert_eq!(Value::from(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Value::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Value::from(-3i32).to_string(), "-3");
    }

    #[test]
    fn test_mixed_ordering() {
        assert!(Value::from(3) < Value::from(3.5));
        assert!(Value::from(-1) < Value::from(0u8));
        assert!(Value::from(u64::MAX) > Value::from(i64::MAX));
        assert_eq!(Value::from(2), Value::from(2.0));
        assert_eq!(Value::from(0.0), Value::from(-0.0));
    }

    #[test]
    fn test_nan_is_ordered() {
        let nan = Value::from(f64::NAN);
        assert!(nan > Value::from(f64::INFINITY));
        assert_eq!(nan.cmp(&nan), Ordering::Equal);
    }

    #[test]
    fn test_is_zero() {
        assert!(Value::from(0).is_zero());
        assert!(Value::from(0u32).is_zero());
        assert!(Value::from(-0.0).is_zero());
        assert!(!Value::from(0.5).is_zero());
    }

    #[test]
    fn test_parse() {
        assert_eq!("42".parse::<Value>().unwrap(), Value::Int(42));
        assert!(matches!("18446744073709551615".parse::<Value>().unwrap(), Value::UInt(_)));
        assert!(matches!(" 1.5 ".parse::<Value>().unwrap(), Value::Float(_)));
        assert!("abc".parse::<Value>().is_err());
    }
}
