// SPDX-License-Identifier: AGPL-3.0-or-later

//! Warning and critical thresholds
//!
//! Each of the four bounds is optional on its own, so open ranges such as
//! "critical above 90, no warning" are expressed by leaving bounds out
//! rather than with sentinel values. A value outside a range (strictly below
//! its min or strictly above its max) violates it; a value sitting exactly on
//! a bound does not.
//!
//! # Examples
//!
//! ```
//! use monitoring_plugin::{Status, Thresholds};
//!
//! let thresholds = Thresholds::new(0, 80, 0, 90);
//! assert_eq!(thresholds.check_value(85), Status::Warning);
//! assert_eq!(thresholds.warning(), "80");
//!
//! let parsed = Thresholds::from_ranges("~:80", "~:95").unwrap();
//! assert_eq!(parsed.check_value(96), Status::Critical);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::Status;
use crate::value::Value;

/// Threshold validation and parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("warning min and max are invalid")]
    WarningRange,
    #[error("critical min and max are invalid")]
    CriticalRange,
    #[error("critical and warning min are invalid")]
    MinOrder,
    #[error("critical and warning max are invalid")]
    MaxOrder,
    #[error("cannot parse range '{0}'")]
    Parse(String),
}

/// Warning and critical ranges of a metric
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_max: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_max: Option<Value>,
}

impl Thresholds {
    /// Thresholds with all four bounds set
    pub fn new(
        warning_min: impl Into<Value>,
        warning_max: impl Into<Value>,
        critical_min: impl Into<Value>,
        critical_max: impl Into<Value>,
    ) -> Self {
        Self {
            warning_min: Some(warning_min.into()),
            warning_max: Some(warning_max.into()),
            critical_min: Some(critical_min.into()),
            critical_max: Some(critical_max.into()),
        }
    }

    /// Parse Nagios range strings, e.g. `"80"`, `"~:80"`, `"10:"`, `"10:80"`.
    ///
    /// An empty string leaves that severity unset. The result is validated.
    pub fn from_ranges(warning: &str, critical: &str) -> Result<Self, ThresholdError> {
        let (warning_min, warning_max) = parse_range(warning)?;
        let (critical_min, critical_max) = parse_range(critical)?;
        let thresholds = Self {
            warning_min,
            warning_max,
            critical_min,
            critical_max,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn with_warning_min(mut self, v: impl Into<Value>) -> Self {
        self.warning_min = Some(v.into());
        self
    }

    pub fn with_warning_max(mut self, v: impl Into<Value>) -> Self {
        self.warning_max = Some(v.into());
        self
    }

    pub fn with_critical_min(mut self, v: impl Into<Value>) -> Self {
        self.critical_min = Some(v.into());
        self
    }

    pub fn with_critical_max(mut self, v: impl Into<Value>) -> Self {
        self.critical_max = Some(v.into());
        self
    }

    /// Keep only the selected warning bounds; disabled bounds are dropped.
    pub fn use_warning(mut self, use_min: bool, use_max: bool) -> Self {
        if !use_min {
            self.warning_min = None;
        }
        if !use_max {
            self.warning_max = None;
        }
        self
    }

    /// Keep only the selected critical bounds; disabled bounds are dropped.
    pub fn use_critical(mut self, use_min: bool, use_max: bool) -> Self {
        if !use_min {
            self.critical_min = None;
        }
        if !use_max {
            self.critical_max = None;
        }
        self
    }

    pub fn has_warning(&self) -> bool {
        self.warning_min.is_some() || self.warning_max.is_some()
    }

    pub fn has_critical(&self) -> bool {
        self.critical_min.is_some() || self.critical_max.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_warning() && !self.has_critical()
    }

    /// Check the bound ordering, reporting the first violation found.
    ///
    /// The critical range may not lie strictly inside the warning range.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if let (Some(min), Some(max)) = (self.warning_min, self.warning_max) {
            if min > max {
                return Err(ThresholdError::WarningRange);
            }
        }
        if let (Some(min), Some(max)) = (self.critical_min, self.critical_max) {
            if min > max {
                return Err(ThresholdError::CriticalRange);
            }
        }
        if let (Some(crit), Some(warn)) = (self.critical_min, self.warning_min) {
            if crit > warn {
                return Err(ThresholdError::MinOrder);
            }
        }
        if let (Some(warn), Some(crit)) = (self.warning_max, self.critical_max) {
            if crit < warn {
                return Err(ThresholdError::MaxOrder);
            }
        }
        Ok(())
    }

    /// Status of `value` against these thresholds; critical bounds win.
    pub fn check_value(&self, value: impl Into<Value>) -> Status {
        let value = value.into();
        let below = |bound: Option<Value>| bound.is_some_and(|min| value < min);
        let above = |bound: Option<Value>| bound.is_some_and(|max| value > max);

        if below(self.critical_min) || above(self.critical_max) {
            Status::Critical
        } else if below(self.warning_min) || above(self.warning_max) {
            Status::Warning
        } else {
            Status::Ok
        }
    }

    /// Warning range in perfdata syntax
    pub fn warning(&self) -> String {
        format_range(self.warning_min, self.warning_max)
    }

    /// Critical range in perfdata syntax
    pub fn critical(&self) -> String {
        format_range(self.critical_min, self.critical_max)
    }
}

fn format_range(min: Option<Value>, max: Option<Value>) -> String {
    match (min, max) {
        (None, None) => String::new(),
        (None, Some(max)) => format!("~:{}", max),
        (Some(min), None) => format!("{}:", min),
        (Some(min), Some(max)) if min.is_zero() => max.to_string(),
        (Some(min), Some(max)) => format!("{}:{}", min, max),
    }
}

fn parse_range(range: &str) -> Result<(Option<Value>, Option<Value>), ThresholdError> {
    let range = range.trim();
    if range.is_empty() {
        return Ok((None, None));
    }
    let bound = |s: &str| {
        s.parse::<Value>()
            .map_err(|_| ThresholdError::Parse(range.to_string()))
    };
    match range.split_once(':') {
        None => Ok((Some(Value::Int(0)), Some(bound(range)?))),
        Some((min, max)) => {
            let min = match min {
                "~" => None,
                _ => Some(bound(min)?),
            };
            let max = match max {
                "" => None,
                _ => Some(bound(max)?),
            };
            if min.is_none() && max.is_none() {
                return Err(ThresholdError::Parse(range.to_string()));
            }
            Ok((min, max))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Thresholds {
        Thresholds::new(5, 10, 3, 12)
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
        assert!(Thresholds::default().validate().is_ok());
        assert!(Thresholds::default().with_warning_max(3).validate().is_ok());
        // equal bounds are allowed
        assert!(Thresholds::new(5, 5, 5, 5).validate().is_ok());
    }

    #[test]
    fn test_validate_errors_in_order() {
        let th = Thresholds::default().with_warning_min(2).with_warning_max(1);
        assert_eq!(th.validate(), Err(ThresholdError::WarningRange));

        let th = Thresholds::default().with_critical_min(2).with_critical_max(1);
        assert_eq!(th.validate(), Err(ThresholdError::CriticalRange));

        let th = Thresholds::default().with_warning_min(1).with_critical_min(2);
        assert_eq!(th.validate(), Err(ThresholdError::MinOrder));

        let th = Thresholds::default().with_warning_max(2).with_critical_max(1);
        assert_eq!(th.validate(), Err(ThresholdError::MaxOrder));

        // several violations: the warning range is reported first
        let th = Thresholds::new(9, 1, 8, 2);
        assert_eq!(th.validate(), Err(ThresholdError::WarningRange));
    }

    #[test]
    fn test_check_value_regions() {
        let th = sample();
        assert_eq!(th.check_value(6), Status::Ok);
        assert_eq!(th.check_value(4), Status::Warning);
        assert_eq!(th.check_value(11), Status::Warning);
        assert_eq!(th.check_value(2), Status::Critical);
        assert_eq!(th.check_value(13), Status::Critical);
    }

    #[test]
    fn test_check_value_bounds_not_flagged() {
        let th = sample();
        assert_eq!(th.check_value(3), Status::Warning);
        assert_eq!(th.check_value(5), Status::Ok);
        assert_eq!(th.check_value(10), Status::Ok);
        assert_eq!(th.check_value(12), Status::Warning);
        assert_eq!(th.check_value(12.000001), Status::Critical);
        assert_eq!(th.check_value(2.999999), Status::Critical);
    }

    #[test]
    fn test_check_value_without_thresholds() {
        let th = Thresholds::default();
        for v in [-1000.0, 0.0, 42.0, f64::MAX] {
            assert_eq!(th.check_value(v), Status::Ok);
        }
    }

    #[test]
    fn test_open_ranges() {
        let th = Thresholds::default().with_critical_max(90);
        assert_eq!(th.check_value(-5), Status::Ok);
        assert_eq!(th.check_value(91), Status::Critical);
        assert!(!th.has_warning());
        assert!(th.has_critical());

        let th = Thresholds::new(10, 20, 5, 30).use_warning(true, false).use_critical(false, true);
        assert_eq!(th.check_value(1), Status::Warning);
        assert_eq!(th.check_value(25), Status::Ok);
        assert_eq!(th.check_value(31), Status::Critical);
    }

    #[test]
    fn test_range_rendering() {
        assert_eq!(Thresholds::new(0, 80, 0, 90).warning(), "80");
        assert_eq!(Thresholds::new(0, 80, 0, 90).critical(), "90");
        assert_eq!(Thresholds::new(10, 80, 5, 90).warning(), "10:80");
        assert_eq!(Thresholds::default().with_warning_max(80).warning(), "~:80");
        assert_eq!(Thresholds::default().with_warning_min(10).warning(), "10:");
        assert_eq!(Thresholds::default().with_critical_min(0).critical(), "0:");
        assert_eq!(Thresholds::default().warning(), "");
        assert_eq!(Thresholds::new(0.5, 1.5, 0, 2).warning(), "0.5:1.5");
    }

    #[test]
    fn test_from_ranges() {
        let th = Thresholds::from_ranges("80", "90").unwrap();
        assert_eq!(th, Thresholds::new(0, 80, 0, 90));

        let th = Thresholds::from_ranges("~:80", "").unwrap();
        assert_eq!(th.warning_min, None);
        assert_eq!(th.warning_max, Some(Value::Int(80)));
        assert!(!th.has_critical());

        let th = Thresholds::from_ranges("10:", "5:").unwrap();
        assert_eq!(th.warning(), "10:");
        assert_eq!(th.critical(), "5:");
    }

    #[test]
    fn test_from_ranges_rejects_bad_input() {
        assert!(matches!(Thresholds::from_ranges("@10:20", ""), Err(ThresholdError::Parse(_))));
        assert!(matches!(Thresholds::from_ranges("abc", ""), Err(ThresholdError::Parse(_))));
        assert!(matches!(Thresholds::from_ranges("~:", ""), Err(ThresholdError::Parse(_))));
        assert_eq!(Thresholds::from_ranges("90", "80"), Err(ThresholdError::MaxOrder));
    }
}
