// SPDX-License-Identifier: AGPL-3.0-or-later

//! Performance data points
//!
//! A point renders as `'<key>'=<value><unit>;<warn>;<crit>;<min>;<max>`,
//! following the Nagios plugin development guidelines. The four trailing
//! fields are only emitted when thresholds or display bounds are set.
//!
//! # Examples
//!
//! ```
//! use monitoring_plugin::{MetricPoint, Thresholds};
//!
//! let point = MetricPoint::new("memory_usage", 50.6)
//!     .with_unit("%")
//!     .with_min(0)
//!     .with_max(100)
//!     .with_thresholds(Thresholds::new(0, 80, 0, 90));
//! assert!(point.validate().is_ok());
//! assert_eq!(point.render(false), "'memory_usage'=50.6%;80;90;0;100");
//! ```

use serde::Serialize;

use crate::error::{Error, Result};
use crate::status::Status;
use crate::thresholds::Thresholds;
use crate::value::Value;

/// Unique identity of a point within a store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricKey {
    pub metric: String,
    /// Empty when the point has no label
    pub label: String,
}

/// Key as emitted in JSON-label mode
#[derive(Serialize)]
struct JsonKey<'a> {
    metric: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    label: &'a str,
}

/// A single performance data point
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    metric: String,
    label: String,
    value: Value,
    unit: String,
    min: Option<Value>,
    max: Option<Value>,
    thresholds: Option<Thresholds>,
}

/// Serializable snapshot of a point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricInfo {
    pub metric: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub value: Value,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Thresholds>,
}

impl MetricPoint {
    /// Create a point. Nothing is checked until [`validate`](Self::validate)
    /// runs, which happens when the point is added to a store.
    pub fn new(metric: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            metric: metric.into(),
            label: String::new(),
            value: value.into(),
            unit: String::new(),
            min: None,
            max: None,
            thresholds: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Distinguish several points of the same metric, e.g. one per disk
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Attached thresholds, if any bound is enabled
    pub fn thresholds(&self) -> Option<&Thresholds> {
        self.thresholds.as_ref().filter(|t| !t.is_empty())
    }

    pub fn key(&self) -> MetricKey {
        MetricKey {
            metric: self.metric.clone(),
            label: self.label.clone(),
        }
    }

    /// Human-readable name used in status messages
    pub fn name(&self) -> String {
        if self.label.is_empty() {
            self.metric.clone()
        } else {
            format!("{} ({})", self.metric, self.label)
        }
    }

    /// Check the point against the perfdata format rules
    pub fn validate(&self) -> Result<()> {
        if self.metric.is_empty() {
            return Err(Error::EmptyMetricName);
        }
        if self.metric.contains(['=', '\'']) {
            return Err(Error::InvalidMetricName(self.metric.clone()));
        }
        if self.label.contains(['=', '\'']) {
            return Err(Error::InvalidLabel(self.label.clone()));
        }
        if self
            .unit
            .contains(|c: char| c.is_ascii_digit() || matches!(c, ';' | '\'' | '"'))
        {
            return Err(Error::InvalidUnit(self.unit.clone()));
        }

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(Error::MinGreaterThanMax);
            }
        }
        if self.min.is_some_and(|min| self.value < min) {
            return Err(Error::ValueBelowMin);
        }
        if self.max.is_some_and(|max| self.value > max) {
            return Err(Error::ValueAboveMax);
        }

        if let Some(thresholds) = &self.thresholds {
            thresholds.validate()?;
        }
        Ok(())
    }

    /// Status of the value against the attached thresholds
    pub fn check_thresholds(&self) -> Status {
        self.thresholds()
            .map_or(Status::Ok, |t| t.check_value(self.value))
    }

    /// Render in perfdata syntax; `json_label` switches the key to a JSON
    /// object carrying metric and label separately.
    pub fn render(&self, json_label: bool) -> String {
        let key = if json_label {
            self.json_key()
        } else if self.label.is_empty() {
            self.metric.clone()
        } else {
            format!("{}_{}", self.metric, self.label)
        };

        let mut out = format!("'{}'={}{}", key, self.value, self.unit);

        let thresholds = self.thresholds();
        if thresholds.is_some() || self.min.is_some() || self.max.is_some() {
            let (warn, crit) = thresholds
                .map(|t| (t.warning(), t.critical()))
                .unwrap_or_default();
            let bound = |v: Option<Value>| v.map(|v| v.to_string()).unwrap_or_default();
            out.push_str(&format!(
                ";{};{};{};{}",
                warn,
                crit,
                bound(self.min),
                bound(self.max)
            ));
        }
        out
    }

    fn json_key(&self) -> String {
        let key = JsonKey {
            metric: &self.metric,
            label: &self.label,
        };
        match serde_json::to_string(&key) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot encode metric key '{}' as JSON: {}", self.metric, e);
                self.metric.clone()
            }
        }
    }

    pub fn info(&self) -> MetricInfo {
        MetricInfo {
            metric: self.metric.clone(),
            label: self.label.clone(),
            value: self.value,
            unit: self.unit.clone(),
            min: self.min,
            max: self.max,
            thresholds: self.thresholds().cloned(),
        }
    }
}
