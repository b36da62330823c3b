// SPDX-License-Identifier: AGPL-3.0-or-later

//! Monitoring Plugin: check plugin output for Nagios, Icinga2, Zabbix and Checkmk
//!
//! A check collects its findings in a [`Response`]: status updates with
//! messages, and performance data points that may carry warning and critical
//! [`Thresholds`]. At the end the response renders one output line and the
//! matching exit code.
//!
//! ```no_run
//! use monitoring_plugin::{MetricPoint, Response, Status, Thresholds};
//!
//! let mut response = Response::new("all disks fine");
//! if let Err(e) = response.add_metric_point(
//!     MetricPoint::new("disk_usage", 87.5)
//!         .with_label("/var")
//!         .with_unit("%")
//!         .with_min(0)
//!         .with_max(100)
//!         .with_thresholds(Thresholds::new(0, 80, 0, 90)),
//! ) {
//!     response.update_status(Status::Unknown, format!("bad metric: {}", e));
//! }
//! response.output_and_exit();
//! ```

pub mod config;
pub mod error;
pub mod metric;
pub mod response;
pub mod status;
pub mod store;
pub mod thresholds;
pub mod value;

pub use config::ResponseConfig;
pub use error::{Error, Result};
pub use metric::{MetricInfo, MetricKey, MetricPoint};
pub use response::{InvalidCharacterPolicy, OutputMessage, Response, ResponseInfo};
pub use status::Status;
pub use store::MetricStore;
pub use thresholds::{ThresholdError, Thresholds};
pub use value::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
