// SPDX-License-Identifier: AGPL-3.0-or-later

//! Check plugin response
//!
//! A [`Response`] collects the status, output messages and performance data
//! of one check run and renders the single line monitoring systems expect:
//!
//! ```text
//! <STATUS>: <msg1><delim><msg2>... | 'metric1'=v1unit;warn;crit;min;max ...
//! ```
//!
//! # Examples
//!
//! ```
//! use monitoring_plugin::{MetricPoint, Response, Status, Thresholds};
//!
//! let mut response = Response::new("everything checked!");
//! response.update_status(Status::Ok, "something is ok!");
//! response.update_status(Status::Critical, "something else is critical!");
//! response.update_status(Status::Warning, "something else is warning!");
//! response.set_sort_messages_by_severity(true);
//!
//! response
//!     .add_metric_point(
//!         MetricPoint::new("response_time", 10)
//!             .with_unit("s")
//!             .with_min(0)
//!             .with_thresholds(Thresholds::new(0, 10, 0, 20)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     response.output(),
//!     "CRITICAL: something else is critical!\nsomething else is warning!\n\
//!      something is ok! | 'response_time'=10s;10;20;0;"
//! );
//! assert_eq!(response.exit_code(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metric::{MetricInfo, MetricPoint};
use crate::status::Status;
use crate::store::MetricStore;

/// Separates the message text from the performance data on the output line
pub const SEPARATOR: char = '|';

/// Text substituted for messages containing [`SEPARATOR`] under the
/// replace-message policies
pub const INVALID_MESSAGE_TEXT: &str = "output message contained an invalid character";

/// What to do with output messages containing [`SEPARATOR`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidCharacterPolicy {
    /// Strip the character from the message
    #[default]
    Remove,
    /// Substitute the configured replacement
    Replace,
    /// Drop the whole message; its status still counts
    RemoveMessage,
    /// Substitute [`INVALID_MESSAGE_TEXT`] for the message
    ReplaceMessage,
    /// As `ReplaceMessage`, and raise the status to UNKNOWN
    ReplaceMessageAndSetUnknown,
}

/// One status message of the response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMessage {
    pub status: Status,
    pub message: String,
}

/// Everything a response knows, e.g. for JSON output or tests
#[derive(Debug, Clone, Serialize)]
pub struct ResponseInfo {
    pub status: Status,
    pub exit_code: i32,
    pub raw_output: String,
    /// Messages ordered by severity, worst first
    pub messages: Vec<OutputMessage>,
    pub performance_data: Vec<MetricInfo>,
}

impl ResponseInfo {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Outcome of one check run
#[derive(Debug, Clone)]
pub struct Response {
    status: Status,
    default_ok_message: String,
    messages: Vec<OutputMessage>,
    metrics: MetricStore,
    output_delimiter: String,
    json_labels: bool,
    print_metrics: bool,
    sort_by_severity: bool,
    invalid_characters: InvalidCharacterPolicy,
    replacement: String,
    finalized: bool,
}

impl Response {
    /// Create an OK response. `default_ok_message` is only printed if the
    /// status is still OK at the end of the run.
    pub fn new(default_ok_message: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            default_ok_message: default_ok_message.into(),
            messages: Vec::new(),
            metrics: MetricStore::new(),
            output_delimiter: "\n".to_string(),
            json_labels: false,
            print_metrics: true,
            sort_by_severity: false,
            invalid_characters: InvalidCharacterPolicy::default(),
            replacement: String::new(),
            finalized: false,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Plugin exit code of the current status
    pub fn exit_code(&self) -> i32 {
        self.status.code()
    }

    pub fn messages(&self) -> &[OutputMessage] {
        &self.messages
    }

    pub fn metrics(&self) -> &MetricStore {
        &self.metrics
    }

    /// Merge `status` into the response and record `message` if non-empty.
    pub fn update_status(&mut self, status: Status, message: impl Into<String>) {
        let merged = self.status.merge(status);
        if merged != self.status {
            log::debug!("Status {} -> {}", self.status, merged);
        }
        self.status = merged;

        let message = message.into();
        if !message.is_empty() {
            self.messages.push(OutputMessage { status, message });
        }
        self.finalized = false;
    }

    /// Like [`update_status`](Self::update_status) with a raw exit code;
    /// codes outside 0..=3 count as UNKNOWN.
    pub fn update_status_code(&mut self, code: i64, message: impl Into<String>) {
        self.update_status(Status::from_code(code), message);
    }

    /// Update the status if `condition` holds; returns `condition`.
    pub fn update_status_if(
        &mut self,
        condition: bool,
        status: Status,
        message: impl Into<String>,
    ) -> bool {
        if condition {
            self.update_status(status, message);
        }
        condition
    }

    /// Update the status unless `condition` holds; returns `!condition`.
    pub fn update_status_if_not(
        &mut self,
        condition: bool,
        status: Status,
        message: impl Into<String>,
    ) -> bool {
        self.update_status_if(!condition, status, message)
    }

    /// Update the status if `result` is an error; returns whether it was.
    ///
    /// With `include_error` the error text is appended to `message`, or
    /// used on its own if `message` is empty.
    pub fn update_status_on_error<T, E: std::fmt::Display>(
        &mut self,
        result: &std::result::Result<T, E>,
        status: Status,
        message: &str,
        include_error: bool,
    ) -> bool {
        let Err(err) = result else {
            return false;
        };
        let message = match (include_error, message.is_empty()) {
            (true, true) => err.to_string(),
            (true, false) => format!("{} (error: {})", message, err),
            (false, _) => message.to_string(),
        };
        self.update_status(status, message);
        true
    }

    /// Add a performance data point.
    ///
    /// If the point carries thresholds its value is checked, and a
    /// violation updates the status with a message naming the point.
    pub fn add_metric_point(&mut self, point: MetricPoint) -> Result<()> {
        let status = point.check_thresholds();
        let name = point.name();
        self.metrics.add(point)?;
        self.finalized = false;

        if status != Status::Ok {
            let severity = status.as_str().to_ascii_lowercase();
            self.update_status(status, format!("{} is outside of {} threshold", name, severity));
        }
        Ok(())
    }

    /// Delimiter between output messages, `"\n"` by default
    pub fn set_output_delimiter(&mut self, delimiter: impl Into<String>) {
        self.output_delimiter = delimiter.into();
        self.finalized = false;
    }

    pub fn set_sort_messages_by_severity(&mut self, sort: bool) {
        self.sort_by_severity = sort;
        self.finalized = false;
    }

    pub fn set_print_metrics(&mut self, print: bool) {
        self.print_metrics = print;
    }

    /// Render metric keys as JSON objects carrying metric and label
    pub fn set_performance_data_json_label(&mut self, json_label: bool) {
        self.json_labels = json_label;
    }

    /// Choose how messages containing [`SEPARATOR`] are handled.
    ///
    /// `replacement` is only used by [`InvalidCharacterPolicy::Replace`],
    /// which requires it to be non-empty and free of the separator. On
    /// error the previous policy stays in place.
    pub fn set_invalid_character_behavior(
        &mut self,
        policy: InvalidCharacterPolicy,
        replacement: &str,
    ) -> Result<()> {
        if policy == InvalidCharacterPolicy::Replace {
            if replacement.is_empty() {
                return Err(Error::Configuration(
                    "replace policy requires a replacement".to_string(),
                ));
            }
            if replacement.contains(SEPARATOR) {
                return Err(Error::Configuration(format!(
                    "replacement '{}' contains '{}'",
                    replacement, SEPARATOR
                )));
            }
        }
        self.invalid_characters = policy;
        self.replacement = replacement.to_string();
        self.finalized = false;
        Ok(())
    }

    /// Sanitize and order the messages for output.
    ///
    /// Safe to call repeatedly; later mutations re-open the response and the
    /// next call runs again.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }

        let default_ok = std::mem::take(&mut self.default_ok_message);
        self.default_ok_message = self
            .sanitize(Status::Ok, default_ok)
            .unwrap_or_default();

        let messages = std::mem::take(&mut self.messages);
        for msg in messages {
            if let Some(message) = self.sanitize(msg.status, msg.message) {
                self.messages.push(OutputMessage {
                    status: msg.status,
                    message,
                });
            }
        }

        if self.sort_by_severity {
            // stable: equal severities keep their order
            self.messages.sort_by(|a, b| b.status.cmp(&a.status));
        }
        self.finalized = true;
    }

    /// Apply the invalid character policy to one message. `None` drops it.
    fn sanitize(&mut self, status: Status, message: String) -> Option<String> {
        if !message.contains(SEPARATOR) {
            return Some(message);
        }
        log::warn!(
            "{} message contains '{}', applying {:?}",
            status,
            SEPARATOR,
            self.invalid_characters
        );
        match self.invalid_characters {
            InvalidCharacterPolicy::Remove => Some(message.replace(SEPARATOR, "")),
            InvalidCharacterPolicy::Replace => {
                Some(message.replace(SEPARATOR, &self.replacement))
            }
            InvalidCharacterPolicy::RemoveMessage => None,
            InvalidCharacterPolicy::ReplaceMessage => Some(INVALID_MESSAGE_TEXT.to_string()),
            InvalidCharacterPolicy::ReplaceMessageAndSetUnknown => {
                self.status = self.status.merge(Status::Unknown);
                Some(INVALID_MESSAGE_TEXT.to_string())
            }
        }
    }

    /// Render the output line of an already finalized response
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(256);
        out.push_str(self.status.as_str());
        out.push_str(": ");

        if self.status == Status::Ok {
            out.push_str(&self.default_ok_message);
            if !self.messages.is_empty() {
                out.push_str(&self.output_delimiter);
            }
        }

        let messages: Vec<&str> = self.messages.iter().map(|m| m.message.as_str()).collect();
        out.push_str(&messages.join(&self.output_delimiter));

        if self.print_metrics && !self.metrics.is_empty() {
            out.push_str(" | ");
            out.push_str(&self.metrics.render(self.json_labels));
        }
        log::trace!("Rendered output: {}", out);
        out
    }

    /// Finalize and render
    pub fn output(&mut self) -> String {
        self.finalize();
        self.render()
    }

    /// Snapshot of the finalized response
    pub fn info(&mut self) -> ResponseInfo {
        let raw_output = self.output();
        let mut messages = self.messages.clone();
        messages.sort_by(|a, b| b.status.cmp(&a.status));
        ResponseInfo {
            status: self.status,
            exit_code: self.exit_code(),
            raw_output,
            messages,
            performance_data: self.metrics.iter().map(MetricPoint::info).collect(),
        }
    }

    /// Print the output line to stdout and exit with the status code
    pub fn output_and_exit(mut self) -> ! {
        let output = self.output();
        println!("{}", output);
        std::process::exit(self.exit_code())
    }
}
