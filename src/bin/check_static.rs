// SPDX-License-Identifier: AGPL-3.0-or-later

//! Static check plugin (check_static)
//!
//! Reports whatever status, messages and performance data it is given on the
//! command line. Handy for testing notification paths, for passive checks
//! and as a template for real plugins.
//!
//! ```text
//! check_static --status warning --message "backup is late" \
//!     --metric backup_age=26h --warning 24 --critical 48
//! ```

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use monitoring_plugin::{MetricPoint, Response, ResponseConfig, Status, Thresholds, Value};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "check_static")]
#[command(about = "Static monitoring plugin: reports the given status, messages and performance data", long_about = None)]
#[command(version)]
struct Cli {
    /// Status to report (ok, warning, critical, unknown)
    #[arg(short, long, default_value = "ok", value_parser = parse_status)]
    status: Status,

    /// Output message, may be repeated
    #[arg(short, long)]
    message: Vec<String>,

    /// Message printed while the status is OK
    #[arg(long, default_value = "static check")]
    ok_message: String,

    /// Performance data point: NAME[,LABEL]=VALUE[UNIT], may be repeated
    #[arg(long = "metric")]
    metrics: Vec<String>,

    /// Warning range applied to every metric, e.g. 80, ~:80, 10:80
    #[arg(short, long)]
    warning: Option<String>,

    /// Critical range applied to every metric
    #[arg(short, long)]
    critical: Option<String>,

    /// Display minimum applied to every metric
    #[arg(long, allow_hyphen_values = true)]
    min: Option<String>,

    /// Display maximum applied to every metric
    #[arg(long, allow_hyphen_values = true)]
    max: Option<String>,

    /// Delimiter between output messages (overrides the config file)
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Sort messages by severity, worst first
    #[arg(long)]
    sort: bool,

    /// Render metric keys as JSON objects
    #[arg(long)]
    json_labels: bool,

    /// Do not print performance data
    #[arg(long)]
    no_perfdata: bool,

    /// TOML file with output settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[cfg(feature = "cli")]
fn parse_status(s: &str) -> Result<Status, String> {
    Ok(Status::from_name(s))
}

/// Split `NAME[,LABEL]=VALUE[UNIT]`
#[cfg(feature = "cli")]
fn parse_metric(arg: &str) -> Result<MetricPoint, String> {
    let (key, reading) = arg
        .split_once('=')
        .ok_or_else(|| format!("metric '{}' is not NAME=VALUE", arg))?;
    let (name, label) = key.split_once(',').unwrap_or((key, ""));

    let split = reading
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .unwrap_or(reading.len());
    let (number, unit) = reading.split_at(split);
    let value: Value = number.parse().map_err(|e| format!("metric '{}': {}", name, e))?;

    Ok(MetricPoint::new(name, value).with_label(label).with_unit(unit))
}

#[cfg(feature = "cli")]
fn build_response(cli: &Cli) -> Response {
    let config = match &cli.config {
        Some(path) => ResponseConfig::from_toml_file(path),
        None => Ok(ResponseConfig::default()),
    };

    let mut response = Response::new(cli.ok_message.clone());
    match config {
        Ok(config) => {
            if let Err(e) = config.apply(&mut response) {
                response.update_status(Status::Unknown, e.to_string());
            }
        }
        Err(e) => response.update_status(Status::Unknown, e.to_string()),
    }

    if let Some(delimiter) = &cli.delimiter {
        response.set_output_delimiter(delimiter.clone());
    }
    if cli.sort {
        response.set_sort_messages_by_severity(true);
    }
    if cli.json_labels {
        response.set_performance_data_json_label(true);
    }
    if cli.no_perfdata {
        response.set_print_metrics(false);
    }

    if cli.message.is_empty() {
        response.update_status(cli.status, "");
    }
    for message in &cli.message {
        response.update_status(cli.status, message.clone());
    }

    let thresholds = Thresholds::from_ranges(
        cli.warning.as_deref().unwrap_or_default(),
        cli.critical.as_deref().unwrap_or_default(),
    );
    let thresholds = match thresholds {
        Ok(t) => t,
        Err(e) => {
            response.update_status(Status::Unknown, e.to_string());
            Thresholds::default()
        }
    };
    let bound = |arg: &Option<String>| arg.as_deref().map(str::parse::<Value>).transpose();
    let (min, max) = match (bound(&cli.min), bound(&cli.max)) {
        (Ok(min), Ok(max)) => (min, max),
        (Err(e), _) | (_, Err(e)) => {
            response.update_status(Status::Unknown, e.to_string());
            (None, None)
        }
    };

    for arg in &cli.metrics {
        let point = match parse_metric(arg) {
            Ok(point) => point,
            Err(e) => {
                response.update_status(Status::Unknown, e);
                continue;
            }
        };
        let mut point = point.with_thresholds(thresholds.clone());
        if let Some(min) = min {
            point = point.with_min(min);
        }
        if let Some(max) = max {
            point = point.with_max(max);
        }
        let added = response.add_metric_point(point);
        response.update_status_on_error(&added, Status::Unknown, "cannot add metric", true);
    }

    response
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    env_logger::init();
    log::debug!("check_static v{}", monitoring_plugin::VERSION);

    build_response(&cli).output_and_exit()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features not enabled. Please compile with --features cli");
    std::process::exit(3);
}
