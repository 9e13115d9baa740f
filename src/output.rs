//! Output formatting for text, CSV and JSON reports.

pub mod formatters;

use crate::compute::{PointOutcome, PointReport};
use crate::data::OutputFormat;
use crate::error::OutputError;
use crate::planner::OutputPlan;
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use formatters::{CsvFormatter, Formatter, JsonFormatter, TextFormatter};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub failures: usize,
    pub probes: usize,
}

/// Display strings shared by all formats.
pub(crate) struct ReportFields {
    pub solstice_local: String,
    pub instant_local: String,
    pub solstice_rfc3339: String,
    pub instant_rfc3339: String,
    pub shadow_length: Option<f64>,
    pub shadow_error: Option<String>,
}

impl ReportFields {
    pub fn from_report(report: &PointReport) -> Self {
        let tz = &report.display_timezone;
        let (shadow_length, shadow_error) = match &report.shadow {
            Some(Ok(length)) => (Some(*length), None),
            Some(Err(err)) => (None, Some(err.to_string())),
            None => (None, None),
        };
        Self {
            solstice_local: format_local(report.solstice, tz),
            instant_local: format_local(report.best_instant, tz),
            solstice_rfc3339: format_rfc3339(report.solstice, tz),
            instant_rfc3339: format_rfc3339(report.best_instant, tz),
            shadow_length,
            shadow_error,
        }
    }
}

pub fn format_local(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant
        .with_timezone(tz)
        .format("%Y-%m-%d %H:%M:%S%:z")
        .to_string()
}

pub fn format_rfc3339(instant: DateTime<Utc>, tz: &Tz) -> String {
    instant
        .with_timezone(tz)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

pub(crate) fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub(crate) fn json_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn json_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => "null".to_string(),
    }
}

/// Write every report, send failures to `errors`, and stop at the first failure when
/// `fail_fast` is set.
pub fn write_outcomes<E: Write>(
    results: impl Iterator<Item = PointOutcome>,
    formatter: &mut dyn Formatter,
    errors: &mut E,
    fail_fast: bool,
) -> Result<RunSummary, OutputError> {
    let mut summary = RunSummary::default();
    for outcome in results {
        match outcome {
            Ok(report) => {
                formatter.write_report(&report)?;
                summary.records += 1;
                summary.probes += report.probes;
            }
            Err(failure) => {
                log::warn!("point {} skipped: {}", failure.index, failure.error);
                writeln!(errors, "Error: {}: {}", failure.description, failure.error)?;
                summary.failures += 1;
                if fail_fast {
                    break;
                }
            }
        }
    }
    Ok(summary)
}

pub fn dispatch_output(
    results: impl Iterator<Item = PointOutcome>,
    plan: &OutputPlan,
) -> Result<RunSummary, OutputError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stderr = io::stderr();
    let mut err = stderr.lock();

    match plan.format {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::new(&mut out);
            write_outcomes(results, &mut formatter, &mut err, plan.fail_fast)
        }
        OutputFormat::Csv => {
            let mut formatter = CsvFormatter::new(&mut out, plan.headers);
            write_outcomes(results, &mut formatter, &mut err, plan.fail_fast)
        }
        OutputFormat::Json => {
            let mut formatter = JsonFormatter::new(&mut out);
            write_outcomes(results, &mut formatter, &mut err, plan.fail_fast)
        }
    }
}
