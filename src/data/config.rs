use crate::timezone::TimezoneOverride;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn all() -> Vec<&'static str> {
        vec!["text", "csv", "json"]
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Supported formats: {}",
                s,
                OutputFormat::all().join(", ")
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub headers: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            headers: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Environment {
    pub refraction: bool,
    pub temperature: f64,
    pub pressure: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            refraction: true,
            temperature: 15.0,
            pressure: 1013.0,
        }
    }
}

/// Everything a run needs besides the static catalog.
#[derive(Debug, Clone)]
pub struct Parameters {
    pub year: i32,
    /// Days on each side of the solstice covered by the search window.
    pub margin_days: u32,
    pub brute_force: bool,
    /// 1-based catalog entries to process; empty means all.
    pub points: Vec<usize>,
    pub fail_fast: bool,
    /// Explicit ΔT in seconds; `None` estimates it from the date.
    pub deltat: Option<f64>,
    pub environment: Environment,
    pub output: OutputOptions,
    pub timezone: Option<TimezoneOverride>,
    pub perf: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            year: 2018,
            margin_days: 2,
            brute_force: false,
            points: Vec::new(),
            fail_fast: false,
            deltat: None,
            environment: Environment::default(),
            output: OutputOptions::default(),
            timezone: None,
            perf: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing_is_case_insensitive() {
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        let err = "parquet".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("text, csv, json"));
    }

    #[test]
    fn test_defaults() {
        let params = Parameters::default();
        assert_eq!(params.year, 2018);
        assert_eq!(params.margin_days, 2);
        assert!(!params.brute_force);
        assert!(params.points.is_empty());
        assert_eq!(params.output.format, OutputFormat::Text);
        assert!(params.environment.refraction);
    }
}
