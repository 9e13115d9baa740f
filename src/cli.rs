//! Command-line parsing and validation.

use crate::data::{self, CATALOG, OutputFormat, Parameters};
use crate::error::CliError;
use crate::timezone::TimezoneOverride;

const DELTAT_MULTIPLE_ERROR: &str =
    "error: the argument '--deltat <DELTAT>' cannot be used multiple times";

type CliResult<T> = Result<T, CliError>;

type ApplyFn = fn(Option<&str>, &mut Parameters, &mut bool) -> CliResult<()>;

enum OptKind {
    Value(ApplyFn),
    OptionalValue(ApplyFn),
    Flag(ApplyFn),
}

struct OptionSpec {
    name: &'static str,
    kind: OptKind,
}

const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        name: "year",
        kind: OptKind::Value(|value, params, _| {
            let v = required_value("year", value)?;
            let year = v
                .parse::<i32>()
                .map_err(|_| CliError::from(format!("Invalid year value: {}", v)))?;
            params.year = data::validate_year(year).map_err(CliError::from)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "margin",
        kind: OptKind::Value(|value, params, _| {
            let v = required_value("margin", value)?;
            let margin = v
                .parse::<u32>()
                .map_err(|_| CliError::from(format!("Invalid margin value: {}", v)))?;
            params.margin_days = data::validate_margin(margin).map_err(CliError::from)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "point",
        kind: OptKind::Value(|value, params, _| {
            let v = required_value("point", value)?;
            let index = v
                .parse::<usize>()
                .ok()
                .filter(|index| (1..=CATALOG.len()).contains(index))
                .ok_or_else(|| {
                    CliError::from(format!(
                        "Invalid point value: {} (expected 1 to {})",
                        v,
                        CATALOG.len()
                    ))
                })?;
            params.points.push(index);
            Ok(())
        }),
    },
    OptionSpec {
        name: "format",
        kind: OptKind::Value(|value, params, _| {
            let v = required_value("format", value)?;
            params.output.format = v.parse::<OutputFormat>().map_err(CliError::from)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "deltat",
        kind: OptKind::OptionalValue(|value, params, deltat_seen| {
            if *deltat_seen {
                return Err(DELTAT_MULTIPLE_ERROR.into());
            }
            *deltat_seen = true;
            params.deltat = match value {
                Some(v) => Some(parse_f64("deltat", v)?),
                None => None,
            };
            Ok(())
        }),
    },
    OptionSpec {
        name: "timezone",
        kind: OptKind::Value(|value, params, _| {
            let v = required_value("timezone", value)?;
            params.timezone = Some(v.parse::<TimezoneOverride>()?);
            Ok(())
        }),
    },
    OptionSpec {
        name: "temperature",
        kind: OptKind::Value(|value, params, _| {
            let v = required_value("temperature", value)?;
            params.environment.temperature = parse_f64("temperature", v)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "pressure",
        kind: OptKind::Value(|value, params, _| {
            let v = required_value("pressure", value)?;
            params.environment.pressure = parse_f64("pressure", v)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "brute-force",
        kind: OptKind::Flag(|_, params, _| {
            params.brute_force = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "fail-fast",
        kind: OptKind::Flag(|_, params, _| {
            params.fail_fast = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "headers",
        kind: OptKind::Flag(|_, params, _| {
            params.output.headers = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "no-headers",
        kind: OptKind::Flag(|_, params, _| {
            params.output.headers = false;
            Ok(())
        }),
    },
    OptionSpec {
        name: "no-refraction",
        kind: OptKind::Flag(|_, params, _| {
            params.environment.refraction = false;
            Ok(())
        }),
    },
    OptionSpec {
        name: "perf",
        kind: OptKind::Flag(|_, params, _| {
            params.perf = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "list",
        kind: OptKind::Flag(|_, _, _| Err(CliError::Exit(get_catalog_text()))),
    },
    OptionSpec {
        name: "help",
        kind: OptKind::Flag(|_, _, _| Err(CliError::Exit(get_help_text()))),
    },
    OptionSpec {
        name: "version",
        kind: OptKind::Flag(|_, _, _| Err(CliError::Exit(get_version_text()))),
    },
];

/// Parse the process arguments (program name first) into run parameters.
pub fn parse_cli(args: Vec<String>) -> CliResult<Parameters> {
    let mut params = Parameters::default();
    let mut deltat_seen = false;

    for arg in args.into_iter().skip(1) {
        let Some(stripped) = arg.strip_prefix("--") else {
            if arg == "help" {
                return Err(CliError::Exit(get_help_text()));
            }
            return Err(format!(
                "Unexpected argument: {} (run 'noonshadow --help' for usage)",
                arg
            )
            .into());
        };
        let (name, value) = stripped
            .split_once('=')
            .map(|(n, v)| (n, Some(v)))
            .unwrap_or((stripped, None));
        apply_option(name, value, &mut params, &mut deltat_seen)?;
    }

    Ok(params)
}

fn parse_f64(label: &str, value: &str) -> CliResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CliError::from(format!("Invalid {} value: {}", label, value)))
}

fn apply_option(
    name: &str,
    value: Option<&str>,
    params: &mut Parameters,
    deltat_seen: &mut bool,
) -> CliResult<()> {
    let Some(spec) = OPTION_SPECS.iter().find(|s| s.name == name) else {
        return Err(format!("Unknown option: --{}", name).into());
    };

    match spec.kind {
        OptKind::Value(handler) => {
            let val = required_value(spec.name, value)?;
            handler(Some(val), params, deltat_seen)
        }
        OptKind::OptionalValue(handler) => handler(value, params, deltat_seen),
        OptKind::Flag(handler) => {
            if value.is_some() {
                return Err(format!("Option --{} does not take a value", spec.name).into());
            }
            handler(None, params, deltat_seen)
        }
    }
}

fn required_value<'a>(flag: &'static str, value: Option<&'a str>) -> CliResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::from(format!("Option --{} requires a value", flag)))
}

fn get_version_text() -> String {
    format!(
        "noonshadow {}\n Build: {} ({})\n Built: {}\n Features: {}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET"),
        env!("BUILD_DATE"),
        env!("BUILD_FEATURES")
    )
}

fn get_catalog_text() -> String {
    let mut text = String::from("Observation points:\n");
    for (idx, point) in CATALOG.iter().enumerate() {
        text.push_str(&format!(
            "  {}. {}\n     lat {}, lon {}, {}",
            idx + 1,
            point.description,
            point.latitude,
            point.longitude,
            point.timezone
        ));
        if let Some(elevation) = point.elevation {
            text.push_str(&format!(", elevation {}m", elevation));
        }
        if let Some(height) = point.object_height {
            text.push_str(&format!(", object height {}m", height));
        }
        text.push('\n');
    }
    text
}

fn get_help_text() -> String {
    let defaults = Parameters::default();
    let formats = OutputFormat::all().join(", ");
    format!(
        r#"noonshadow {}
Finds the instant of maximum solar altitude (shortest shadow) around the solstice
for a fixed set of observation points.

Usage:
  noonshadow [OPTIONS]

Examples:
  noonshadow
  noonshadow --year=2024 --point=1
  noonshadow --brute-force --margin=1 --format=csv
  noonshadow --timezone=UTC --format=json

Options:
  --year=<year>         Year whose solstice is searched. Default: {}
  --margin=<days>       Days searched on each side of the solstice (1 to 30).
                        Default: {}
  --point=<n>           Only process catalog point n (repeatable). Default: all
  --brute-force         Also run the exhaustive one-second scan (slow).
  --fail-fast           Stop at the first point that fails.
  --deltat[=<seconds>]  Delta T in seconds. Estimated from the date when omitted
                        or given without a value.
  --no-refraction       Disable refraction correction.
  --pressure=<hPa>      Air pressure in hPa (refraction). Default: {}
  --temperature=<C>     Air temperature in C (refraction). Default: {}
  --format=<format>     Output format: {}. Default: {}
  --timezone=<tz>       IANA name (Europe/Berlin) or 'system' for reported times.
                        Default: each point's own timezone
  --[no-]headers        Include headers in CSV output. Default: {}
  --perf                Print performance statistics to stderr.
  --list                Print the observation points and exit.
  --help                Show this help message and exit.
  --version             Print version information and exit.

Set RUST_LOG=info or RUST_LOG=debug for diagnostic logging.
"#,
        env!("CARGO_PKG_VERSION"),
        defaults.year,
        defaults.margin_days,
        defaults.environment.pressure,
        defaults.environment.temperature,
        formats,
        defaults.output.format,
        defaults.output.headers
    )
}
