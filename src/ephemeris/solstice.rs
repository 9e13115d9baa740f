//! Solstice instants from the mean-solstice polynomials and periodic terms of
//! Meeus, Astronomical Algorithms (2nd ed.), chapter 27.
//!
//! Accuracy is about one minute over 1951-2050 and degrades slowly outside that span.

#![allow(clippy::unreadable_literal)]

use super::SolsticeKind;
use crate::error::SearchError;
use chrono::{DateTime, Utc};
use solar_positioning::time::DeltaT;

const MIN_YEAR: i32 = -1000;
const MAX_YEAR: i32 = 3000;

const J2000_JDE: f64 = 2451545.0;
const UNIX_EPOCH_JD: f64 = 2440587.5;
const SECONDS_PER_DAY: f64 = 86400.0;

/// Mean June solstice coefficients, years 1000..3000, argument (year - 2000) / 1000.
const JUNE_MODERN: [f64; 5] = [2451716.56767, 365241.62603, 0.00325, 0.00888, -0.00030];
/// Mean December solstice coefficients, years 1000..3000.
const DECEMBER_MODERN: [f64; 5] = [2451900.05952, 365242.74049, -0.06223, -0.00823, 0.00032];
/// Mean June solstice coefficients, years -1000..1000, argument year / 1000.
const JUNE_ANCIENT: [f64; 5] = [1721233.25401, 365241.72562, -0.05323, 0.00907, 0.00025];
/// Mean December solstice coefficients, years -1000..1000.
const DECEMBER_ANCIENT: [f64; 5] = [1721414.39987, 365242.88257, -0.00769, -0.00933, -0.00006];

/// Periodic terms (A, B degrees, C degrees per century).
const PERIODIC_TERMS: [[f64; 3]; 24] = [
    [485.0, 324.96, 1934.136],
    [203.0, 337.23, 32964.467],
    [199.0, 342.08, 20.186],
    [182.0, 27.85, 445267.112],
    [156.0, 73.14, 45036.886],
    [136.0, 171.52, 22518.443],
    [77.0, 222.54, 65928.934],
    [74.0, 296.72, 3034.906],
    [70.0, 243.58, 9037.513],
    [58.0, 119.81, 33718.147],
    [52.0, 297.17, 150.678],
    [50.0, 21.02, 2281.226],
    [45.0, 247.54, 29929.562],
    [44.0, 325.15, 31555.956],
    [29.0, 60.93, 4443.417],
    [18.0, 155.12, 67555.328],
    [17.0, 288.79, 4562.452],
    [16.0, 198.04, 62894.029],
    [14.0, 199.76, 31436.921],
    [12.0, 95.39, 14577.848],
    [12.0, 287.11, 31931.756],
    [12.0, 320.81, 34777.259],
    [9.0, 227.73, 1222.114],
    [8.0, 15.45, 16859.074],
];

fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc.mul_add(x, *c))
}

fn mean_solstice_jde(kind: SolsticeKind, year: i32) -> Result<f64, SearchError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(SearchError::OutOfRange(format!(
            "solstice year {} outside {}..={}",
            year, MIN_YEAR, MAX_YEAR
        )));
    }

    let year = f64::from(year);
    let (coeffs, y) = if year < 1000.0 {
        let coeffs = match kind {
            SolsticeKind::June => &JUNE_ANCIENT,
            SolsticeKind::December => &DECEMBER_ANCIENT,
        };
        (coeffs, year / 1000.0)
    } else {
        let coeffs = match kind {
            SolsticeKind::June => &JUNE_MODERN,
            SolsticeKind::December => &DECEMBER_MODERN,
        };
        (coeffs, (year - 2000.0) / 1000.0)
    };
    Ok(polynomial(coeffs, y))
}

/// Julian Ephemeris Day (dynamical time) of the solstice of `kind` in `year`.
pub fn solstice_jde(kind: SolsticeKind, year: i32) -> Result<f64, SearchError> {
    let jde0 = mean_solstice_jde(kind, year)?;
    let t = (jde0 - J2000_JDE) / 36525.0;
    let w = (35999.373 * t - 2.47).to_radians();
    let delta_lambda = 1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos();
    let s: f64 = PERIODIC_TERMS
        .iter()
        .map(|[a, b, c]| a * (b + c * t).to_radians().cos())
        .sum();
    Ok(jde0 + 0.00001 * s / delta_lambda)
}

/// Convert a Julian day on the UT scale to a UTC instant.
pub fn julian_day_to_utc(jd: f64) -> Result<DateTime<Utc>, SearchError> {
    let seconds = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
        .ok_or_else(|| SearchError::OutOfRange(format!("julian day {} not representable", jd)))
}

/// UTC instant of the solstice of `kind` in `year`.
///
/// `deltat` overrides the ΔT estimate used to move from dynamical time to UTC.
pub fn solstice_utc(
    kind: SolsticeKind,
    year: i32,
    deltat: Option<f64>,
) -> Result<DateTime<Utc>, SearchError> {
    let jde = solstice_jde(kind, year)?;
    let deltat = match deltat {
        Some(value) => value,
        None => DeltaT::estimate_from_date(year, kind.month())?,
    };
    julian_day_to_utc(jde - deltat / SECONDS_PER_DAY)
}

/// First solstice of `kind` strictly after `after`.
pub fn solstice_after(
    kind: SolsticeKind,
    after: DateTime<Utc>,
    deltat: Option<f64>,
) -> Result<DateTime<Utc>, SearchError> {
    use chrono::Datelike;

    let year = after.year();
    for candidate_year in year..=year + 1 {
        let instant = solstice_utc(kind, candidate_year, deltat)?;
        if instant > after {
            return Ok(instant);
        }
    }
    Err(SearchError::OutOfRange(format!(
        "no {} found after {}",
        kind, after
    )))
}
