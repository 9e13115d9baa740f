//! Ephemeris capability used by the solstice lookup and the altitude search.
//!
//! The search code only talks to the [`Ephemeris`] trait, so tests can substitute a
//! deterministic fixture for the SPA-backed [`SpaEphemeris`].

pub mod solstice;
pub mod spa;

use crate::data::validation::{validate_latitude, validate_longitude};
use crate::error::SearchError;
use chrono::{DateTime, Utc};
use std::fmt;

pub use spa::SpaEphemeris;

/// Observer position used for topocentric quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above the reference ellipsoid.
    pub elevation: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self, String> {
        if !elevation.is_finite() {
            return Err(format!("Elevation must be finite, got {}", elevation));
        }
        Ok(Self {
            latitude: validate_latitude(latitude)?,
            longitude: validate_longitude(longitude)?,
            elevation,
        })
    }
}

/// Astronomical solstice, named by the month it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolsticeKind {
    June,
    December,
}

impl SolsticeKind {
    pub fn month(self) -> u32 {
        match self {
            SolsticeKind::June => 6,
            SolsticeKind::December => 12,
        }
    }
}

impl fmt::Display for SolsticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolsticeKind::June => write!(f, "June solstice"),
            SolsticeKind::December => write!(f, "December solstice"),
        }
    }
}

pub trait Ephemeris {
    /// Topocentric altitude of the Sun in degrees.
    fn solar_altitude(&self, observer: &Observer, instant: DateTime<Utc>)
    -> Result<f64, SearchError>;

    /// First upper transit of the Sun at or after `after`.
    fn next_transit(
        &self,
        observer: &Observer,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SearchError>;

    /// First solstice of the given kind strictly after `after`.
    fn next_solstice(
        &self,
        kind: SolsticeKind,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SearchError>;
}
