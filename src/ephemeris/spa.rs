//! [`Ephemeris`] backed by the NREL SPA implementation of `solar-positioning`.

use super::{Ephemeris, Observer, SolsticeKind, solstice};
use crate::data::Parameters;
use crate::error::SearchError;
use crate::refraction::create_refraction_correction;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use solar_positioning::time::DeltaT;
use solar_positioning::{Horizon, RefractionCorrection, spa};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaEphemeris {
    deltat: Option<f64>,
    refraction: Option<RefractionCorrection>,
}

impl SpaEphemeris {
    /// `deltat` of `None` estimates ΔT from each instant's date.
    pub fn new(deltat: Option<f64>, refraction: Option<RefractionCorrection>) -> Self {
        Self { deltat, refraction }
    }

    pub fn from_parameters(params: &Parameters) -> Result<Self, String> {
        let refraction = create_refraction_correction(&params.environment)?;
        Ok(Self::new(params.deltat, refraction))
    }

    fn delta_t(&self, instant: DateTime<Utc>) -> Result<f64, SearchError> {
        match self.deltat {
            Some(value) => Ok(value),
            None => Ok(DeltaT::estimate_from_date_like(instant)?),
        }
    }
}

impl Ephemeris for SpaEphemeris {
    fn solar_altitude(
        &self,
        observer: &Observer,
        instant: DateTime<Utc>,
    ) -> Result<f64, SearchError> {
        let position = spa::solar_position(
            instant,
            observer.latitude,
            observer.longitude,
            observer.elevation,
            self.delta_t(instant)?,
            self.refraction,
        )?;
        Ok(position.elevation_angle())
    }

    fn next_transit(
        &self,
        observer: &Observer,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SearchError> {
        // SPA reports one transit per UTC day; transits stay ordered across days.
        let day_start = Utc.from_utc_datetime(&after.date_naive().and_time(NaiveTime::MIN));
        for offset in -1..=2 {
            let day = day_start + Duration::days(offset);
            let result = spa::sunrise_sunset_for_horizon(
                day,
                observer.latitude,
                observer.longitude,
                self.delta_t(day)?,
                Horizon::SunriseSunset,
            )?;
            let transit = *result.transit();
            if transit >= after {
                return Ok(transit);
            }
        }
        Err(SearchError::Ephemeris(
            solar_positioning::Error::computation_error("no solar transit found"),
        ))
    }

    fn next_solstice(
        &self,
        kind: SolsticeKind,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, SearchError> {
        solstice::solstice_after(kind, after, self.deltat)
    }
}
