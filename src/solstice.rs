//! Picks the solstice whose neighbourhood is searched for a given point.

use crate::ephemeris::{Ephemeris, SolsticeKind};
use crate::error::SearchError;
use crate::timezone::to_absolute;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    Northern,
    Southern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Summer,
}

impl Hemisphere {
    /// Equatorial (and non-finite) latitudes have no hemisphere.
    pub fn of_latitude(latitude: f64) -> Result<Self, SearchError> {
        if latitude < 0.0 {
            Ok(Hemisphere::Southern)
        } else if latitude > 0.0 {
            Ok(Hemisphere::Northern)
        } else {
            Err(SearchError::UnsupportedLocation { latitude })
        }
    }

    /// Astronomical solstice that starts `season` in this hemisphere.
    pub fn solstice(self, season: Season) -> SolsticeKind {
        match (self, season) {
            (Hemisphere::Northern, Season::Summer) | (Hemisphere::Southern, Season::Winter) => {
                SolsticeKind::June
            }
            (Hemisphere::Northern, Season::Winter) | (Hemisphere::Southern, Season::Summer) => {
                SolsticeKind::December
            }
        }
    }

    /// Season whose solstice is searched: winter in the south, summer in the north.
    pub fn searched_season(self) -> Season {
        match self {
            Hemisphere::Southern => Season::Winter,
            Hemisphere::Northern => Season::Summer,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::Northern => write!(f, "northern"),
            Hemisphere::Southern => write!(f, "southern"),
        }
    }
}

/// Instant of the searched solstice following local midnight of January 1st of `year`.
pub fn next_solstice<E: Ephemeris + ?Sized>(
    engine: &E,
    latitude: f64,
    year: i32,
    timezone: &Tz,
) -> Result<DateTime<Utc>, SearchError> {
    let hemisphere = Hemisphere::of_latitude(latitude)?;
    let new_year = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| SearchError::OutOfRange(format!("year {} not representable", year)))?
        .and_time(NaiveTime::MIN);
    let start = to_absolute(new_year, timezone)?;
    let kind = hemisphere.solstice(hemisphere.searched_season());
    log::debug!(
        "{} hemisphere latitude {}: looking for {} after {}",
        hemisphere,
        latitude,
        kind,
        start
    );
    engine.next_solstice(kind, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::Observer;
    use chrono::{Duration, TimeZone};
    use chrono_tz::America::Argentina::Cordoba;
    use chrono_tz::Europe::Berlin;
    use std::cell::RefCell;

    /// Returns a fixed instant per kind and records every solstice request.
    struct RecordingEphemeris {
        requests: RefCell<Vec<(SolsticeKind, DateTime<Utc>)>>,
    }

    impl RecordingEphemeris {
        fn new() -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Ephemeris for RecordingEphemeris {
        fn solar_altitude(&self, _: &Observer, _: DateTime<Utc>) -> Result<f64, SearchError> {
            unreachable!("solstice lookup never samples altitude")
        }

        fn next_transit(
            &self,
            _: &Observer,
            _: DateTime<Utc>,
        ) -> Result<DateTime<Utc>, SearchError> {
            unreachable!("solstice lookup never asks for transits")
        }

        fn next_solstice(
            &self,
            kind: SolsticeKind,
            after: DateTime<Utc>,
        ) -> Result<DateTime<Utc>, SearchError> {
            self.requests.borrow_mut().push((kind, after));
            Ok(after + Duration::days(170))
        }
    }

    #[test]
    fn test_hemisphere_of_latitude() {
        assert_eq!(Hemisphere::of_latitude(-31.4), Ok(Hemisphere::Southern));
        assert_eq!(Hemisphere::of_latitude(52.5), Ok(Hemisphere::Northern));
        assert_eq!(
            Hemisphere::of_latitude(0.0),
            Err(SearchError::UnsupportedLocation { latitude: 0.0 })
        );
        assert!(Hemisphere::of_latitude(f64::NAN).is_err());
    }

    #[test]
    fn test_searched_solstice_is_june_in_both_hemispheres() {
        for hemisphere in [Hemisphere::Southern, Hemisphere::Northern] {
            assert_eq!(
                hemisphere.solstice(hemisphere.searched_season()),
                SolsticeKind::June
            );
        }
        assert_eq!(
            Hemisphere::Southern.solstice(Season::Summer),
            SolsticeKind::December
        );
    }

    #[test]
    fn test_southern_point_starts_from_local_new_year() {
        let engine = RecordingEphemeris::new();
        next_solstice(&engine, -31.42841, 2018, &Cordoba).unwrap();
        let requests = engine.requests.borrow();
        assert_eq!(
            requests.as_slice(),
            &[(
                SolsticeKind::June,
                Utc.with_ymd_and_hms(2018, 1, 1, 3, 0, 0).unwrap()
            )]
        );
    }

    #[test]
    fn test_northern_point_asks_for_summer_solstice() {
        let engine = RecordingEphemeris::new();
        next_solstice(&engine, 52.5, 2024, &Berlin).unwrap();
        let requests = engine.requests.borrow();
        assert_eq!(requests[0].0, SolsticeKind::June);
        assert_eq!(requests[0].1, Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_equator_fails_without_consulting_engine() {
        let engine = RecordingEphemeris::new();
        let err = next_solstice(&engine, 0.0, 2018, &Cordoba).unwrap_err();
        assert_eq!(err, SearchError::UnsupportedLocation { latitude: 0.0 });
        assert!(engine.requests.borrow().is_empty());
    }
}
