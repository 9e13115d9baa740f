//! Civil time: local wall-clock times to absolute instants, and display zones.

use crate::error::SearchError;
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::{Tz, UTC};
use std::str::FromStr;

/// Interpret `naive` as wall-clock time in `timezone` and return the absolute instant.
///
/// Ambiguous local times (DST fall-back) resolve to the first occurrence. Local times
/// inside a DST gap have no instant and are rejected rather than shifted.
pub fn to_absolute(naive: NaiveDateTime, timezone: &Tz) -> Result<DateTime<Utc>, SearchError> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(first, _second) => Ok(first.with_timezone(&Utc)),
        LocalResult::None => Err(SearchError::InvalidTime {
            local: naive,
            timezone: timezone.name().to_string(),
        }),
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>()
        .map_err(|_| format!("Invalid timezone: {}", name))
}

/// Get the system timezone using cross-platform detection
pub fn get_system_timezone() -> Tz {
    // TZ wins so tests and users can override detection
    if let Ok(tz_str) = std::env::var("TZ")
        && let Ok(tz) = tz_str.parse::<Tz>()
    {
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_name) => tz_name.parse::<Tz>().unwrap_or(UTC),
        Err(_) => UTC,
    }
}

/// Zone used to present result instants instead of each point's own zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimezoneOverride {
    Named(Tz),
    System,
}

impl TimezoneOverride {
    pub fn resolve(&self) -> Tz {
        match self {
            TimezoneOverride::Named(tz) => *tz,
            TimezoneOverride::System => get_system_timezone(),
        }
    }
}

impl FromStr for TimezoneOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("system") {
            return Ok(TimezoneOverride::System);
        }
        parse_timezone(s).map(TimezoneOverride::Named)
    }
}

/// Zone in which a point's results are displayed.
pub fn display_timezone(point_zone: Tz, override_tz: Option<&TimezoneOverride>) -> Tz {
    override_tz.map_or(point_zone, TimezoneOverride::resolve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::America::Argentina::Cordoba;
    use chrono_tz::Europe::Berlin;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_to_absolute_summer_and_winter_offsets() {
        let summer = to_absolute(naive(2024, 6, 21, 12, 0), &Berlin).unwrap();
        assert_eq!(summer, Utc.with_ymd_and_hms(2024, 6, 21, 10, 0, 0).unwrap());

        let winter = to_absolute(naive(2024, 1, 1, 12, 0), &Berlin).unwrap();
        assert_eq!(winter, Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_to_absolute_new_year_in_cordoba() {
        let start = to_absolute(naive(2018, 1, 1, 0, 0), &Cordoba).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2018, 1, 1, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_to_absolute_rejects_dst_gap() {
        let err = to_absolute(naive(2024, 3, 31, 2, 30), &Berlin).unwrap_err();
        assert!(matches!(err, SearchError::InvalidTime { ref timezone, .. } if timezone == "Europe/Berlin"));
    }

    #[test]
    fn test_to_absolute_ambiguous_takes_first_occurrence() {
        let dt = to_absolute(naive(2024, 10, 27, 2, 30), &Berlin).unwrap();
        // 02:30+02:00 comes before 02:30+01:00
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 10, 27, 0, 30, 0).unwrap());
    }

    #[test]
    fn test_to_absolute_is_deterministic() {
        let a = to_absolute(naive(2018, 6, 21, 0, 0), &Cordoba).unwrap();
        let b = to_absolute(naive(2018, 6, 21, 0, 0), &Cordoba).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_timezone_override_parsing() {
        assert_eq!(
            "Europe/Berlin".parse::<TimezoneOverride>().unwrap(),
            TimezoneOverride::Named(Berlin)
        );
        assert_eq!(
            "SYSTEM".parse::<TimezoneOverride>().unwrap(),
            TimezoneOverride::System
        );
        assert!("Mars/Olympus_Mons".parse::<TimezoneOverride>().is_err());
    }

    #[test]
    fn test_display_timezone_defaults_to_point_zone() {
        assert_eq!(display_timezone(Cordoba, None), Cordoba);
        let berlin = TimezoneOverride::Named(Berlin);
        assert_eq!(display_timezone(Cordoba, Some(&berlin)), Berlin);
    }

    #[test]
    fn test_get_system_timezone_with_tz_env() {
        unsafe {
            std::env::set_var("TZ", "Europe/Berlin");
        }
        let tz = get_system_timezone();
        assert_eq!(tz, Berlin);
        unsafe {
            std::env::remove_var("TZ");
        }
    }
}
