use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::Berlin;
use noonshadow::ephemeris::{Ephemeris, Observer, SolsticeKind};
use noonshadow::error::SearchError;
use noonshadow::search::{SearchWindow, transit_search};
use noonshadow::timezone::to_absolute;
use std::cell::RefCell;

/// Transit at 11:00 UTC every day; records the instants it is asked about.
struct RecordingNoon {
    requests: RefCell<Vec<DateTime<Utc>>>,
}

impl Ephemeris for RecordingNoon {
    fn solar_altitude(&self, _: &Observer, instant: DateTime<Utc>) -> Result<f64, SearchError> {
        Ok(instant.timestamp() as f64 / 1e9)
    }

    fn next_transit(&self, _: &Observer, after: DateTime<Utc>) -> Result<DateTime<Utc>, SearchError> {
        self.requests.borrow_mut().push(after);
        let noon = Utc.from_utc_datetime(&after.date_naive().and_hms_opt(11, 0, 0).unwrap());
        Ok(if noon >= after {
            noon
        } else {
            noon + Duration::days(1)
        })
    }

    fn next_solstice(&self, _: SolsticeKind, _: DateTime<Utc>) -> Result<DateTime<Utc>, SearchError> {
        unreachable!("solstice lookup not expected")
    }
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn test_transit_probes_follow_civil_midnights_across_spring_forward() {
    let engine = RecordingNoon {
        requests: RefCell::new(Vec::new()),
    };
    let observer = Observer::new(52.5, 13.4, 0.0).unwrap();
    let window = SearchWindow::around(utc(2018, 3, 25, 12, 0), 2);

    let result = transit_search(&engine, &observer, &window, &Berlin).unwrap();

    assert_eq!(
        *engine.requests.borrow(),
        vec![
            utc(2018, 3, 22, 23, 0),
            utc(2018, 3, 23, 23, 0),
            utc(2018, 3, 24, 23, 0),
            // CEST from here on
            utc(2018, 3, 25, 22, 0),
            utc(2018, 3, 26, 22, 0),
        ]
    );
    assert_eq!(result.probes, 5);
    // Altitude grows with time; the March 23 transit precedes the window.
    assert_eq!(result.best_instant, Some(utc(2018, 3, 27, 11, 0)));
}

#[test]
fn test_transit_probes_across_fall_back() {
    let engine = RecordingNoon {
        requests: RefCell::new(Vec::new()),
    };
    let observer = Observer::new(52.5, 13.4, 0.0).unwrap();
    let window = SearchWindow::around(utc(2018, 10, 28, 12, 0), 1);

    transit_search(&engine, &observer, &window, &Berlin).unwrap();

    assert_eq!(
        *engine.requests.borrow(),
        vec![
            utc(2018, 10, 26, 22, 0),
            utc(2018, 10, 27, 22, 0),
            utc(2018, 10, 28, 23, 0),
        ]
    );
}

#[test]
fn test_spring_forward_gap_is_invalid_time() {
    let gap = NaiveDate::from_ymd_opt(2018, 3, 25)
        .unwrap()
        .and_hms_opt(2, 30, 0)
        .unwrap();
    let err = to_absolute(gap, &Berlin).unwrap_err();
    assert_eq!(
        err,
        SearchError::InvalidTime {
            local: gap,
            timezone: "Europe/Berlin".to_string(),
        }
    );
}

#[test]
fn test_fall_back_ambiguity_takes_first_occurrence() {
    let ambiguous = NaiveDate::from_ymd_opt(2018, 10, 28)
        .unwrap()
        .and_hms_opt(2, 30, 0)
        .unwrap();
    assert_eq!(
        to_absolute(ambiguous, &Berlin).unwrap(),
        utc(2018, 10, 28, 0, 30)
    );
}
