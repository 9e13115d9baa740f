//! Maximum solar altitude search in a window around the solstice.
//!
//! Two strategies sample the same window through the same [`Ephemeris`]:
//! - [`Strategy::Transit`] asks for one solar transit per local calendar day.
//! - [`Strategy::BruteForce`] samples the altitude every second. It is only used to
//!   validate the transit strategy.

use crate::ephemeris::{Ephemeris, Observer};
use crate::error::SearchError;
use crate::timezone::to_absolute;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use chrono_tz::Tz;
use std::fmt;

pub const DEFAULT_MARGIN_DAYS: u32 = 2;
pub const BRUTE_FORCE_STEP_SECONDS: i64 = 1;

/// Below any reachable altitude, so the first sample always wins.
const ALTITUDE_SENTINEL: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Transit,
    BruteForce,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Transit => "transit",
            Strategy::BruteForce => "brute-force",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Closed interval of absolute time that every sample must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SearchWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SearchError> {
        if start > end {
            return Err(SearchError::OutOfRange(format!(
                "search window starts at {} after its end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// `[center - margin_days, center + margin_days]`.
    pub fn around(center: DateTime<Utc>, margin_days: u32) -> Self {
        let margin = Duration::days(i64::from(margin_days));
        Self {
            start: center - margin,
            end: center + margin,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Running maximum of the sampled altitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Degrees.
    pub best_altitude: f64,
    pub best_instant: Option<DateTime<Utc>>,
    pub probes: usize,
}

impl Default for SearchResult {
    fn default() -> Self {
        Self {
            best_altitude: ALTITUDE_SENTINEL,
            best_instant: None,
            probes: 0,
        }
    }
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample; only a strictly higher altitude replaces the best one, so the
    /// earliest of equal maxima is kept when samples arrive in time order.
    pub fn observe(&mut self, instant: DateTime<Utc>, altitude: f64) -> bool {
        if altitude > self.best_altitude {
            self.best_altitude = altitude;
            self.best_instant = Some(instant);
            true
        } else {
            false
        }
    }

    /// Combine two independent accumulators: higher altitude wins, earliest instant on ties.
    pub fn merge(self, other: SearchResult) -> SearchResult {
        let probes = self.probes + other.probes;
        let keep_self = match (self.best_instant, other.best_instant) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(mine), Some(theirs)) => {
                self.best_altitude > other.best_altitude
                    || (self.best_altitude == other.best_altitude && mine <= theirs)
            }
        };
        let winner = if keep_self { self } else { other };
        SearchResult { probes, ..winner }
    }

    pub fn best(&self) -> Result<(DateTime<Utc>, f64), SearchError> {
        self.best_instant
            .map(|instant| (instant, self.best_altitude))
            .ok_or(SearchError::NoCandidate)
    }
}

/// One transit per local calendar day touched by the window, starting from local midnight.
///
/// Days are stepped on the civil calendar so DST changes cannot shift the probes.
/// Transits falling outside the window are counted as probes but never selected.
pub fn transit_search<E: Ephemeris + ?Sized>(
    engine: &E,
    observer: &Observer,
    window: &SearchWindow,
    timezone: &Tz,
) -> Result<SearchResult, SearchError> {
    let first_day = window.start.with_timezone(timezone).date_naive();
    let last_day = window.end.with_timezone(timezone).date_naive();

    let mut result = SearchResult::new();
    for day in first_day.iter_days().take_while(|day| *day <= last_day) {
        let midnight = to_absolute(day.and_time(NaiveTime::MIN), timezone)?;
        let transit = engine.next_transit(observer, midnight)?;
        result.probes += 1;

        if !window.contains(transit) {
            log::debug!("{}: transit {} outside search window", day, transit);
            continue;
        }

        let altitude = engine.solar_altitude(observer, transit)?;
        let improved = result.observe(transit, altitude);
        log::debug!(
            "{}: transit {} altitude {:.6}°{}",
            day,
            transit,
            altitude,
            if improved { " (best so far)" } else { "" }
        );
    }
    Ok(result)
}

/// Altitude at every whole second from the window start up to its end.
pub fn brute_force_search<E: Ephemeris + ?Sized>(
    engine: &E,
    observer: &Observer,
    window: &SearchWindow,
) -> Result<SearchResult, SearchError> {
    let step = Duration::seconds(BRUTE_FORCE_STEP_SECONDS);
    let mut result = SearchResult::new();
    let mut instant = window.start;
    while instant <= window.end {
        let altitude = engine.solar_altitude(observer, instant)?;
        result.probes += 1;
        result.observe(instant, altitude);
        instant += step;
    }
    Ok(result)
}

pub fn search<E: Ephemeris + ?Sized>(
    strategy: Strategy,
    engine: &E,
    observer: &Observer,
    window: &SearchWindow,
    timezone: &Tz,
) -> Result<SearchResult, SearchError> {
    let result = match strategy {
        Strategy::Transit => transit_search(engine, observer, window, timezone)?,
        Strategy::BruteForce => brute_force_search(engine, observer, window)?,
    };
    if let Some(instant) = result.best_instant {
        log::info!(
            "{} search: {:.6}° at {} after {} probes",
            strategy,
            result.best_altitude,
            instant,
            result.probes
        );
    }
    Ok(result)
}
