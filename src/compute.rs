//! Per-point pipeline: solstice, window, strategies, shadow.

use crate::ephemeris::Ephemeris;
use crate::error::SearchError;
use crate::planner::{ComputePlan, PlannedPoint};
use crate::search::{self, SearchWindow, Strategy};
use crate::shadow::shadow_length;
use crate::solstice::next_solstice;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Outcome of one strategy for one point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointReport {
    pub index: usize,
    pub description: &'static str,
    pub strategy: Strategy,
    pub solstice: DateTime<Utc>,
    pub best_instant: DateTime<Utc>,
    /// Degrees.
    pub best_altitude: f64,
    pub probes: usize,
    pub object_height: Option<f64>,
    /// Present only for points with an object height.
    pub shadow: Option<Result<f64, SearchError>>,
    pub display_timezone: Tz,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointFailure {
    pub index: usize,
    pub description: &'static str,
    pub error: SearchError,
}

pub type PointOutcome = Result<PointReport, PointFailure>;

fn failure(point: &PlannedPoint, error: SearchError) -> PointFailure {
    PointFailure {
        index: point.index,
        description: point.point.description,
        error,
    }
}

pub fn locate_window<E: Ephemeris + ?Sized>(
    engine: &E,
    point: &PlannedPoint,
    year: i32,
    margin_days: u32,
) -> Result<(DateTime<Utc>, SearchWindow), SearchError> {
    let solstice = next_solstice(engine, point.observer.latitude, year, &point.timezone)?;
    log::info!("{}: solstice at {}", point.point.description, solstice);
    Ok((solstice, SearchWindow::around(solstice, margin_days)))
}

pub fn run_strategy<E: Ephemeris + ?Sized>(
    engine: &E,
    point: &PlannedPoint,
    strategy: Strategy,
    solstice: DateTime<Utc>,
    window: &SearchWindow,
) -> Result<PointReport, SearchError> {
    let result = search::search(strategy, engine, &point.observer, window, &point.timezone)?;
    let (best_instant, best_altitude) = result.best()?;
    let shadow = point
        .object_height
        .map(|height| shadow_length(height, best_altitude.to_radians()));

    Ok(PointReport {
        index: point.index,
        description: point.point.description,
        strategy,
        solstice,
        best_instant,
        best_altitude,
        probes: result.probes,
        object_height: point.object_height,
        shadow,
        display_timezone: point.display_timezone,
    })
}

/// Run every strategy for one point, stopping at the first error.
pub fn calculate_point<E: Ephemeris + ?Sized>(
    engine: &E,
    point: &PlannedPoint,
    strategies: &[Strategy],
    year: i32,
    margin_days: u32,
) -> Result<Vec<PointReport>, PointFailure> {
    let (solstice, window) =
        locate_window(engine, point, year, margin_days).map_err(|e| failure(point, e))?;
    strategies
        .iter()
        .map(|&strategy| {
            run_strategy(engine, point, strategy, solstice, &window).map_err(|e| failure(point, e))
        })
        .collect()
}

/// Lazily evaluates the strategies of one point so each report can be written as soon
/// as it is ready.
struct PointRun<E> {
    engine: E,
    point: PlannedPoint,
    strategies: std::vec::IntoIter<Strategy>,
    year: i32,
    margin_days: u32,
    located: Option<(DateTime<Utc>, SearchWindow)>,
    done: bool,
}

impl<E: Ephemeris> Iterator for PointRun<E> {
    type Item = PointOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (solstice, window) = match self.located {
            Some(located) => located,
            None => match locate_window(&self.engine, &self.point, self.year, self.margin_days) {
                Ok(located) => *self.located.insert(located),
                Err(error) => {
                    self.done = true;
                    return Some(Err(failure(&self.point, error)));
                }
            },
        };

        let strategy = self.strategies.next()?;
        let outcome = run_strategy(&self.engine, &self.point, strategy, solstice, &window)
            .map_err(|error| failure(&self.point, error));
        if outcome.is_err() {
            self.done = true;
        }
        Some(outcome)
    }
}

/// Points in plan order, strategies in plan order within each point.
pub fn calculate_stream(plan: ComputePlan) -> Box<dyn Iterator<Item = PointOutcome>> {
    let ComputePlan {
        points,
        engine,
        strategies,
        year,
        margin_days,
    } = plan;

    Box::new(points.into_iter().flat_map(move |point| PointRun {
        engine,
        point,
        strategies: strategies.clone().into_iter(),
        year,
        margin_days,
        located: None,
        done: false,
    }))
}
