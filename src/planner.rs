//! Execution planning: resolve the selected catalog entries into observers and zones.

use crate::data::{CATALOG, ObservationPoint, OutputFormat, Parameters};
use crate::ephemeris::{Observer, SpaEphemeris};
use crate::error::PlannerError;
use crate::search::Strategy;
use crate::timezone::display_timezone;
use chrono_tz::Tz;

/// A catalog entry with its derived observer and zones, built once per run.
#[derive(Debug, Clone)]
pub struct PlannedPoint {
    /// 1-based catalog position.
    pub index: usize,
    pub point: ObservationPoint,
    pub observer: Observer,
    pub timezone: Tz,
    pub display_timezone: Tz,
    pub object_height: Option<f64>,
}

pub struct ComputePlan {
    pub points: Vec<PlannedPoint>,
    pub engine: SpaEphemeris,
    pub strategies: Vec<Strategy>,
    pub year: i32,
    pub margin_days: u32,
}

pub struct OutputPlan {
    pub format: OutputFormat,
    pub headers: bool,
    pub fail_fast: bool,
}

pub fn strategies_for(params: &Parameters) -> Vec<Strategy> {
    if params.brute_force {
        vec![Strategy::Transit, Strategy::BruteForce]
    } else {
        vec![Strategy::Transit]
    }
}

pub fn select_points(
    catalog: &[ObservationPoint],
    selection: &[usize],
) -> Result<Vec<(usize, ObservationPoint)>, PlannerError> {
    if selection.is_empty() {
        return Ok(catalog
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx + 1, *point))
            .collect());
    }

    selection
        .iter()
        .map(|&index| {
            index
                .checked_sub(1)
                .and_then(|idx| catalog.get(idx))
                .map(|point| (index, *point))
                .ok_or_else(|| {
                    PlannerError::from(format!(
                        "Point {} does not exist (catalog has {} points)",
                        index,
                        catalog.len()
                    ))
                })
        })
        .collect()
}

pub fn plan_point(
    index: usize,
    point: ObservationPoint,
    params: &Parameters,
) -> Result<PlannedPoint, PlannerError> {
    let context = |err: String| PlannerError::from(format!("{}: {}", point.description, err));
    let observer = point.observer().map_err(context)?;
    let timezone = point.tz().map_err(context)?;
    let object_height = point.validated_object_height().map_err(context)?;
    Ok(PlannedPoint {
        index,
        point,
        observer,
        timezone,
        display_timezone: display_timezone(timezone, params.timezone.as_ref()),
        object_height,
    })
}

pub fn build_job(params: &Parameters) -> Result<(ComputePlan, OutputPlan), PlannerError> {
    let points = select_points(CATALOG, &params.points)?
        .into_iter()
        .map(|(index, point)| plan_point(index, point, params))
        .collect::<Result<Vec<_>, _>>()?;
    let engine = SpaEphemeris::from_parameters(params).map_err(PlannerError::from)?;

    let compute_plan = ComputePlan {
        points,
        engine,
        strategies: strategies_for(params),
        year: params.year,
        margin_days: params.margin_days,
    };
    let output_plan = OutputPlan {
        format: params.output.format,
        headers: params.output.headers,
        fail_fast: params.fail_fast,
    };
    Ok((compute_plan, output_plan))
}
