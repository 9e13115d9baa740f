use crate::data::Environment;
use solar_positioning::RefractionCorrection;

const INVALID_ATMOSPHERIC_PARAMS: &str = "Invalid atmospheric parameters";

pub fn create_refraction_correction(
    environment: &Environment,
) -> Result<Option<RefractionCorrection>, String> {
    if !environment.refraction {
        return Ok(None);
    }
    RefractionCorrection::new(environment.pressure, environment.temperature)
        .map(Some)
        .map_err(|err| format!("{}: {}", INVALID_ATMOSPHERIC_PARAMS, err))
}
