use crate::error::SearchError;
use std::f64::consts::FRAC_PI_2;

/// Length of the shadow cast on level ground by a vertical object of `object_height`
/// meters when the Sun stands `altitude` radians above the horizon.
///
/// The sun has to be strictly between the horizon and the zenith.
pub fn shadow_length(object_height: f64, altitude: f64) -> Result<f64, SearchError> {
    let undefined = || SearchError::UndefinedShadow {
        altitude: altitude.to_degrees(),
    };
    if !altitude.is_finite() || altitude <= 0.0 || altitude >= FRAC_PI_2 {
        return Err(undefined());
    }
    let length = object_height / altitude.tan();
    if length.is_finite() {
        Ok(length)
    } else {
        Err(undefined())
    }
}
