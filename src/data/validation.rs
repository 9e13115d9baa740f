pub const MIN_YEAR: i32 = -1000;
pub const MAX_YEAR: i32 = 3000;
pub const MAX_MARGIN_DAYS: u32 = 30;

fn ensure_within(value: f64, min: f64, max: f64, label: &str) -> Result<f64, String> {
    if !(min..=max).contains(&value) {
        Err(format!(
            "{} must be between {} and {} degrees, got {}",
            label, min, max, value
        ))
    } else {
        Ok(value)
    }
}

pub fn validate_latitude(value: f64) -> Result<f64, String> {
    ensure_within(value, -90.0, 90.0, "Latitude")
}

pub fn validate_longitude(value: f64) -> Result<f64, String> {
    ensure_within(value, -180.0, 180.0, "Longitude")
}

pub fn validate_year(value: i32) -> Result<i32, String> {
    if (MIN_YEAR..=MAX_YEAR).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "Year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, value
        ))
    }
}

pub fn validate_margin(value: u32) -> Result<u32, String> {
    if (1..=MAX_MARGIN_DAYS).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "Margin must be between 1 and {} days, got {}",
            MAX_MARGIN_DAYS, value
        ))
    }
}

pub fn validate_object_height(value: f64) -> Result<f64, String> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("Object height must be positive, got {}", value))
    }
}
