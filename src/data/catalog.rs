//! Static observation points processed by every run.

use super::validation::validate_object_height;
use crate::ephemeris::Observer;
use crate::timezone::parse_timezone;
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationPoint {
    pub description: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above the reference ellipsoid; sea level when absent.
    pub elevation: Option<f64>,
    pub timezone: &'static str,
    /// Height of a vertical object whose shadow is reported.
    pub object_height: Option<f64>,
}

impl ObservationPoint {
    pub fn observer(&self) -> Result<Observer, String> {
        Observer::new(
            self.latitude,
            self.longitude,
            self.elevation.unwrap_or(0.0),
        )
    }

    pub fn tz(&self) -> Result<Tz, String> {
        parse_timezone(self.timezone)
    }

    pub fn validated_object_height(&self) -> Result<Option<f64>, String> {
        self.object_height.map(validate_object_height).transpose()
    }
}

pub const CATALOG: &[ObservationPoint] = &[
    ObservationPoint {
        description: "Faro del Bicentenario, Córdoba, Argentina",
        latitude: -31.42841,
        longitude: -64.18202,
        elevation: Some(424.50),
        timezone: "America/Argentina/Cordoba",
        object_height: Some(60.0),
    },
    ObservationPoint {
        description: "Tropic of Capricorn sundial, Huacalera, Jujuy, Argentina",
        latitude: -23.447783,
        longitude: -65.351664,
        elevation: Some(2741.75),
        timezone: "America/Argentina/Jujuy",
        object_height: None,
    },
    ObservationPoint {
        description: "Tropic of Capricorn 2018 latitude at Ruta Nacional 9, Huacalera, Jujuy, Argentina",
        latitude: -23.43686,
        longitude: -65.351020,
        elevation: Some(2741.75),
        timezone: "America/Argentina/Jujuy",
        object_height: None,
    },
    ObservationPoint {
        description: "Overhead-sun latitude at Ruta Nacional 9, Huacalera, Jujuy, Argentina",
        latitude: -23.43518,
        longitude: -65.351325,
        elevation: Some(2741.75),
        timezone: "America/Argentina/Jujuy",
        object_height: None,
    },
    ObservationPoint {
        description: "Obelisco, Buenos Aires, Argentina",
        latitude: -34.603611,
        longitude: -58.381667,
        elevation: Some(37.75),
        timezone: "America/Argentina/Buenos_Aires",
        object_height: Some(67.5),
    },
];
