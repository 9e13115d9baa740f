pub mod catalog;
pub mod config;
pub mod validation;

pub use catalog::{CATALOG, ObservationPoint};
pub use config::{Environment, OutputFormat, OutputOptions, Parameters};
pub use validation::*;
