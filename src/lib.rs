pub mod cli;
pub mod compute;
pub mod data;
pub mod ephemeris;
pub mod error;
pub mod output;
pub mod planner;
pub mod refraction;
pub mod search;
pub mod shadow;
pub mod solstice;
pub mod timezone;
