use thiserror::Error;

use crate::core::types::{Quarter, Year};

#[derive(Error, Debug)]
pub enum MetapopError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Region count mismatch in {context}: expected {expected}, got {actual}")]
    RegionCountMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("No travel matrix for {year} {quarter}")]
    MissingTravelMatrix { year: Year, quarter: Quarter },

    #[error("No population data for year {0}")]
    MissingPopulation(Year),

    #[error("No observed deaths for region {region} in {year} {quarter}")]
    MissingObservation {
        region: String,
        year: Year,
        quarter: Quarter,
    },

    #[error("Simulation horizon {first_year}..={last_year} contains no quarters")]
    EmptyHorizon { first_year: Year, last_year: Year },

    #[error("Invalid quarter: {0} (expected 1-4)")]
    InvalidQuarter(u8),

    #[error("Invalid travel weight {value} at ({row}, {col})")]
    InvalidTravelWeight { row: usize, col: usize, value: f64 },

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Duplicate region: {0}")]
    DuplicateRegion(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported scenario format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MetapopError>;
