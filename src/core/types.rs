//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::MetapopError;

/// Calendar year of the simulated horizon
pub type Year = i32;

/// Number of regions in the production network (50 states, no DC)
pub const DEFAULT_REGION_COUNT: usize = 50;

/// Stable index of a region in the region ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub usize);

impl RegionId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One of the four annual sub-periods, numbered 1 through 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quarter(u8);

impl Quarter {
    pub const Q1: Quarter = Quarter(1);
    pub const Q2: Quarter = Quarter(2);
    pub const Q3: Quarter = Quarter(3);
    pub const Q4: Quarter = Quarter(4);

    pub const ALL: [Quarter; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    pub fn new(number: u8) -> Result<Self, MetapopError> {
        if (1..=4).contains(&number) {
            Ok(Self(number))
        } else {
            Err(MetapopError::InvalidQuarter(number))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Quarter {
    type Error = MetapopError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quarter::new(value)
    }
}

impl From<Quarter> for u8 {
    fn from(quarter: Quarter) -> Self {
        quarter.0
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// A simulated (year, quarter) slot. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuarterSlot {
    pub year: Year,
    pub quarter: Quarter,
}

impl QuarterSlot {
    pub fn new(year: Year, quarter: Quarter) -> Self {
        Self { year, quarter }
    }
}

impl fmt::Display for QuarterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.quarter)
    }
}
