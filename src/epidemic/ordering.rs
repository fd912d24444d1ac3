//! Region ordering - fixed list of region codes with stable indices

use std::collections::HashMap;

use serde::Serialize;

use crate::core::error::{MetapopError, Result};
use crate::core::types::RegionId;

#[derive(Clone, Debug, Default, Serialize)]
pub struct RegionOrdering {
    codes: Vec<String>,
    #[serde(skip)]
    by_code: HashMap<String, RegionId>,
}

impl RegionOrdering {
    pub fn new(codes: Vec<String>) -> Result<Self> {
        let mut by_code = HashMap::with_capacity(codes.len());
        for (i, code) in codes.iter().enumerate() {
            if by_code.insert(code.clone(), RegionId(i)).is_some() {
                return Err(MetapopError::DuplicateRegion(code.clone()));
            }
        }
        Ok(Self { codes, by_code })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn index_of(&self, code: &str) -> Option<RegionId> {
        self.by_code.get(code).copied()
    }

    pub fn require(&self, code: &str) -> Result<RegionId> {
        self.index_of(code)
            .ok_or_else(|| MetapopError::UnknownRegion(code.to_string()))
    }

    pub fn code(&self, id: RegionId) -> Option<&str> {
        self.codes.get(id.index()).map(String::as_str)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}
