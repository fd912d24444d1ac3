//! Population table - region-ordered population vectors by year

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{MetapopError, Result};
use crate::core::types::Year;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PopulationTable {
    by_year: BTreeMap<Year, Vec<u64>>,
}

impl PopulationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: Year, populations: Vec<u64>) {
        self.by_year.insert(year, populations);
    }

    pub fn get(&self, year: Year) -> Option<&[u64]> {
        self.by_year.get(&year).map(Vec::as_slice)
    }

    pub fn require(&self, year: Year) -> Result<&[u64]> {
        self.get(year).ok_or(MetapopError::MissingPopulation(year))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Year, &[u64])> {
        self.by_year.iter().map(|(&y, v)| (y, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_year_is_reported() {
        let mut table = PopulationTable::new();
        table.insert(2009, vec![10, 20]);
        assert_eq!(table.require(2009).unwrap(), &[10, 20]);
        assert!(table.get(2010).is_none());
        assert!(matches!(
            table.require(2010),
            Err(MetapopError::MissingPopulation(2010))
        ));
    }
}
