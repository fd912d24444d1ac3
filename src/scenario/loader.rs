//! Load scenario documents from TOML or JSON

use std::path::Path;

use crate::core::error::{MetapopError, Result};
use crate::epidemic::network::{TravelMatrix, TravelNetwork};
use crate::epidemic::observed::ObservedDeaths;
use crate::epidemic::ordering::RegionOrdering;
use crate::epidemic::population::PopulationTable;
use crate::epidemic::simulation::EpidemicInputs;
use crate::scenario::schema::Scenario;

/// Validated tables built from a scenario document
#[derive(Debug, Clone)]
pub struct LoadedScenario {
    pub ordering: RegionOrdering,
    pub inputs: EpidemicInputs,
    pub observed: Option<ObservedDeaths>,
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check every table against the region list and build the engine's
    /// input types
    pub fn build(self) -> Result<LoadedScenario> {
        let ordering = RegionOrdering::new(self.regions)?;
        let regions = ordering.len();

        let mut population = PopulationTable::new();
        for entry in self.population {
            if entry.counts.len() != regions {
                return Err(MetapopError::RegionCountMismatch {
                    context: format!("population {}", entry.year),
                    expected: regions,
                    actual: entry.counts.len(),
                });
            }
            population.insert(entry.year, entry.counts);
        }

        let mut travel = TravelNetwork::new();
        for entry in self.travel {
            let matrix = TravelMatrix::new(entry.matrix)?;
            if matrix.size() != regions {
                return Err(MetapopError::RegionCountMismatch {
                    context: format!("travel matrix {}{}", entry.year, entry.quarter),
                    expected: regions,
                    actual: matrix.size(),
                });
            }
            travel.insert(entry.year, entry.quarter, matrix);
        }

        let observed = if self.observed.is_empty() {
            None
        } else {
            let mut observed = ObservedDeaths::new();
            for entry in self.observed {
                ordering.require(&entry.region)?;
                observed.add(&entry.region, entry.year, entry.quarter, entry.deaths);
            }
            Some(observed)
        };

        Ok(LoadedScenario {
            ordering,
            inputs: EpidemicInputs::new(travel, population),
            observed,
        })
    }
}

/// Load a scenario file, picking the format from its extension
pub fn load_scenario(path: &Path) -> Result<LoadedScenario> {
    let parse: fn(&str) -> Result<Scenario> = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Scenario::from_toml_str,
        Some("json") => Scenario::from_json_str,
        _ => return Err(MetapopError::UnsupportedFormat(path.display().to_string())),
    };
    let content = std::fs::read_to_string(path)?;
    parse(&content)?.build()
}
