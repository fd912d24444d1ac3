//! Main simulation loop

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::core::calendar::SimulationCalendar;
use crate::core::config::SimulationConfig;
use crate::core::error::{MetapopError, Result};
use crate::epidemic::kernels;
use crate::epidemic::network::TravelNetwork;
use crate::epidemic::output::{SimulationOutcome, SimulationOutput, SimulationStats};
use crate::epidemic::params::{OutcomeProbabilities, ParameterVector};
use crate::epidemic::population::PopulationTable;
use crate::epidemic::record::DeathRecord;
use crate::epidemic::region::RegionStates;

/// External tables the engine consumes
#[derive(Clone, Debug, Default)]
pub struct EpidemicInputs {
    pub travel: TravelNetwork,
    pub population: PopulationTable,
}

impl EpidemicInputs {
    pub fn new(travel: TravelNetwork, population: PopulationTable) -> Self {
        Self { travel, population }
    }

    /// Check the tables cover `calendar` and agree on one region count,
    /// which is returned.
    pub fn validate(&self, calendar: &SimulationCalendar) -> Result<usize> {
        let initial = self.population.require(calendar.first_year())?;
        let regions = initial.len();

        for (year, populations) in self.population.iter() {
            if populations.len() != regions {
                return Err(MetapopError::RegionCountMismatch {
                    context: format!("population {}", year),
                    expected: regions,
                    actual: populations.len(),
                });
            }
        }

        for slot in calendar.schedule() {
            let matrix = self.travel.require(slot.year, slot.quarter)?;
            if matrix.size() != regions {
                return Err(MetapopError::RegionCountMismatch {
                    context: format!("travel matrix {}", slot),
                    expected: regions,
                    actual: matrix.size(),
                });
            }
        }

        Ok(regions)
    }
}

/// Run the full horizon with a generator seeded from `config.seed`
pub fn run_full_simulation(
    params: &ParameterVector,
    inputs: &EpidemicInputs,
    config: &SimulationConfig,
) -> Result<SimulationOutcome> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    run_full_simulation_with_rng(params, inputs, config, &mut rng)
}

/// Run the full horizon, drawing from `rng`
///
/// Region state is seeded from scratch on every call.
pub fn run_full_simulation_with_rng<R: Rng + ?Sized>(
    params: &ParameterVector,
    inputs: &EpidemicInputs,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationOutcome> {
    if let Some(violation) = params.domain_violation() {
        debug!(%violation, "Parameter vector out of domain");
        return Ok(SimulationOutcome::OutOfDomain(violation));
    }

    config.validate()?;
    let calendar = config.calendar()?;
    let regions = inputs.validate(&calendar)?;

    let start = Instant::now();
    info!(
        regions,
        quarters = calendar.quarter_count(),
        p_inf = params.p_inf,
        p_transfer = params.p_transfer,
        p_rec = params.p_rec,
        "Starting simulation {}..={}",
        calendar.first_year(),
        calendar.last_year()
    );

    let outcome = OutcomeProbabilities::from_rates(params.p_rec, config.p_die);
    let initial = inputs.population.require(calendar.first_year())?;
    let mut states = RegionStates::seeded(initial, params.p_inf, rng);
    let mut record = DeathRecord::new();
    let mut peak_infected = states.total_infected();

    for year in calendar.years() {
        for quarter in calendar.quarters_in(year) {
            let travel = inputs.travel.require(year, quarter)?;

            // 1. Travel and infect
            states = kernels::travel_infection(
                &states,
                travel,
                params.p_transfer,
                config.touch_fraction,
                rng,
            );
            // 2. Recover
            states = kernels::recover_and_die(&states, &outcome, rng);

            // 3. Local contact cycles
            for _ in 0..config.local_cycles {
                states = kernels::local_infection(&states, params.p_transfer, rng);
                states = kernels::recover_and_die(&states, &outcome, rng);
            }

            // 4. Remove deceased and store it
            let (next, deaths) = kernels::extract_deceased(&states);
            states = next;
            let quarter_deaths: u64 = deaths.iter().sum();
            record.record(year, quarter, deaths);

            // 5. Randomly infect
            states = kernels::background_infection(&states, params.p_inf, rng);

            let inconsistent = states.inconsistent_regions();
            if !inconsistent.is_empty() {
                warn!(year, %quarter, regions = ?inconsistent, "Infected count exceeds population");
            }

            peak_infected = peak_infected.max(states.total_infected());
            debug!(
                year,
                %quarter,
                deaths = quarter_deaths,
                infected = states.total_infected(),
                "Quarter complete"
            );
        }

        match inputs.population.get(year + 1) {
            Some(next_population) => {
                states = kernels::inject_population(&states, next_population);
            }
            None => debug!(year = year + 1, "No population data, skipping injection"),
        }
    }

    let deaths = record.to_matrix(regions)?;
    let statistics = SimulationStats {
        regions,
        quarters_simulated: record.quarter_count(),
        total_deaths: record.total_deaths(),
        peak_infected,
        final_population: states.total_population(),
        simulation_time_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        deaths = statistics.total_deaths,
        elapsed_ms = statistics.simulation_time_ms,
        "Simulation complete"
    );

    Ok(SimulationOutcome::Completed(SimulationOutput {
        deaths,
        record,
        statistics,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Quarter;
    use crate::epidemic::network::TravelMatrix;

    fn two_region_inputs() -> EpidemicInputs {
        let mut travel = TravelNetwork::new();
        travel.insert(
            2009,
            Quarter::Q4,
            TravelMatrix::new(vec![vec![0.0, 5.0], vec![5.0, 0.0]]).unwrap(),
        );
        let mut population = PopulationTable::new();
        population.insert(2009, vec![1000, 1000]);
        EpidemicInputs::new(travel, population)
    }

    fn single_quarter_config() -> SimulationConfig {
        SimulationConfig {
            first_year: 2009,
            last_year: 2010,
            sim_quarter: Some(Quarter::Q4),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_out_of_domain_short_circuits() {
        let params = ParameterVector::new(-0.1, 0.01, 0.1);
        // Inputs are empty; the domain check must come first
        let outcome =
            run_full_simulation(&params, &EpidemicInputs::default(), &single_quarter_config())
                .unwrap();
        assert!(matches!(outcome, SimulationOutcome::OutOfDomain(_)));
    }

    #[test]
    fn test_no_seed_no_deaths() {
        let params = ParameterVector::new(0.0, 0.01, 0.1);
        for seed in 0..5 {
            // Local cycles draw over the susceptible pool without needing
            // a seed, so they are switched off here
            let config = SimulationConfig {
                seed,
                local_cycles: 0,
                ..single_quarter_config()
            };
            let outcome = run_full_simulation(&params, &two_region_inputs(), &config).unwrap();
            let output = outcome.output().unwrap();
            assert_eq!(output.deaths.shape(), (2, 1));
            assert_eq!(output.deaths.get(0, 0), 0.0);
            assert_eq!(output.deaths.get(1, 0), 0.0);
            assert_eq!(output.statistics.peak_infected, 0);
        }
    }

    #[test]
    fn test_missing_travel_matrix_is_error() {
        let params = ParameterVector::new(0.0, 0.01, 0.1);
        let config = SimulationConfig {
            first_year: 2009,
            last_year: 2010,
            ..SimulationConfig::default()
        };
        // Q1 2010 has no matrix
        let result = run_full_simulation(&params, &two_region_inputs(), &config);
        assert!(matches!(
            result,
            Err(MetapopError::MissingTravelMatrix { year: 2010, .. })
        ));
    }

    #[test]
    fn test_missing_initial_population_is_error() {
        let params = ParameterVector::new(0.0, 0.01, 0.1);
        let mut inputs = two_region_inputs();
        inputs.population = PopulationTable::new();
        let result = run_full_simulation(&params, &inputs, &single_quarter_config());
        assert!(matches!(result, Err(MetapopError::MissingPopulation(2009))));
    }

    #[test]
    fn test_same_seed_same_deaths() {
        let params = ParameterVector::new(0.01, 0.05, 0.2);
        let config = single_quarter_config();
        let a = run_full_simulation(&params, &two_region_inputs(), &config).unwrap();
        let b = run_full_simulation(&params, &two_region_inputs(), &config).unwrap();
        assert_eq!(a.deaths(), b.deaths());
    }
}
