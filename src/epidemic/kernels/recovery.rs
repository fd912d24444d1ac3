//! Recovery and death split

use rand::Rng;

use crate::epidemic::params::OutcomeProbabilities;
use crate::epidemic::region::{RegionState, RegionStates};
use crate::epidemic::sampling::multinomial;

/// Fate of one region's infected pool over a recovery step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutcomeSplit {
    pub recovered: u64,
    pub still_infected: u64,
    pub dead: u64,
}

/// Multinomial split of `infected` over {recovered, stays infected, dies}
pub fn split_outcomes<R: Rng + ?Sized>(
    infected: u64,
    outcome: &OutcomeProbabilities,
    rng: &mut R,
) -> OutcomeSplit {
    let [recovered, still_infected, dead] = multinomial(rng, infected, &outcome.as_array());
    OutcomeSplit {
        recovered,
        still_infected,
        dead,
    }
}

/// Remove recovered and dead individuals from every infected pool.
/// Deaths also leave the population and accumulate in `deceased_count`.
pub fn recover_and_die<R: Rng + ?Sized>(
    states: &RegionStates,
    outcome: &OutcomeProbabilities,
    rng: &mut R,
) -> RegionStates {
    states.map_regions(|_, state| {
        let split = split_outcomes(state.infected_count, outcome, rng);
        RegionState {
            total_population: state.total_population.saturating_sub(split.dead),
            infected_count: state.infected_count - split.recovered - split.dead,
            deceased_count: state.deceased_count + split.dead,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_full_recovery_leaves_no_infected_or_dead() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let states = RegionStates::new(vec![RegionState {
            total_population: 100,
            infected_count: 100,
            deceased_count: 0,
        }]);
        let outcome = OutcomeProbabilities::from_rates(1.0, 0.0);
        let next = recover_and_die(&states, &outcome, &mut rng);
        let region = next.get(0).unwrap();
        assert_eq!(region.infected_count, 0);
        assert_eq!(region.deceased_count, 0);
        assert_eq!(region.total_population, 100);
    }

    #[test]
    fn test_certain_death_removes_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let states = RegionStates::new(vec![RegionState {
            total_population: 50,
            infected_count: 20,
            deceased_count: 5,
        }]);
        let outcome = OutcomeProbabilities {
            recover: 0.0,
            stay: 0.0,
            die: 1.0,
        };
        let next = recover_and_die(&states, &outcome, &mut rng);
        let region = next.get(0).unwrap();
        assert_eq!(region.infected_count, 0);
        assert_eq!(region.total_population, 30);
        assert_eq!(region.deceased_count, 25);
    }

    #[test]
    fn test_split_conserves_infected() {
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let outcome = OutcomeProbabilities::from_rates(0.3, 0.05);
        for infected in [0u64, 1, 17, 10_000] {
            let split = split_outcomes(infected, &outcome, &mut rng);
            assert_eq!(split.recovered + split.still_infected + split.dead, infected);
        }
    }
}
