//! Intra-region infection

use rand::Rng;

use crate::epidemic::region::{RegionState, RegionStates};
use crate::epidemic::sampling::binomial;

/// Replace each region's infected count with a fresh draw over its
/// susceptible pool at probability `p_transfer`.
///
/// The draw overwrites rather than adds to `infected_count`.
pub fn local_infection<R: Rng + ?Sized>(
    states: &RegionStates,
    p_transfer: f64,
    rng: &mut R,
) -> RegionStates {
    states.map_regions(|_, state| RegionState {
        infected_count: binomial(rng, state.susceptible(), p_transfer),
        ..*state
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_overwrites_infected_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let states = RegionStates::new(vec![RegionState {
            total_population: 1000,
            infected_count: 400,
            deceased_count: 2,
        }]);
        // p = 1 infects every susceptible, replacing the previous 400
        let next = local_infection(&states, 1.0, &mut rng);
        let region = next.get(0).unwrap();
        assert_eq!(region.infected_count, 600);
        assert_eq!(region.total_population, 1000);
        assert_eq!(region.deceased_count, 2);

        let cleared = local_infection(&states, 0.0, &mut rng);
        assert_eq!(cleared.get(0).unwrap().infected_count, 0);
    }
}
