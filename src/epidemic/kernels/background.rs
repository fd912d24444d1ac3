//! Background (random) infection

use rand::Rng;

use crate::epidemic::region::{RegionState, RegionStates};
use crate::epidemic::sampling::binomial;

/// Add a binomial draw of new infections over each region's susceptible
/// pool at probability `p_inf`. Inconsistent regions are left unchanged.
pub fn background_infection<R: Rng + ?Sized>(
    states: &RegionStates,
    p_inf: f64,
    rng: &mut R,
) -> RegionStates {
    states.map_regions(|_, state| {
        if !state.is_consistent() {
            return *state;
        }
        RegionState {
            infected_count: state.infected_count + binomial(rng, state.susceptible(), p_inf),
            ..*state
        }
    })
}
