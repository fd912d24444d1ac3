//! Cross-region travel infection

use rand::Rng;

use crate::epidemic::network::TravelMatrix;
use crate::epidemic::region::{RegionState, RegionStates};
use crate::epidemic::sampling::binomial;

/// Probability that at least one of `expected_arrivals` infected contacts
/// transmits: `1 - (1 - p_transfer)^expected_arrivals`, with a real
/// exponent. A non-finite result falls back to 1.
pub fn transmission_probability(p_transfer: f64, expected_arrivals: f64) -> f64 {
    let p = 1.0 - (1.0 - p_transfer).powf(expected_arrivals);
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Infect residents of each destination through travelers arriving from
/// every other region.
///
/// Infected fractions are read from `states` before any destination is
/// updated, so all regions move simultaneously. Only `infected_count`
/// changes.
///
/// An empty origin region reports an infected fraction of 0 and so sends
/// no infected travelers. The non-finite fallback in
/// [`transmission_probability`] is therefore not reached through this
/// kernel with consistent region state.
pub fn travel_infection<R: Rng + ?Sized>(
    states: &RegionStates,
    travel: &TravelMatrix,
    p_transfer: f64,
    touch_fraction: f64,
    rng: &mut R,
) -> RegionStates {
    debug_assert_eq!(states.len(), travel.size());
    let fractions = states.infected_fractions();

    states.map_regions(|dest, state| {
        let susceptible = state.susceptible();
        if susceptible == 0 {
            return *state;
        }

        let expected = travel.expected_infected_arrivals(dest, &fractions);
        let p = transmission_probability(p_transfer, expected);
        let exposed = (touch_fraction * susceptible as f64).round() as u64;

        RegionState {
            infected_count: state.infected_count + binomial(rng, exposed, p),
            ..*state
        }
    })
}
