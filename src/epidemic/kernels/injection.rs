//! Year-boundary population injection

use tracing::debug;

use crate::epidemic::region::{RegionState, RegionStates};

/// Move one region to next year's population figure.
///
/// Growth joins the susceptible pool. A loss is taken from the infected
/// and susceptible pools at roughly the same rate: half the loss (rounded
/// down) comes from susceptibles and the rest from the infected, unless
/// the infected pool is too small, in which case every infection is
/// cleared. The population always ends at `new_population`.
pub fn reconcile_region(state: &RegionState, new_population: u64) -> RegionState {
    reconcile(state, new_population).0
}

fn reconcile(state: &RegionState, new_population: u64) -> (RegionState, bool) {
    let current = state.total_population;
    let mut next = *state;

    if new_population > current {
        next.total_population = new_population;
    } else if new_population < current {
        let loss = current - new_population;
        let half = loss / 2;
        if half >= state.infected_count {
            next.infected_count = 0;
        } else {
            next.infected_count = state.infected_count - (loss - half);
        }
        next.total_population = new_population;
    }

    let clamped = next.infected_count > next.total_population;
    if clamped {
        next.infected_count = next.total_population;
    }
    (next, clamped)
}

/// Reconcile every region with next year's populations
pub fn inject_population(states: &RegionStates, new_population: &[u64]) -> RegionStates {
    debug_assert_eq!(states.len(), new_population.len());
    states.map_regions(|i, state| {
        let (next, clamped) = reconcile(state, new_population[i]);
        if clamped {
            debug!(
                region = i,
                infected = state.infected_count,
                population = next.total_population,
                "Clamped infected count to shrunken population"
            );
        }
        next
    })
}
