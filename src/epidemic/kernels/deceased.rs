//! Deceased extraction

use crate::epidemic::region::{RegionState, RegionStates};

/// Read out every region's quarterly death accumulator and reset it
pub fn extract_deceased(states: &RegionStates) -> (RegionStates, Vec<u64>) {
    let deaths = states.iter().map(|s| s.deceased_count).collect();
    let next = states.map_regions(|_, state| RegionState {
        deceased_count: 0,
        ..*state
    });
    (next, deaths)
}
