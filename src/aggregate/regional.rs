//! Station count per département, joined against the boundary dataset.

use std::collections::HashMap;

use serde::Serialize;

use crate::boundary::BoundarySet;
use crate::normalize::Station;

/// Station count for one boundary region. `stations` is zero (not null)
/// when no record matched the region; the choice of zero over null keeps
/// the output shape uniform for the map renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub code: String,
    pub name: String,
    pub stations: u64,
}

/// Raw station count per region code, before the spatial join.
pub fn counts_by_region(stations: &[Station]) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for station in stations {
        *counts.entry(station.region.clone()).or_default() += 1;
    }
    counts
}

/// Left-join from the boundary set into the counts: every boundary region
/// appears exactly once, in boundary-file order; region codes present in
/// the data but absent from the boundary set are dropped silently.
pub fn join_boundaries(
    boundaries: &BoundarySet,
    counts: &HashMap<String, u64>,
) -> Vec<RegionCount> {
    boundaries
        .regions
        .iter()
        .map(|region| RegionCount {
            code: region.code.clone(),
            name: region.name.clone(),
            stations: counts.get(&region.code).copied().unwrap_or(0),
        })
        .collect()
}
