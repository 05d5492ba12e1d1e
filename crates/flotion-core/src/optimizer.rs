// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Bounded big-to-medium reassignment.
//!
//! Operations can downsize a limited share of the big vans in the regions
//! with medium-van coverage. The cap is a quarter of the eligible
//! candidates, worst emitters first.

use std::collections::HashSet;

use flotion_types::{Category, Vehicle};

/// Regions where a big van can be swapped for a medium one.
pub const REPLACEMENT_REGIONS: [&str; 3] = ["ÖST", "SYD", "VÄST"];

/// Reassign the top quarter of eligible big vans to medium.
///
/// Runs only when the big category's optimal CO2 is strictly below
/// medium's; otherwise the fleet is returned unchanged. Candidates are the
/// big vans in [`REPLACEMENT_REGIONS`], ordered by descending CO2 (stable
/// on ties), truncated to `count / 4`. Returns the updated fleet copy and
/// the license numbers that were reassigned, so the report can redisplay
/// them as big.
pub fn optimize_big(
    vehicles: &[Vehicle],
    big_opt_co2: Option<f64>,
    medium_opt_co2: Option<f64>,
) -> (Vec<Vehicle>, HashSet<String>) {
    let (Some(big), Some(medium)) = (big_opt_co2, medium_opt_co2) else {
        return (vehicles.to_vec(), HashSet::new());
    };
    if big >= medium {
        return (vehicles.to_vec(), HashSet::new());
    }

    let mut candidates: Vec<usize> = vehicles
        .iter()
        .enumerate()
        .filter(|(_, v)| {
            v.category == Category::Big && REPLACEMENT_REGIONS.contains(&v.region.as_str())
        })
        .map(|(i, _)| i)
        .collect();
    candidates.sort_by(|&a, &b| vehicles[b].co2.total_cmp(&vehicles[a].co2));
    candidates.truncate(candidates.len() / 4);

    let mut updated = vehicles.to_vec();
    let mut replaced = HashSet::new();
    for &idx in &candidates {
        updated[idx].category = Category::Medium;
        replaced.insert(updated[idx].license_nbr.clone());
    }
    (updated, replaced)
}
