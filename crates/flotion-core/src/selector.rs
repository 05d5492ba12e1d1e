// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Minimum-CO2 fuel selection and the improvement filter.

use std::collections::HashMap;

use flotion_types::{Category, EmissionTotals, FleetError, Result, Vehicle};

/// Optimal fuel choice per category for one scenario.
///
/// Keeps two views, matching how the report columns are derived:
/// the optimal CO2 per category, and the fuel name keyed on that exact
/// CO2 value. On a CO2 collision across categories the later category
/// wins the fuel name.
#[derive(Debug, Clone, Default)]
pub struct OptimalChoices {
    by_category: Vec<(Category, f64)>,
    fuel_by_co2: HashMap<u64, String>,
}

impl OptimalChoices {
    pub fn co2_for(&self, category: Category) -> Option<f64> {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, co2)| *co2)
    }

    pub fn fuel_for_co2(&self, co2: f64) -> Option<&str> {
        self.fuel_by_co2.get(&co2.to_bits()).map(String::as_str)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.by_category.iter().map(|(c, _)| *c)
    }
}

/// Find the minimum-CO2 fuel option for every category in the
/// scenario-filtered totals. Ties go to the earlier table row. A category
/// whose filtered table is empty has no valid minimum and fails the
/// scenario.
pub fn find_optimal(totals: &EmissionTotals) -> Result<OptimalChoices> {
    let mut choices = OptimalChoices::default();
    for (category, rows) in totals.iter() {
        let mut best = None;
        for row in rows {
            if best.is_none_or(|(co2, _)| row.co2 < co2) {
                best = Some((row.co2, row.fuel.as_str()));
            }
        }
        let (co2, fuel) = best.ok_or(FleetError::NoFuelOptions { category })?;
        choices.by_category.push((category, co2));
        choices.fuel_by_co2.insert(co2.to_bits(), fuel.to_owned());
    }
    Ok(choices)
}

/// Keep only vehicles that would actually improve: current CO2 strictly
/// above the optimum for their category. Original order is preserved.
/// Vehicles in a category without a computed optimum are dropped.
pub fn filter_better_co2(vehicles: &[Vehicle], choices: &OptimalChoices) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|v| choices.co2_for(v.category).is_some_and(|opt| v.co2 > opt))
        .cloned()
        .collect()
}
