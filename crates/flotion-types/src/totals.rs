// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Per-category emission reference tables ("totals").
//!
//! Each category carries the universe of fuel options available to it and
//! the lifecycle CO2 factor for each option. Scenarios filter or rewrite
//! copies of these tables before the optimal-fuel selection runs.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Fuel names that scenario policies single out.
pub mod fuels {
    pub const BIODIESEL: &str = "Biodiesel B25.5 (25% inblandning av FAME/HVO)";
    pub const BIOBENSIN: &str = "Biobensin E4.8 (4.8% bioinblandning)";
    pub const DIESEL: &str = "Konventionell diesel";
    pub const BENSIN: &str = "Konventionell bensin";
    pub const ELFORDON_17: &str = "Elfordon. 17 kWh";
}

/// One fuel option row: fuel name and its CO2 factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelOption {
    pub fuel: String,
    pub co2: f64,
}

/// Ordered per-category fuel option tables.
///
/// Iteration order is insertion (load) order; the selector's tie breaking
/// and the cost refiner both depend on it, so this is a `Vec` rather than
/// a map.
#[derive(Debug, Clone, Default)]
pub struct EmissionTotals {
    tables: Vec<(Category, Vec<FuelOption>)>,
}

impl EmissionTotals {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Insert or replace the table for a category.
    pub fn insert(&mut self, category: Category, rows: Vec<FuelOption>) {
        if let Some(slot) = self.tables.iter_mut().find(|(c, _)| *c == category) {
            slot.1 = rows;
        } else {
            self.tables.push((category, rows));
        }
    }

    pub fn get(&self, category: Category) -> Option<&[FuelOption]> {
        self.tables
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[FuelOption])> {
        self.tables.iter().map(|(c, rows)| (*c, rows.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Category, &mut Vec<FuelOption>)> {
        self.tables.iter_mut().map(|(c, rows)| (*c, rows))
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// CO2 factor for an exact fuel name within a category's table.
    pub fn co2_for(&self, category: Category, fuel: &str) -> Option<f64> {
        self.get(category)?
            .iter()
            .find(|row| row.fuel == fuel)
            .map(|row| row.co2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(fuel: &str, co2: f64) -> FuelOption {
        FuelOption {
            fuel: fuel.to_owned(),
            co2,
        }
    }

    #[test]
    fn insert_preserves_first_seen_category_order() {
        let mut totals = EmissionTotals::new();
        totals.insert(Category::Big, vec![option("A", 1.0)]);
        totals.insert(Category::Medium, vec![option("B", 2.0)]);
        totals.insert(Category::Big, vec![option("C", 3.0)]);

        let order: Vec<Category> = totals.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Category::Big, Category::Medium]);
        assert_eq!(totals.get(Category::Big).unwrap()[0].fuel, "C");
    }

    #[test]
    fn co2_lookup_is_exact_match() {
        let mut totals = EmissionTotals::new();
        totals.insert(Category::Work, vec![option("Elfordon. 17 kWh", 9785.0)]);
        assert_eq!(
            totals.co2_for(Category::Work, "Elfordon. 17 kWh"),
            Some(9785.0)
        );
        assert_eq!(totals.co2_for(Category::Work, "Elfordon"), None);
    }
}
