// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! The per-vehicle record the scenario engine operates on.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// One physical vehicle in the fleet.
///
/// `category` is derived from the brand at load time and is only ever
/// changed by scenario logic (big to medium reassignment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub license_nbr: String,
    pub brand: String,
    pub year: i32,
    pub driver: String,
    pub region: String,
    pub consumption: f64,
    pub co2: f64,
    pub fuel: String,
    pub category: Category,
}

impl Vehicle {
    /// Normalize a raw brand cell: uppercase, keep the first two words.
    ///
    /// The master file carries trim levels after the model name
    /// ("Volvo V90 D4 AWD"); the catalog keys on make plus model only.
    pub fn normalize_brand(raw: &str) -> String {
        raw.to_uppercase()
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_normalization_keeps_first_two_words_uppercased() {
        assert_eq!(Vehicle::normalize_brand("Volvo V90 D4 AWD"), "VOLVO V90");
        assert_eq!(Vehicle::normalize_brand("vw caddy"), "VW CADDY");
        assert_eq!(Vehicle::normalize_brand("MB  Sprinter  316"), "MB SPRINTER");
    }
}
