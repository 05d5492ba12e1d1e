// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! One report sheet row: the original vehicle columns plus the
//! scenario-derived columns. Absent options serialize as empty cells.

use serde::Serialize;

use flotion_types::{Category, Vehicle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetRow {
    pub license_nbr: String,
    pub brand: String,
    pub year: i32,
    pub driver: String,
    pub region: String,
    pub consumption: f64,
    pub co2: f64,
    pub fuel: String,
    pub category: Category,
    pub new_co2: Option<f64>,
    pub new_fuel: Option<String>,
    pub brand_cost: Option<f64>,
    pub new_fuel_cost: Option<f64>,
    pub new_cost_fuel: Option<String>,
    pub new_cost_fuel_co2: Option<f64>,
}

impl SheetRow {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            license_nbr: vehicle.license_nbr.clone(),
            brand: vehicle.brand.clone(),
            year: vehicle.year,
            driver: vehicle.driver.clone(),
            region: vehicle.region.clone(),
            consumption: vehicle.consumption,
            co2: vehicle.co2,
            fuel: vehicle.fuel.clone(),
            category: vehicle.category,
            new_co2: None,
            new_fuel: None,
            brand_cost: None,
            new_fuel_cost: None,
            new_cost_fuel: None,
            new_cost_fuel_co2: None,
        }
    }
}
