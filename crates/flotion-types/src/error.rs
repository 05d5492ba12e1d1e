// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Error types for fleet data and scenario evaluation.

use thiserror::Error;

use crate::catalog::Category;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("could not classify brand {0:?}")]
    UnknownBrand(String),

    #[error("no fuel options left for category {category} after scenario filtering")]
    NoFuelOptions { category: Category },

    #[error("no eligible fuel cost options for category {category}")]
    NoCostOptions { category: Category },

    #[error("no CO2 factor for fuel {fuel:?} in category {category} totals")]
    UnknownFuelCo2 { category: Category, fuel: String },

    #[error("CO2 override file has {overrides} rows but the fleet has {vehicles}")]
    Co2OverrideMismatch { overrides: usize, vehicles: usize },
}

pub type Result<T> = std::result::Result<T, FleetError>;
