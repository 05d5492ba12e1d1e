// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! What-if scenario definitions.
//!
//! Each scenario is a pure transformation of (totals, fleet) into a
//! filtered copy of both. The policies are fixed company decisions, not a
//! configurable model:
//!
//! - **Lease Expired**: only vehicles whose lease has run out
//! - **No Bio Blends**: drop the two blend fuels from the option tables
//! - **Electricity mix**: recompute EV factors for a named power grid
//! - **Top Decile**: replace only the 10% worst emitters
//! - **Conventional Only**: petrol and diesel options only
//! - **Replace All**: the theoretical everything-goes case
//! - **Cost variants**: lease filter plus a cost-minimizing second pass

use flotion_types::{Category, CostEntry, EmissionTotals, Vehicle, fuels};

/// Model-year cutoff for service vans: leases signed before this expired.
const SERVICE_LEASE_YEAR: i32 = 2015;
/// Model-year cutoff for work cars.
const WORK_LEASE_YEAR: i32 = 2017;

/// CO2 factor overrides for the Swedish production mix, matched by
/// substring against the fuel-option name.
const SWEDISH_MIX: &[(Category, &[(&str, f64)])] = &[
    (Category::Small, &[("Elfordon skåp. 26.7 kWh", 11656.0)]),
    (
        Category::Work,
        &[
            ("Elfordon. 39 kWh", 13647.0),
            ("Elfordon. 17 kWh", 9785.0),
            ("Elfordon. 100 kWh", 24366.0),
            ("Laddhybrid", 12031.0),
        ],
    ),
];

/// CO2 factor overrides for the continental (European) production mix.
const EUROPEAN_MIX: &[(Category, &[(&str, f64)])] = &[
    (Category::Small, &[("Elfordon skåp. 26.7 kWh", 21740.0)]),
    (
        Category::Work,
        &[
            ("Elfordon. 39 kWh", 17194.0),
            ("Elfordon. 17 kWh", 12846.0),
            ("Elfordon. 100 kWh", 29712.0),
            ("Laddhybrid", 15439.0),
        ],
    ),
];

/// Scenario types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Replace only vehicles whose lease has expired
    LeaseExpired,

    /// Lease filter, then drop the biodiesel/biopetrol blend options
    NoBioBlends,

    /// Lease filter with EV factors recomputed for the Swedish grid
    SwedishElectricityMix,

    /// Lease filter with EV factors recomputed for the European grid
    EuropeanElectricityMix,

    /// Replace only the top 10% highest-emitting vehicles
    TopDecile,

    /// Lease filter with only conventional petrol/diesel options
    ConventionalOnly,

    /// Replace every vehicle regardless of lease state
    ReplaceAll,

    /// Lease filter plus the cost-minimizing refinement pass
    CostBaseline,

    /// Cost refinement with the 17 kWh EV option priced out
    CostNoSmallEv,
}

impl Scenario {
    /// Stable identifier, used as the sheet name.
    pub fn id(self) -> &'static str {
        match self {
            Self::LeaseExpired => "lease_expired",
            Self::NoBioBlends => "no_bio_blends",
            Self::SwedishElectricityMix => "swedish_elmix",
            Self::EuropeanElectricityMix => "european_elmix",
            Self::TopDecile => "top_decile",
            Self::ConventionalOnly => "conventional_only",
            Self::ReplaceAll => "replace_all",
            Self::CostBaseline => "cost_baseline",
            Self::CostNoSmallEv => "cost_no_small_ev",
        }
    }

    /// Cost-aware scenarios run the refiner (which owns `new_fuel_cost`)
    /// instead of the default minimum-CO2 fuel cost join.
    pub fn is_cost_scenario(self) -> bool {
        matches!(self, Self::CostBaseline | Self::CostNoSmallEv)
    }

    /// Fuel-cost eligibility filter for the refiner.
    pub fn allows_cost_option(self, entry: &CostEntry) -> bool {
        match self {
            Self::CostNoSmallEv => entry.key != fuels::ELFORDON_17,
            _ => true,
        }
    }

    /// Apply the scenario to independent copies of the inputs.
    pub fn apply(
        self,
        totals: &EmissionTotals,
        vehicles: &[Vehicle],
    ) -> (EmissionTotals, Vec<Vehicle>) {
        match self {
            Self::LeaseExpired | Self::CostBaseline | Self::CostNoSmallEv => {
                (totals.clone(), lease_expired(vehicles))
            }
            Self::NoBioBlends => {
                let mut totals = totals.clone();
                for (_, rows) in totals.iter_mut() {
                    rows.retain(|row| row.fuel != fuels::BIODIESEL && row.fuel != fuels::BIOBENSIN);
                }
                (totals, lease_expired(vehicles))
            }
            Self::SwedishElectricityMix => {
                (with_electricity_mix(totals, SWEDISH_MIX), lease_expired(vehicles))
            }
            Self::EuropeanElectricityMix => {
                (with_electricity_mix(totals, EUROPEAN_MIX), lease_expired(vehicles))
            }
            Self::TopDecile => {
                let mut sorted = vehicles.to_vec();
                sorted.sort_by(|a, b| b.co2.total_cmp(&a.co2));
                sorted.truncate(sorted.len() / 10);
                (totals.clone(), sorted)
            }
            Self::ConventionalOnly => {
                let mut totals = totals.clone();
                for (_, rows) in totals.iter_mut() {
                    rows.retain(|row| row.fuel == fuels::BENSIN || row.fuel == fuels::DIESEL);
                }
                (totals, lease_expired(vehicles))
            }
            Self::ReplaceAll => (totals.clone(), vehicles.to_vec()),
        }
    }
}

/// Keep vehicles whose lease has run out: service vans older than the
/// 2015 model year, work cars older than 2017.
fn lease_expired(vehicles: &[Vehicle]) -> Vec<Vehicle> {
    vehicles
        .iter()
        .filter(|v| {
            let cutoff = if v.category.is_service() {
                SERVICE_LEASE_YEAR
            } else {
                WORK_LEASE_YEAR
            };
            v.year < cutoff
        })
        .cloned()
        .collect()
}

/// Copy the totals with CO2 factors overwritten per the given grid mix.
fn with_electricity_mix(
    totals: &EmissionTotals,
    mix: &[(Category, &[(&str, f64)])],
) -> EmissionTotals {
    let mut totals = totals.clone();
    for (category, overrides) in mix {
        for (cat, rows) in totals.iter_mut() {
            if cat != *category {
                continue;
            }
            for (pattern, co2) in *overrides {
                for row in rows.iter_mut() {
                    if row.fuel.contains(pattern) {
                        row.co2 = *co2;
                    }
                }
            }
        }
    }
    totals
}

/// Scenario preset with display metadata
#[derive(Debug, Clone)]
pub struct ScenarioPreset {
    /// Unique identifier (sheet name)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Description
    pub description: &'static str,
    /// The scenario
    pub scenario: Scenario,
}

/// All report scenarios, in sheet order.
pub const SCENARIO_PRESETS: &[ScenarioPreset] = &[
    ScenarioPreset {
        id: "lease_expired",
        name: "Lease Expired",
        description: "Replace only vehicles whose lease has expired (vans < 2015, cars < 2017)",
        scenario: Scenario::LeaseExpired,
    },
    ScenarioPreset {
        id: "no_bio_blends",
        name: "No Bio Blends",
        description: "Lease filter, biodiesel B25.5 and biopetrol E4.8 removed from the options",
        scenario: Scenario::NoBioBlends,
    },
    ScenarioPreset {
        id: "swedish_elmix",
        name: "Swedish Electricity Mix",
        description: "Lease filter with EV factors for the Swedish production mix",
        scenario: Scenario::SwedishElectricityMix,
    },
    ScenarioPreset {
        id: "european_elmix",
        name: "European Electricity Mix",
        description: "Lease filter with EV factors for the European production mix",
        scenario: Scenario::EuropeanElectricityMix,
    },
    ScenarioPreset {
        id: "top_decile",
        name: "Top Decile",
        description: "Replace only the 10% highest-emitting vehicles, regardless of lease",
        scenario: Scenario::TopDecile,
    },
    ScenarioPreset {
        id: "conventional_only",
        name: "Conventional Only",
        description: "Lease filter with only conventional petrol and diesel options",
        scenario: Scenario::ConventionalOnly,
    },
    ScenarioPreset {
        id: "replace_all",
        name: "Replace All",
        description: "Replace every vehicle with a lower-emission option (theoretical)",
        scenario: Scenario::ReplaceAll,
    },
    ScenarioPreset {
        id: "cost_baseline",
        name: "Cost Baseline",
        description: "Lease filter with minimum-cost fuel refinement",
        scenario: Scenario::CostBaseline,
    },
    ScenarioPreset {
        id: "cost_no_small_ev",
        name: "Cost, No Small EV",
        description: "Cost refinement with the 17 kWh EV option excluded",
        scenario: Scenario::CostNoSmallEv,
    },
];
