// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Replacement cost reference tables.
//!
//! Costs come per category and per dimension: what a replacement of a
//! given brand costs (`Brand`) and what switching to a given fuel costs
//! (`NewFuel`). The join key differs per dimension: brand tables join on
//! the vehicle's brand, fuel tables join on the scenario-selected
//! `new_fuel` value.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Cost table dimension, named after the vehicle column it joins on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostDimension {
    Brand,
    NewFuel,
}

impl CostDimension {
    pub const ALL: [Self; 2] = [Self::Brand, Self::NewFuel];

    /// Column name on the report side (`<column>_cost` in the sheet).
    pub fn column(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::NewFuel => "new_fuel",
        }
    }

    /// Parse the `<type>_<category>.csv` file-name prefix.
    pub fn from_file_type(s: &str) -> Option<Self> {
        match s {
            "brand" => Some(Self::Brand),
            "fuel" => Some(Self::NewFuel),
            _ => None,
        }
    }
}

/// One cost row: join key (brand or fuel name) and the cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub key: String,
    pub cost: f64,
}

/// All cost tables, keyed by (dimension, category), insertion ordered.
///
/// The cost refiner walks the `NewFuel` tables in load order, so order is
/// part of the contract here too.
#[derive(Debug, Clone, Default)]
pub struct CostBook {
    tables: Vec<((CostDimension, Category), Vec<CostEntry>)>,
}

impl CostBook {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn insert(&mut self, dimension: CostDimension, category: Category, rows: Vec<CostEntry>) {
        let slot = self
            .tables
            .iter_mut()
            .find(|((d, c), _)| *d == dimension && *c == category);
        if let Some(slot) = slot {
            slot.1 = rows;
        } else {
            self.tables.push(((dimension, category), rows));
        }
    }

    pub fn get(&self, dimension: CostDimension, category: Category) -> Option<&[CostEntry]> {
        self.tables
            .iter()
            .find(|((d, c), _)| *d == dimension && *c == category)
            .map(|(_, rows)| rows.as_slice())
    }

    /// Tables of one dimension, in insertion order.
    pub fn dimension(
        &self,
        dimension: CostDimension,
    ) -> impl Iterator<Item = (Category, &[CostEntry])> {
        self.tables
            .iter()
            .filter(move |((d, _), _)| *d == dimension)
            .map(|((_, c), rows)| (*c, rows.as_slice()))
    }

    /// Exact-key cost lookup; `None` when the table or entry is missing.
    pub fn lookup(&self, dimension: CostDimension, category: Category, key: &str) -> Option<f64> {
        self.get(dimension, category)?
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.cost)
    }
}
