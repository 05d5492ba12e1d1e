// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Vehicle categories and the brand catalog used to classify the fleet.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, Result};

/// Fleet vehicle category.
///
/// Service vans come in three sizes; passenger cars assigned to field
/// personnel are a category of their own (`Work`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Small,
    Medium,
    Big,
    Work,
}

impl Category {
    /// All categories, in reporting order.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Big, Self::Work];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Big => "big",
            Self::Work => "work",
        }
    }

    /// Parse a category from a file-name suffix or column value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "big" => Some(Self::Big),
            "work" => Some(Self::Work),
            _ => None,
        }
    }

    /// Service vans (everything except the `Work` passenger cars).
    pub fn is_service(self) -> bool {
        !matches!(self, Self::Work)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brand-to-category catalog.
///
/// Classification checks the work-car list first, then the service van
/// size lists. A brand outside every list is a data integrity problem and
/// classification fails rather than defaulting.
#[derive(Debug, Clone)]
pub struct FleetCatalog {
    work: Vec<&'static str>,
    service: Vec<(Category, Vec<&'static str>)>,
}

impl FleetCatalog {
    /// The catalog for the current fleet contract.
    pub fn stock() -> Self {
        Self {
            work: vec![
                "AUDI A6",
                "AUDI Q5",
                "BMW 220D",
                "BMW 318D",
                "BMW 320D",
                "SKODA SUPERB",
                "VOLVO S60",
                "VOLVO S90",
                "VOLVO V60",
                "VOLVO V90",
                "VOLVO XC40",
                "VOLVO XC60",
                "VOLVO XC70",
                "VW PASSAT",
                "VW TIGUAN",
                "VW TOUAREG",
            ],
            service: vec![
                (Category::Small, vec!["VW CADDY", "VW TRANSPORT"]),
                (Category::Medium, vec!["MB VITO", "VW TRANSPORTER"]),
                (Category::Big, vec!["MB SPRINTER", "VW CRAFTER"]),
            ],
        }
    }

    /// Classify a normalized brand string.
    pub fn classify(&self, brand: &str) -> Result<Category> {
        if self.work.iter().any(|b| *b == brand) {
            return Ok(Category::Work);
        }
        for (category, brands) in &self.service {
            if brands.iter().any(|b| *b == brand) {
                return Ok(*category);
            }
        }
        Err(FleetError::UnknownBrand(brand.to_owned()))
    }
}

impl Default for FleetCatalog {
    fn default() -> Self {
        Self::stock()
    }
}
