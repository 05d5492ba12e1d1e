// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Replacement-cost joins and the cost-minimizing refinement pass.

use flotion_types::{
    Category, CostBook, CostDimension, CostEntry, EmissionTotals, FleetError, Result,
};

use crate::optimizer::REPLACEMENT_REGIONS;
use crate::scenario::Scenario;
use crate::sheet::SheetRow;

/// Join every row against the cost tables for its category.
///
/// `Brand` joins on the vehicle brand, `NewFuel` on the scenario-selected
/// `new_fuel` value. A join miss leaves the existing value untouched, so
/// re-running over already-costed rows is a no-op. Cost-aware scenarios
/// skip the `new_fuel_cost` join: the refiner owns that column.
pub fn assign_costs(rows: &mut [SheetRow], book: &CostBook, skip_new_fuel_cost: bool) {
    for dimension in CostDimension::ALL {
        if dimension == CostDimension::NewFuel && skip_new_fuel_cost {
            continue;
        }
        for row in rows.iter_mut() {
            let key = match dimension {
                CostDimension::Brand => Some(row.brand.as_str()),
                CostDimension::NewFuel => row.new_fuel.as_deref(),
            };
            let Some(key) = key else { continue };
            if let Some(cost) = book.lookup(dimension, row.category, key) {
                match dimension {
                    CostDimension::Brand => row.brand_cost = Some(cost),
                    CostDimension::NewFuel => row.new_fuel_cost = Some(cost),
                }
            }
        }
    }
}

/// First entry with minimum cost; ties go to the earlier table row.
fn cheapest(category: Category, table: &[CostEntry]) -> Result<&CostEntry> {
    let mut best: Option<&CostEntry> = None;
    for entry in table {
        if best.is_none_or(|b| entry.cost < b.cost) {
            best = Some(entry);
        }
    }
    best.ok_or(FleetError::NoCostOptions { category })
}

fn fuel_co2(totals: &EmissionTotals, category: Category, fuel: &str) -> Result<f64> {
    totals
        .co2_for(category, fuel)
        .ok_or_else(|| FleetError::UnknownFuelCo2 {
            category,
            fuel: fuel.to_owned(),
        })
}

/// Cost-minimizing refinement for the cost-aware scenarios.
///
/// Clears `new_fuel_cost`, then per category assigns the minimum-cost fuel
/// triple (cost, fuel, that fuel's CO2 from the unfiltered totals) to rows
/// priced above the minimum. For the big category, when medium's minimum
/// is strictly cheaper, the majority bucket keeps big's own minimum while
/// the top quarter by brand cost (region restricted) gets the
/// cross-category option instead; the CO2 for both is looked up in big's
/// totals. This asymmetry matches the established report semantics.
pub fn refine_cost_scenario(
    scenario: Scenario,
    rows: &mut [SheetRow],
    book: &CostBook,
    totals: &EmissionTotals,
) -> Result<()> {
    for row in rows.iter_mut() {
        row.new_fuel_cost = None;
    }

    // Fuel cost tables through the scenario's eligibility filter.
    let tables: Vec<(Category, Vec<CostEntry>)> = book
        .dimension(CostDimension::NewFuel)
        .map(|(category, entries)| {
            let kept = entries
                .iter()
                .filter(|e| scenario.allows_cost_option(e))
                .cloned()
                .collect();
            (category, kept)
        })
        .collect();

    for (category, table) in &tables {
        let min = cheapest(*category, table)?;

        if *category == Category::Big {
            let medium_table = tables
                .iter()
                .find(|(c, _)| *c == Category::Medium)
                .map(|(_, t)| t.as_slice())
                .ok_or(FleetError::NoCostOptions {
                    category: Category::Medium,
                })?;
            let medium_min = cheapest(Category::Medium, medium_table)?;
            if medium_min.cost >= min.cost {
                // Medium offers nothing cheaper: big rows stay unrefined.
                continue;
            }

            let own_co2 = fuel_co2(totals, Category::Big, &min.key)?;
            let cross_co2 = fuel_co2(totals, Category::Big, &medium_min.key)?;

            for row in rows.iter_mut() {
                if row.category == Category::Big && row.brand_cost.is_some_and(|c| c > min.cost) {
                    row.new_fuel_cost = Some(min.cost);
                    row.new_cost_fuel = Some(min.key.clone());
                    row.new_cost_fuel_co2 = Some(own_co2);
                }
            }

            // Top quarter by descending brand cost, region restricted,
            // thresholded on medium's minimum; overrides the bucket above.
            let mut quartile: Vec<usize> = rows
                .iter()
                .enumerate()
                .filter(|(_, r)| {
                    r.category == Category::Big
                        && REPLACEMENT_REGIONS.contains(&r.region.as_str())
                        && r.brand_cost.is_some_and(|c| c > medium_min.cost)
                })
                .map(|(i, _)| i)
                .collect();
            quartile.sort_by(|&a, &b| {
                let ca = rows[a].brand_cost.unwrap_or(f64::NEG_INFINITY);
                let cb = rows[b].brand_cost.unwrap_or(f64::NEG_INFINITY);
                cb.total_cmp(&ca)
            });
            quartile.truncate(quartile.len() / 4);
            for idx in quartile {
                let row = &mut rows[idx];
                row.new_fuel_cost = Some(medium_min.cost);
                row.new_cost_fuel = Some(medium_min.key.clone());
                row.new_cost_fuel_co2 = Some(cross_co2);
            }
        } else {
            let co2 = fuel_co2(totals, *category, &min.key)?;
            for row in rows.iter_mut() {
                if row.category == *category && row.brand_cost.is_some_and(|c| c > min.cost) {
                    row.new_fuel_cost = Some(min.cost);
                    row.new_cost_fuel = Some(min.key.clone());
                    row.new_cost_fuel_co2 = Some(co2);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flotion_types::{FuelOption, Vehicle};

    fn row(license: &str, category: Category, region: &str, brand: &str) -> SheetRow {
        SheetRow::from_vehicle(&Vehicle {
            license_nbr: license.to_owned(),
            brand: brand.to_owned(),
            year: 2012,
            driver: "A Driver".to_owned(),
            region: region.to_owned(),
            consumption: 7.0,
            co2: 180.0,
            fuel: "Konventionell diesel".to_owned(),
            category,
        })
    }

    fn entry(key: &str, cost: f64) -> CostEntry {
        CostEntry {
            key: key.to_owned(),
            cost,
        }
    }

    fn option(fuel: &str, co2: f64) -> FuelOption {
        FuelOption {
            fuel: fuel.to_owned(),
            co2,
        }
    }

    #[test]
    fn brand_costs_join_per_category() {
        let mut book = CostBook::new();
        book.insert(
            CostDimension::Brand,
            Category::Small,
            vec![entry("VW CADDY", 250_000.0)],
        );
        let mut rows = vec![
            row("V1", Category::Small, "SYD", "VW CADDY"),
            row("V2", Category::Big, "SYD", "VW CADDY"),
        ];
        assign_costs(&mut rows, &book, false);
        assert_eq!(rows[0].brand_cost, Some(250_000.0));
        assert_eq!(rows[1].brand_cost, None, "wrong-category join must miss");
    }

    #[test]
    fn assign_costs_is_idempotent_and_misses_do_not_clear() {
        let mut book = CostBook::new();
        book.insert(
            CostDimension::Brand,
            Category::Small,
            vec![entry("VW CADDY", 250_000.0)],
        );
        book.insert(
            CostDimension::NewFuel,
            Category::Small,
            vec![entry("Elfordon. 17 kWh", 90_000.0)],
        );
        let mut rows = vec![row("V1", Category::Small, "SYD", "VW CADDY")];
        rows[0].new_fuel = Some("Elfordon. 17 kWh".to_owned());

        assign_costs(&mut rows, &book, false);
        let after_first = rows.clone();
        assign_costs(&mut rows, &book, false);
        assert_eq!(rows, after_first);
        assert_eq!(rows[0].new_fuel_cost, Some(90_000.0));
    }

    #[test]
    fn cost_scenarios_skip_the_new_fuel_join() {
        let mut book = CostBook::new();
        book.insert(
            CostDimension::NewFuel,
            Category::Small,
            vec![entry("Elfordon. 17 kWh", 90_000.0)],
        );
        let mut rows = vec![row("V1", Category::Small, "SYD", "VW CADDY")];
        rows[0].new_fuel = Some("Elfordon. 17 kWh".to_owned());
        assign_costs(&mut rows, &book, true);
        assert_eq!(rows[0].new_fuel_cost, None);
    }

    fn refiner_fixture() -> (CostBook, EmissionTotals) {
        let mut book = CostBook::new();
        book.insert(
            CostDimension::NewFuel,
            Category::Big,
            vec![entry("BigFuel", 120.0), entry("BigPremium", 200.0)],
        );
        book.insert(
            CostDimension::NewFuel,
            Category::Medium,
            vec![entry("MediumFuel", 80.0)],
        );

        let mut totals = EmissionTotals::new();
        totals.insert(
            Category::Big,
            vec![option("BigFuel", 40_000.0), option("MediumFuel", 30_000.0)],
        );
        totals.insert(Category::Medium, vec![option("MediumFuel", 28_000.0)]);
        (book, totals)
    }

    #[test]
    fn refiner_splits_big_rows_into_majority_and_quartile_buckets() {
        let (book, totals) = refiner_fixture();

        // 8 big rows in-region priced above medium's minimum; quarter = 2.
        let mut rows: Vec<SheetRow> = (0..8)
            .map(|i| {
                let mut r = row(&format!("B{i}"), Category::Big, "SYD", "MB SPRINTER");
                r.brand_cost = Some(150.0 + f64::from(i));
                r
            })
            .collect();

        refine_cost_scenario(Scenario::CostBaseline, &mut rows, &book, &totals).unwrap();

        let cross: Vec<&str> = rows
            .iter()
            .filter(|r| r.new_cost_fuel.as_deref() == Some("MediumFuel"))
            .map(|r| r.license_nbr.as_str())
            .collect();
        assert_eq!(cross, vec!["B6", "B7"], "top quarter by brand cost");
        for r in &rows {
            if cross.contains(&r.license_nbr.as_str()) {
                assert_eq!(r.new_fuel_cost, Some(80.0));
                assert_eq!(r.new_cost_fuel_co2, Some(30_000.0), "CO2 from big's table");
            } else {
                assert_eq!(r.new_fuel_cost, Some(120.0));
                assert_eq!(r.new_cost_fuel.as_deref(), Some("BigFuel"));
                assert_eq!(r.new_cost_fuel_co2, Some(40_000.0));
            }
        }
    }

    #[test]
    fn refiner_leaves_big_rows_alone_when_medium_is_not_cheaper() {
        let (mut book, totals) = refiner_fixture();
        book.insert(
            CostDimension::NewFuel,
            Category::Medium,
            vec![entry("MediumFuel", 500.0)],
        );
        let mut rows = vec![row("B0", Category::Big, "SYD", "MB SPRINTER")];
        rows[0].brand_cost = Some(150.0);

        refine_cost_scenario(Scenario::CostBaseline, &mut rows, &book, &totals).unwrap();
        assert_eq!(rows[0].new_fuel_cost, None);
        assert_eq!(rows[0].new_cost_fuel, None);
    }

    #[test]
    fn refiner_handles_non_big_categories_by_own_minimum() {
        let mut book = CostBook::new();
        book.insert(
            CostDimension::NewFuel,
            Category::Work,
            vec![entry("CheapFuel", 60.0), entry("DearFuel", 90.0)],
        );
        let mut totals = EmissionTotals::new();
        totals.insert(Category::Work, vec![option("CheapFuel", 15_000.0)]);

        let mut rows = vec![
            row("W1", Category::Work, "NORD", "VOLVO V90"),
            row("W2", Category::Work, "NORD", "VOLVO V90"),
        ];
        rows[0].brand_cost = Some(100.0);
        rows[1].brand_cost = Some(50.0); // at or below the minimum: untouched

        refine_cost_scenario(Scenario::CostBaseline, &mut rows, &book, &totals).unwrap();
        assert_eq!(rows[0].new_fuel_cost, Some(60.0));
        assert_eq!(rows[0].new_cost_fuel.as_deref(), Some("CheapFuel"));
        assert_eq!(rows[0].new_cost_fuel_co2, Some(15_000.0));
        assert_eq!(rows[1].new_fuel_cost, None);
    }

    #[test]
    fn refiner_clears_previous_new_fuel_costs() {
        let mut book = CostBook::new();
        book.insert(
            CostDimension::NewFuel,
            Category::Work,
            vec![entry("CheapFuel", 60.0)],
        );
        let mut totals = EmissionTotals::new();
        totals.insert(Category::Work, vec![option("CheapFuel", 15_000.0)]);

        let mut rows = vec![row("W1", Category::Work, "NORD", "VOLVO V90")];
        rows[0].new_fuel_cost = Some(999.0);
        // brand_cost is None: excluded from refinement, cost stays cleared.
        refine_cost_scenario(Scenario::CostBaseline, &mut rows, &book, &totals).unwrap();
        assert_eq!(rows[0].new_fuel_cost, None);
    }

    #[test]
    fn excluded_ev_option_never_wins_the_minimum() {
        use flotion_types::fuels;
        let mut book = CostBook::new();
        book.insert(
            CostDimension::NewFuel,
            Category::Work,
            vec![entry(fuels::ELFORDON_17, 10.0), entry("CheapFuel", 60.0)],
        );
        let mut totals = EmissionTotals::new();
        totals.insert(Category::Work, vec![option("CheapFuel", 15_000.0)]);

        let mut rows = vec![row("W1", Category::Work, "NORD", "VOLVO V90")];
        rows[0].brand_cost = Some(100.0);
        refine_cost_scenario(Scenario::CostNoSmallEv, &mut rows, &book, &totals).unwrap();
        assert_eq!(rows[0].new_cost_fuel.as_deref(), Some("CheapFuel"));
        assert_eq!(rows[0].new_fuel_cost, Some(60.0));
    }

    #[test]
    fn unknown_fuel_in_totals_is_fatal() {
        let mut book = CostBook::new();
        book.insert(
            CostDimension::NewFuel,
            Category::Work,
            vec![entry("CheapFuel", 60.0)],
        );
        let totals = EmissionTotals::new();
        let mut rows = vec![row("W1", Category::Work, "NORD", "VOLVO V90")];
        let err = refine_cost_scenario(Scenario::CostBaseline, &mut rows, &book, &totals)
            .unwrap_err();
        assert!(matches!(err, FleetError::UnknownFuelCo2 { .. }));
    }
}
