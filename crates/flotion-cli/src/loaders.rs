// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Data loaders for the fleet CSV inputs.
//!
//! All files are positional-column CSVs with a header row; header names
//! are ignored. The vehicle master is the one legacy file: Latin-1
//! encoded and semicolon separated.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;

use flotion_types::{
    Category, CostBook, CostDimension, CostEntry, EmissionTotals, FleetCatalog, FleetError,
    FuelOption, Vehicle,
};

/// Everything the scenario engine needs for one run.
#[derive(Debug)]
pub struct FleetData {
    pub totals: EmissionTotals,
    pub costs: CostBook,
    pub vehicles: Vec<Vehicle>,
}

/// Trait for loading fleet data from some source
pub trait FleetDataSource {
    fn load(&self) -> Result<FleetData>;
}

/// Per-category emission totals files, in load order.
const TOTAL_FILES: [&str; 4] = [
    "total_service_big.csv",
    "total_service_medium.csv",
    "total_service_small.csv",
    "total_work.csv",
];

/// Cost reference files under `kostnader/`, in load order. The refiner
/// walks categories in this order, so it is part of the contract.
const COST_FILES: [&str; 8] = [
    "brand_big.csv",
    "brand_small.csv",
    "fuel_big.csv",
    "fuel_small.csv",
    "brand_medium.csv",
    "brand_work.csv",
    "fuel_medium.csv",
    "fuel_work.csv",
];

/// Loader for the stock CSV input directory layout.
#[derive(Debug)]
pub struct CsvFleetLoader {
    input_dir: PathBuf,
    catalog: FleetCatalog,
}

impl CsvFleetLoader {
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            catalog: FleetCatalog::stock(),
        }
    }

    fn load_totals(&self) -> Result<EmissionTotals> {
        let mut totals = EmissionTotals::new();
        for name in TOTAL_FILES {
            let category = category_from_suffix(name)
                .with_context(|| format!("bad totals file name {name}"))?;
            let path = self.input_dir.join(name);
            let rows = read_totals_file(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            totals.insert(category, rows);
        }
        Ok(totals)
    }

    fn load_costs(&self) -> Result<CostBook> {
        let mut book = CostBook::new();
        for name in COST_FILES {
            let (dimension, category) = parse_cost_file_name(name)?;
            let path = self.input_dir.join("kostnader").join(name);
            let mut rows = read_cost_file(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if dimension == CostDimension::Brand {
                for row in &mut rows {
                    row.key = row.key.to_uppercase();
                }
            }
            book.insert(dimension, category, rows);
        }
        Ok(book)
    }

    fn load_vehicles(&self) -> Result<Vec<Vehicle>> {
        let master = self.input_dir.join("cars.csv");
        let mut vehicles = read_vehicle_master(&master, &self.catalog)
            .with_context(|| format!("failed to read {}", master.display()))?;

        let override_path = self.input_dir.join("fordonspark.csv");
        let overrides = read_co2_overrides(&override_path)
            .with_context(|| format!("failed to read {}", override_path.display()))?;
        if overrides.len() != vehicles.len() {
            return Err(FleetError::Co2OverrideMismatch {
                overrides: overrides.len(),
                vehicles: vehicles.len(),
            }
            .into());
        }
        // Positional override: the file is exported in master row order.
        for (vehicle, co2) in vehicles.iter_mut().zip(overrides) {
            vehicle.co2 = co2;
        }
        Ok(vehicles)
    }
}

impl FleetDataSource for CsvFleetLoader {
    fn load(&self) -> Result<FleetData> {
        let totals = self.load_totals()?;
        let costs = self.load_costs()?;
        let vehicles = self.load_vehicles()?;
        tracing::info!(
            vehicles = vehicles.len(),
            "fleet data loaded from {}",
            self.input_dir.display()
        );
        Ok(FleetData {
            totals,
            costs,
            vehicles,
        })
    }
}

/// `total_service_big.csv` -> `big`; category is the last `_` segment.
fn category_from_suffix(name: &str) -> Result<Category> {
    let stem = name.strip_suffix(".csv").unwrap_or(name);
    let suffix = stem.rsplit('_').next().unwrap_or(stem);
    Category::parse(suffix).with_context(|| format!("unknown category suffix {suffix:?}"))
}

/// `<type>_<category>.csv` -> (dimension, category).
fn parse_cost_file_name(name: &str) -> Result<(CostDimension, Category)> {
    let stem = name.strip_suffix(".csv").unwrap_or(name);
    let Some((type_, cat)) = stem.split_once('_') else {
        bail!("bad cost file name {name}");
    };
    let dimension = CostDimension::from_file_type(type_)
        .with_context(|| format!("unknown cost type {type_:?} in {name}"))?;
    let category =
        Category::parse(cat).with_context(|| format!("unknown category {cat:?} in {name}"))?;
    Ok((dimension, category))
}

fn read_totals_file(path: &Path) -> Result<Vec<FuelOption>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let fuel = field(&record, 0, i, "fuel")?.to_owned();
        let co2: f64 = field(&record, 1, i, "co2")?
            .trim()
            .parse()
            .with_context(|| format!("bad co2 value on data row {i}"))?;
        rows.push(FuelOption { fuel, co2 });
    }
    Ok(rows)
}

fn read_cost_file(path: &Path) -> Result<Vec<CostEntry>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let key = field(&record, 0, i, "key")?.to_owned();
        let cost: f64 = field(&record, 1, i, "cost")?
            .trim()
            .parse()
            .with_context(|| format!("bad cost value on data row {i}"))?;
        rows.push(CostEntry { key, cost });
    }
    Ok(rows)
}

fn read_vehicle_master(path: &Path, catalog: &FleetCatalog) -> Result<Vec<Vehicle>> {
    // The master export is Latin-1; decode before handing it to csv.
    let bytes = std::fs::read(path)?;
    let text = latin1_to_string(&bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .from_reader(text.as_bytes());

    let mut vehicles = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let license_nbr = field(&record, 0, i, "license_nbr")?.to_owned();
        let brand = Vehicle::normalize_brand(field(&record, 1, i, "brand")?);
        let year: i32 = field(&record, 2, i, "year")?
            .trim()
            .parse()
            .with_context(|| format!("bad year for vehicle {license_nbr}"))?;
        let driver = field(&record, 3, i, "driver")?.to_owned();
        let region = field(&record, 4, i, "region")?.to_owned();
        let consumption: f64 = field(&record, 5, i, "consumption")?
            .trim()
            .parse()
            .with_context(|| format!("bad consumption for vehicle {license_nbr}"))?;
        let co2: f64 = field(&record, 6, i, "co2")?
            .trim()
            .parse()
            .with_context(|| format!("bad co2 for vehicle {license_nbr}"))?;
        let fuel = field(&record, 7, i, "fuel")?.to_owned();

        let category = catalog
            .classify(&brand)
            .with_context(|| format!("vehicle {license_nbr}"))?;
        vehicles.push(Vehicle {
            license_nbr,
            brand,
            year,
            driver,
            region,
            consumption,
            co2,
            fuel,
            category,
        });
    }
    Ok(vehicles)
}

fn read_co2_overrides(path: &Path) -> Result<Vec<f64>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut values = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let co2: f64 = field(&record, 1, i, "co2")?
            .trim()
            .parse()
            .with_context(|| format!("bad co2 override on data row {i}"))?;
        values.push(co2);
    }
    Ok(values)
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize, row: usize, name: &str) -> Result<&'r str> {
    record
        .get(idx)
        .with_context(|| format!("missing {name} column on data row {row}"))
}

/// Latin-1 maps bytes to the first 256 code points one-to-one.
fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
