// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FlotION.

//! Report sinks and the console run summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Attribute, Cell, Table, presets::UTF8_FULL};

use flotion_core::ReportSheet;

/// Trait for writing finished report sheets somewhere
pub trait ReportSink {
    fn write_sheet(&mut self, sheet: &ReportSheet) -> Result<()>;
}

/// Writes one CSV file per scenario sheet into the output directory.
#[derive(Debug)]
pub struct CsvSheetWriter {
    output_dir: PathBuf,
}

impl CsvSheetWriter {
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("could not create {}", output_dir.display()))?;
        Ok(Self { output_dir })
    }
}

impl ReportSink for CsvSheetWriter {
    fn write_sheet(&mut self, sheet: &ReportSheet) -> Result<()> {
        let path = self.output_dir.join(format!("{}.csv", sheet.scenario.id()));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("could not create {}", path.display()))?;
        for row in &sheet.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        tracing::info!(
            sheet = sheet.scenario.id(),
            rows = sheet.rows.len(),
            "sheet written to {}",
            path.display()
        );
        Ok(())
    }
}

/// Formatter for the console run summary
pub struct TableFormatter;

impl TableFormatter {
    /// Format a run summary as a pretty table
    pub fn format_summary(sheets: &[ReportSheet]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("Scenario").add_attribute(Attribute::Bold),
            Cell::new("Sheet").add_attribute(Attribute::Bold),
            Cell::new("Candidates").add_attribute(Attribute::Bold),
            Cell::new("Big -> Medium").add_attribute(Attribute::Bold),
        ]);

        for sheet in sheets {
            let preset = flotion_core::SCENARIO_PRESETS
                .iter()
                .find(|p| p.scenario == sheet.scenario);
            table.add_row(vec![
                Cell::new(preset.map_or("?", |p| p.name)),
                Cell::new(format!("{}.csv", sheet.scenario.id())),
                Cell::new(sheet.candidates),
                Cell::new(sheet.reassigned),
            ]);
        }

        table.to_string()
    }
}
