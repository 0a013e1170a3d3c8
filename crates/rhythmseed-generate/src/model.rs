use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Highest number of distinct two-letter country codes.
pub const MAX_COUNTRY_CODES: u32 = 26 * 26;

/// Rows requested per generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCounts {
    pub countries: u32,
    pub players: u32,
    pub beatmap_sets: u32,
    pub beatmaps: u32,
    pub mods: u32,
    pub plays: u32,
    pub medals: u32,
}

impl Default for DatasetCounts {
    fn default() -> Self {
        Self {
            countries: 30,
            players: 200,
            beatmap_sets: 150,
            beatmaps: 450,
            mods: 12,
            plays: 1200,
            medals: 8,
        }
    }
}

impl DatasetCounts {
    /// Reject counts whose dependent tables would have nothing to reference.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.countries > MAX_COUNTRY_CODES {
            return Err(GenerationError::InvalidConfig(format!(
                "at most {MAX_COUNTRY_CODES} countries fit two-letter codes, got {}",
                self.countries
            )));
        }
        require(self.players, "players", self.countries, "countries")?;
        require(self.beatmap_sets, "beatmap sets", self.players, "players")?;
        require(self.beatmaps, "beatmaps", self.beatmap_sets, "beatmap sets")?;
        require(self.plays, "plays", self.players, "players")?;
        require(self.plays, "plays", self.beatmaps, "beatmaps")?;
        Ok(())
    }
}

fn require(
    dependents: u32,
    dependent_name: &str,
    referents: u32,
    referent_name: &str,
) -> Result<(), GenerationError> {
    if dependents > 0 && referents == 0 {
        return Err(GenerationError::InvalidConfig(format!(
            "{dependents} {dependent_name} requested but no {referent_name} to reference"
        )));
    }
    Ok(())
}

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for the single RNG driving every table.
    pub seed: u64,
    pub counts: DatasetCounts,
    /// Upper end of every generated date window.
    pub anchor_date: NaiveDate,
    /// Reference `code,name` CSV; the bundled asset when unset.
    pub countries_path: Option<PathBuf>,
    /// Try the reference country list before the generative fallback.
    pub use_reference_countries: bool,
}

pub const DEFAULT_SEED: u64 = 42;

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            counts: DatasetCounts::default(),
            anchor_date: default_anchor_date(),
            countries_path: None,
            use_reference_countries: true,
        }
    }
}

pub fn default_anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Summary of a generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub rows_requested: Option<u64>,
    pub rows_generated: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub country_source: String,
    pub tables: Vec<TableReport>,
    /// Collision repairs applied while generating, keyed by kind.
    pub repairs: BTreeMap<String, u64>,
    pub lines_written: Option<u64>,
    pub bytes_written: Option<u64>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            country_source: String::new(),
            tables: Vec::new(),
            repairs: BTreeMap::new(),
            lines_written: None,
            bytes_written: None,
            duration_ms: 0,
        }
    }

    pub fn record_repair(&mut self, kind: &str) {
        *self.repairs.entry(kind.to_string()).or_insert(0) += 1;
    }

    pub fn repairs_for(&self, kind: &str) -> u64 {
        self.repairs.get(kind).copied().unwrap_or(0)
    }

    /// Write the report as pretty JSON, replacing any existing file.
    pub fn write_json(&self, path: &Path) -> Result<(), GenerationError> {
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}
