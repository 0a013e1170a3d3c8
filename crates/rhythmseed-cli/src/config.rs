use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rhythmseed_generate::{DatasetCounts, GenerateOptions};

use crate::CliError;

/// Optional overrides read from a TOML file.
///
/// ```toml
/// seed = 7
/// anchor_date = "2024-06-30"
///
/// [counts]
/// players = 50
/// plays = 300
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub seed: Option<u64>,
    pub anchor_date: Option<NaiveDate>,
    #[serde(default)]
    pub counts: CountsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountsConfig {
    pub countries: Option<u32>,
    pub players: Option<u32>,
    pub beatmap_sets: Option<u32>,
    pub beatmaps: Option<u32>,
    pub mods: Option<u32>,
    pub plays: Option<u32>,
    pub medals: Option<u32>,
}

impl CountsConfig {
    fn apply(&self, counts: &mut DatasetCounts) {
        let fields = [
            (self.countries, &mut counts.countries),
            (self.players, &mut counts.players),
            (self.beatmap_sets, &mut counts.beatmap_sets),
            (self.beatmaps, &mut counts.beatmaps),
            (self.mods, &mut counts.mods),
            (self.plays, &mut counts.plays),
            (self.medals, &mut counts.medals),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|err| CliError::Config {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;
        toml::from_str(&content).map_err(|err| CliError::Config {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })
    }

    /// Compiled-in defaults with this file's values laid over them.
    pub fn to_options(&self) -> GenerateOptions {
        let mut options = GenerateOptions::default();
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        if let Some(anchor_date) = self.anchor_date {
            options.anchor_date = anchor_date;
        }
        self.counts.apply(&mut options.counts);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config: FileConfig = toml::from_str("").expect("parse");
        let options = config.to_options();
        assert_eq!(options.seed, 42);
        assert_eq!(options.counts, DatasetCounts::default());
    }

    #[test]
    fn partial_counts_override_only_their_keys() {
        let config: FileConfig = toml::from_str(
            r#"
            seed = 7
            anchor_date = "2024-06-30"

            [counts]
            players = 50
            plays = 300
            "#,
        )
        .expect("parse");
        let options = config.to_options();

        assert_eq!(options.seed, 7);
        assert_eq!(
            options.anchor_date,
            NaiveDate::from_ymd_opt(2024, 6, 30).expect("date")
        );
        assert_eq!(options.counts.players, 50);
        assert_eq!(options.counts.plays, 300);
        assert_eq!(options.counts.countries, 30);
        assert_eq!(options.counts.medals, 8);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("sede = 1").is_err());
        assert!(toml::from_str::<FileConfig>("[counts]\nplayer = 1").is_err());
    }
}
