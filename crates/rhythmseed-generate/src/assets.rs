use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::GenerationError;

/// File name of the reference country list inside an assets directory.
pub const COUNTRIES_FILE: &str = "countries.csv";

/// Copy of `assets/countries.csv` compiled into the crate.
pub const BUNDLED_COUNTRIES: &str = include_str!("../assets/countries.csv");

/// One `code,name` line of a reference country list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryRecord {
    pub code: String,
    pub name: String,
}

/// Where the reference country list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryAsset {
    Bundled,
    File(PathBuf),
}

impl CountryAsset {
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) => CountryAsset::File(path.to_path_buf()),
            None => CountryAsset::Bundled,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CountryAsset::Bundled => format!("bundled {COUNTRIES_FILE}"),
            CountryAsset::File(path) => path.display().to_string(),
        }
    }

    /// Read every record, or `None` when the file does not exist.
    pub fn load(&self) -> Result<Option<Vec<CountryRecord>>, GenerationError> {
        match self {
            CountryAsset::Bundled => read_records(BUNDLED_COUNTRIES.as_bytes()).map(Some),
            CountryAsset::File(path) => {
                let contents = match fs::read(path) {
                    Ok(contents) => contents,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                    Err(err) => return Err(err.into()),
                };
                read_records(contents.as_slice()).map(Some)
            }
        }
    }
}

fn read_records<R: Read>(reader: R) -> Result<Vec<CountryRecord>, GenerationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_list_parses() {
        let records = CountryAsset::Bundled
            .load()
            .expect("load")
            .expect("bundled list present");
        assert!(records.len() >= 30);
        assert!(records.iter().any(|r| r.code == "KR" && r.name == "Korea, Republic of"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let asset = CountryAsset::File(PathBuf::from("/nonexistent/rhythmseed/countries.csv"));
        assert_eq!(asset.load().expect("load"), None);
    }
}
