//! Country sources: a reference list with a generative fallback.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use rhythmseed_core::{Country, is_country_code};

use crate::assets::{CountryAsset, CountryRecord};
use crate::errors::GenerationError;
use crate::generators::GenerationContext;
use crate::model::MAX_COUNTRY_CODES;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Supplier of the Countries table.
pub trait CountrySource {
    /// Label recorded in the generation report.
    fn name(&self) -> String;

    /// Whether this source can deliver `wanted` distinct countries.
    fn available(&self, wanted: usize) -> bool;

    fn countries(
        &mut self,
        wanted: usize,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Vec<Country>, GenerationError>;
}

/// Countries taken in file order from a `code,name` list.
#[derive(Debug, Clone)]
pub struct ReferenceCountrySource {
    asset: CountryAsset,
    records: Vec<CountryRecord>,
}

impl ReferenceCountrySource {
    /// Load the list; a missing or unreadable file yields an empty source.
    pub fn load(asset: CountryAsset) -> Self {
        let records = match asset.load() {
            Ok(Some(records)) => records,
            Ok(None) => {
                debug!(asset = %asset.describe(), "reference country list not found");
                Vec::new()
            }
            Err(err) => {
                warn!(asset = %asset.describe(), error = %err, "reference country list unreadable");
                Vec::new()
            }
        };
        Self { asset, records }
    }

    /// Up to `wanted` entries, skipping malformed codes and repeated codes or names.
    fn unique_records(&self, wanted: usize) -> Vec<Country> {
        let mut codes: HashSet<String> = HashSet::new();
        let mut names: HashSet<String> = HashSet::new();
        let mut countries = Vec::with_capacity(wanted);
        for record in &self.records {
            if countries.len() >= wanted {
                break;
            }
            let code = record.code.to_ascii_uppercase();
            if !is_country_code(&code) || record.name.is_empty() {
                continue;
            }
            if codes.contains(&code) || names.contains(&record.name) {
                continue;
            }
            codes.insert(code.clone());
            names.insert(record.name.clone());
            countries.push(Country::new(code, record.name.clone()));
        }
        countries
    }
}

impl CountrySource for ReferenceCountrySource {
    fn name(&self) -> String {
        format!("reference ({})", self.asset.describe())
    }

    fn available(&self, wanted: usize) -> bool {
        self.unique_records(wanted).len() == wanted
    }

    fn countries(
        &mut self,
        wanted: usize,
        _ctx: &mut GenerationContext<'_>,
    ) -> Result<Vec<Country>, GenerationError> {
        let countries = self.unique_records(wanted);
        if countries.len() < wanted {
            return Err(GenerationError::InvalidConfig(format!(
                "{} holds {} distinct countries, {wanted} requested",
                self.asset.describe(),
                countries.len()
            )));
        }
        Ok(countries)
    }
}

/// Fake country names with codes derived from their letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerativeCountrySource;

impl CountrySource for GenerativeCountrySource {
    fn name(&self) -> String {
        "generative".to_string()
    }

    fn available(&self, wanted: usize) -> bool {
        wanted <= MAX_COUNTRY_CODES as usize
    }

    fn countries(
        &mut self,
        wanted: usize,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Vec<Country>, GenerationError> {
        if !self.available(wanted) {
            return Err(GenerationError::InvalidConfig(format!(
                "only {MAX_COUNTRY_CODES} two-letter codes exist, {wanted} countries requested"
            )));
        }
        let mut taken = HashSet::new();
        let mut countries = Vec::with_capacity(wanted);
        while countries.len() < wanted {
            let name = ctx.faker.unique_country_name(&mut ctx.rng)?;
            let (code, stepped) = derive_code(&name, &taken, &mut ctx.rng);
            if stepped {
                ctx.record_repair("country_code", &code);
            }
            taken.insert(code.clone());
            countries.push(Country::new(code, name));
        }
        Ok(countries)
    }
}

/// Pick the source for `wanted` countries with one probe of the reference list.
///
/// Output of a short reference list is never mixed with generated countries.
pub fn select_country_source(
    asset: Option<CountryAsset>,
    wanted: usize,
) -> Box<dyn CountrySource> {
    if let Some(asset) = asset {
        let reference = ReferenceCountrySource::load(asset);
        if reference.available(wanted) {
            return Box::new(reference);
        }
        warn!(
            source = %reference.name(),
            wanted,
            "reference country list too short, generating countries"
        );
    }
    Box::new(GenerativeCountrySource)
}

/// Derive a free two-letter code from `name`.
///
/// The first two letters are used when free. On a collision the second
/// letter steps through the remaining 25 letters, which visits every code
/// sharing the first letter. Only when all 26 of them are taken is a random
/// free code drawn, with any first letter. Returns whether the code differs
/// from the natural one.
pub fn derive_code<R: Rng + ?Sized>(
    name: &str,
    taken: &HashSet<String>,
    rng: &mut R,
) -> (String, bool) {
    let letters: Vec<u8> = name
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase())
        .take(2)
        .collect();
    let base = match letters.as_slice() {
        [first, second] => [*first, *second],
        _ => [random_letter(rng), random_letter(rng)],
    };

    let code = code_string(base);
    if !taken.contains(&code) {
        return (code, false);
    }

    for step in 1..26 {
        let second = b'A' + (base[1] - b'A' + step) % 26;
        let code = code_string([base[0], second]);
        if !taken.contains(&code) {
            return (code, true);
        }
    }

    let free: Vec<String> = ALPHABET
        .iter()
        .flat_map(|&a| ALPHABET.iter().map(move |&b| code_string([a, b])))
        .filter(|code| !taken.contains(code))
        .collect();
    match free.choose(rng) {
        Some(code) => (code.clone(), true),
        None => (code, true),
    }
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    ALPHABET[rng.random_range(0..ALPHABET.len())]
}

fn code_string(letters: [u8; 2]) -> String {
    letters.iter().map(|&b| char::from(b)).collect()
}
