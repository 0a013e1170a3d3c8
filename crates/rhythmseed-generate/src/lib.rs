//! Deterministic dataset generation for the rhythm-game schema.
//!
//! One seeded RNG drives every table step; the result is validated before it
//! is handed back, and [`output::sql`] turns it into insert statements.

pub mod assets;
pub mod countries;
pub mod engine;
pub mod errors;
pub mod faker;
pub mod generators;
pub mod model;
pub mod output;

pub use assets::{CountryAsset, CountryRecord};
pub use countries::{
    CountrySource, GenerativeCountrySource, ReferenceCountrySource, select_country_source,
};
pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use faker::{FakeData, FakeRs};
pub use model::{DatasetCounts, GenerateOptions, GenerationReport, TableReport};
pub use output::{render_dataset, write_sql};
