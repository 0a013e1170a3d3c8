//! Core contracts for rhythmseed.
//!
//! This crate defines the row types of the rhythm-game schema, the SQL value
//! model used to render them, and the integrity checks a dataset must pass
//! before it is written.

pub mod error;
pub mod model;
pub mod table;
pub mod validation;
pub mod value;

pub use error::{Error, Result};
pub use model::{
    Beatmap, BeatmapSet, BeatmapStatus, Country, Dataset, GameMode, Medal, Mod, Play, PlayMod,
    Player, PlayerMedal, PlayerStat, Rank, TABLE_ORDER,
};
pub use table::InsertRow;
pub use validation::{is_country_code, validate_dataset};
pub use value::{SqlValue, parse_sql_literal, round_to};
