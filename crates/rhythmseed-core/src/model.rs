use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::table::InsertRow;
use crate::value::SqlValue;

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    /// ISO-style two-letter uppercase code.
    pub code: String,
    pub name: String,
    pub flag_url: String,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        let flag_url = format!("https://flags.example/{}.png", code.to_lowercase());
        Self {
            code,
            name: name.into(),
            flag_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameMode {
    pub id: u32,
    pub name: String,
    pub description: String,
}

impl GameMode {
    /// Mode names in id order; ids start at 1.
    pub const NAMES: [&'static str; 4] = ["taiko", "standard", "mania", "ctb"];
    pub const COUNT: usize = Self::NAMES.len();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mod {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Medal {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub country_code: String,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeatmapStatus {
    Ranked,
    Loved,
    Pending,
    Graveyard,
}

impl BeatmapStatus {
    pub const ALL: [BeatmapStatus; 4] = [
        BeatmapStatus::Ranked,
        BeatmapStatus::Loved,
        BeatmapStatus::Pending,
        BeatmapStatus::Graveyard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BeatmapStatus::Ranked => "Ranked",
            BeatmapStatus::Loved => "Loved",
            BeatmapStatus::Pending => "Pending",
            BeatmapStatus::Graveyard => "Graveyard",
        }
    }

    /// Whether sets with this status carry an approval date.
    pub fn is_approved(self) -> bool {
        matches!(self, BeatmapStatus::Ranked | BeatmapStatus::Loved)
    }
}

impl fmt::Display for BeatmapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeatmapSet {
    pub id: u32,
    pub title: String,
    pub artist: String,
    /// Username of the mapping player, stored as text.
    pub creator: String,
    pub source: String,
    pub tags: String,
    pub status: BeatmapStatus,
    pub approved_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Beatmap {
    pub id: u32,
    pub set_id: u32,
    pub mode_id: u32,
    pub difficulty_name: String,
    pub difficulty_rating: f64,
    pub total_length: u32,
    pub bpm: u32,
    pub max_combo: u32,
    pub approach_rate: f64,
    pub overall_difficulty: f64,
    pub circle_size: f64,
    pub health_points: f64,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    SS,
    SSH,
    S,
    SH,
    A,
    B,
    C,
    D,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::SS,
        Rank::SSH,
        Rank::S,
        Rank::SH,
        Rank::A,
        Rank::B,
        Rank::C,
        Rank::D,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::SS => "SS",
            Rank::SSH => "SSH",
            Rank::S => "S",
            Rank::SH => "SH",
            Rank::A => "A",
            Rank::B => "B",
            Rank::C => "C",
            Rank::D => "D",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    pub id: u32,
    pub player_id: u32,
    pub beatmap_id: u32,
    pub score: u32,
    pub max_combo: u32,
    pub accuracy: f64,
    pub rank: Rank,
    pub date_played: NaiveDateTime,
    pub perfect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayMod {
    pub play_id: u32,
    pub mod_id: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMedal {
    pub player_id: u32,
    pub medal_id: u32,
    pub achieved_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStat {
    pub player_id: u32,
    pub mode_id: u32,
    pub global_rank: u32,
    pub local_rank: u32,
    pub pp_total: f64,
    pub playcount: u32,
    pub overall_accuracy: f64,
}

impl InsertRow for Country {
    const TABLE: &'static str = "Countries";
    const COLUMNS: &'static [&'static str] = &["code", "name", "flag_url"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.code.as_str().into(),
            self.name.as_str().into(),
            self.flag_url.as_str().into(),
        ]
    }
}

impl InsertRow for GameMode {
    const TABLE: &'static str = "GameModes";
    const COLUMNS: &'static [&'static str] = &["id_mode", "name", "description"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.name.as_str().into(),
            self.description.as_str().into(),
        ]
    }
}

impl InsertRow for Mod {
    const TABLE: &'static str = "Mods";
    const COLUMNS: &'static [&'static str] = &["id_mod", "code", "name", "description"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.code.as_str().into(),
            self.name.as_str().into(),
            self.description.as_str().into(),
        ]
    }
}

impl InsertRow for Medal {
    const TABLE: &'static str = "Medals";
    const COLUMNS: &'static [&'static str] = &["id_medal", "name", "description", "icon_url"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.name.as_str().into(),
            self.description.as_str().into(),
            self.icon_url.as_str().into(),
        ]
    }
}

impl InsertRow for Player {
    const TABLE: &'static str = "Players";
    const COLUMNS: &'static [&'static str] = &[
        "id_player",
        "username",
        "password_hash",
        "email",
        "country_code",
        "join_date",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.username.as_str().into(),
            self.password_hash.as_str().into(),
            self.email.as_str().into(),
            self.country_code.as_str().into(),
            self.join_date.into(),
        ]
    }
}

impl InsertRow for BeatmapSet {
    const TABLE: &'static str = "BeatmapSets";
    const COLUMNS: &'static [&'static str] = &[
        "id_set",
        "title",
        "artist",
        "creator",
        "source",
        "tags",
        "status",
        "approved_date",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.title.as_str().into(),
            self.artist.as_str().into(),
            self.creator.as_str().into(),
            self.source.as_str().into(),
            self.tags.as_str().into(),
            self.status.as_str().into(),
            self.approved_date.into(),
        ]
    }
}

impl InsertRow for Beatmap {
    const TABLE: &'static str = "Beatmaps";
    const COLUMNS: &'static [&'static str] = &[
        "id_beatmap",
        "id_set",
        "id_mode",
        "difficulty_name",
        "difficulty_rating",
        "total_length",
        "bpm",
        "max_combo",
        "approach_rate",
        "overall_difficulty",
        "circle_size",
        "health_points",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.set_id.into(),
            self.mode_id.into(),
            self.difficulty_name.as_str().into(),
            self.difficulty_rating.into(),
            self.total_length.into(),
            self.bpm.into(),
            self.max_combo.into(),
            self.approach_rate.into(),
            self.overall_difficulty.into(),
            self.circle_size.into(),
            self.health_points.into(),
        ]
    }
}

impl InsertRow for Play {
    const TABLE: &'static str = "Plays";
    const COLUMNS: &'static [&'static str] = &[
        "id_play",
        "id_player",
        "id_beatmap",
        "score",
        "max_combo",
        "accuracy",
        "rank",
        "date_played",
        "perfect",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.player_id.into(),
            self.beatmap_id.into(),
            self.score.into(),
            self.max_combo.into(),
            self.accuracy.into(),
            self.rank.as_str().into(),
            self.date_played.into(),
            self.perfect.into(),
        ]
    }
}

impl InsertRow for PlayMod {
    const TABLE: &'static str = "PlayMods";
    const COLUMNS: &'static [&'static str] = &["id_play", "id_mod"];

    fn values(&self) -> Vec<SqlValue> {
        vec![self.play_id.into(), self.mod_id.into()]
    }
}

impl InsertRow for PlayerMedal {
    const TABLE: &'static str = "PlayerMedals";
    const COLUMNS: &'static [&'static str] = &["id_player", "id_medal", "achieved_date"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.player_id.into(),
            self.medal_id.into(),
            self.achieved_date.into(),
        ]
    }
}

impl InsertRow for PlayerStat {
    const TABLE: &'static str = "PlayerStats";
    const COLUMNS: &'static [&'static str] = &[
        "id_player",
        "id_mode",
        "global_rank",
        "local_rank",
        "pp_total",
        "playcount",
        "overall_accuracy",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.player_id.into(),
            self.mode_id.into(),
            self.global_rank.into(),
            self.local_rank.into(),
            self.pp_total.into(),
            self.playcount.into(),
            self.overall_accuracy.into(),
        ]
    }
}

/// Table names in dependency (and emission) order.
pub const TABLE_ORDER: [&str; 11] = [
    Country::TABLE,
    GameMode::TABLE,
    Mod::TABLE,
    Medal::TABLE,
    Player::TABLE,
    BeatmapSet::TABLE,
    Beatmap::TABLE,
    Play::TABLE,
    PlayMod::TABLE,
    PlayerMedal::TABLE,
    PlayerStat::TABLE,
];

/// Every generated collection of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub countries: Vec<Country>,
    pub game_modes: Vec<GameMode>,
    pub mods: Vec<Mod>,
    pub medals: Vec<Medal>,
    pub players: Vec<Player>,
    pub beatmap_sets: Vec<BeatmapSet>,
    pub beatmaps: Vec<Beatmap>,
    pub plays: Vec<Play>,
    pub play_mods: Vec<PlayMod>,
    pub player_medals: Vec<PlayerMedal>,
    pub player_stats: Vec<PlayerStat>,
}

impl Dataset {
    /// Row counts keyed by table name, in emission order.
    pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (Country::TABLE, self.countries.len()),
            (GameMode::TABLE, self.game_modes.len()),
            (Mod::TABLE, self.mods.len()),
            (Medal::TABLE, self.medals.len()),
            (Player::TABLE, self.players.len()),
            (BeatmapSet::TABLE, self.beatmap_sets.len()),
            (Beatmap::TABLE, self.beatmaps.len()),
            (Play::TABLE, self.plays.len()),
            (PlayMod::TABLE, self.play_mods.len()),
            (PlayerMedal::TABLE, self.player_medals.len()),
            (PlayerStat::TABLE, self.player_stats.len()),
        ]
    }
}
