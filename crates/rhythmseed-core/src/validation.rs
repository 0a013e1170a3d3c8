use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::model::{
    Country, Dataset, GameMode, Medal, Mod, PlayMod, Player, PlayerMedal, PlayerStat,
};
use crate::table::InsertRow;

/// Validate the uniqueness and reference invariants of a dataset.
///
/// This checks, in order:
/// - country codes, names and code shape
/// - player usernames, emails and country references
/// - mod codes and names
/// - medal names
/// - composite keys of the join tables
/// - one stat row per player and mode
pub fn validate_dataset(dataset: &Dataset) -> Result<()> {
    ensure_unique(Country::TABLE, "code", dataset.countries.iter().map(|c| &c.code))?;
    ensure_unique(Country::TABLE, "name", dataset.countries.iter().map(|c| &c.name))?;
    for country in &dataset.countries {
        if !is_country_code(&country.code) {
            return Err(Error::integrity(
                Country::TABLE,
                "code",
                format!("'{}' is not two uppercase letters", country.code),
            ));
        }
    }

    ensure_unique(Player::TABLE, "username", dataset.players.iter().map(|p| &p.username))?;
    ensure_unique(Player::TABLE, "email", dataset.players.iter().map(|p| &p.email))?;
    let codes: HashSet<&str> = dataset.countries.iter().map(|c| c.code.as_str()).collect();
    for player in &dataset.players {
        if !codes.contains(player.country_code.as_str()) {
            return Err(Error::integrity(
                Player::TABLE,
                "country_code",
                format!(
                    "player {} references unknown country '{}'",
                    player.id, player.country_code
                ),
            ));
        }
    }

    ensure_unique(Mod::TABLE, "code", dataset.mods.iter().map(|m| &m.code))?;
    ensure_unique(Mod::TABLE, "name", dataset.mods.iter().map(|m| &m.name))?;
    ensure_unique(Medal::TABLE, "name", dataset.medals.iter().map(|m| &m.name))?;

    ensure_unique(
        PlayerMedal::TABLE,
        "id_player, id_medal",
        dataset
            .player_medals
            .iter()
            .map(|pm| (pm.player_id, pm.medal_id)),
    )?;
    ensure_unique(
        PlayMod::TABLE,
        "id_play, id_mod",
        dataset.play_mods.iter().map(|pm| (pm.play_id, pm.mod_id)),
    )?;

    validate_player_stats(dataset)
}

/// Two ASCII uppercase letters.
pub fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

fn validate_player_stats(dataset: &Dataset) -> Result<()> {
    if dataset.game_modes.len() != GameMode::COUNT {
        return Err(Error::integrity(
            GameMode::TABLE,
            "id_mode",
            format!(
                "expected {} game modes, found {}",
                GameMode::COUNT,
                dataset.game_modes.len()
            ),
        ));
    }

    ensure_unique(
        PlayerStat::TABLE,
        "id_player, id_mode",
        dataset.player_stats.iter().map(|s| (s.player_id, s.mode_id)),
    )?;

    let expected: BTreeSet<(u32, u32)> = dataset
        .players
        .iter()
        .flat_map(|player| dataset.game_modes.iter().map(move |mode| (player.id, mode.id)))
        .collect();
    let actual: BTreeSet<(u32, u32)> = dataset
        .player_stats
        .iter()
        .map(|s| (s.player_id, s.mode_id))
        .collect();

    if let Some((player_id, mode_id)) = expected.difference(&actual).next() {
        return Err(Error::integrity(
            PlayerStat::TABLE,
            "id_player, id_mode",
            format!("missing stats for player {player_id} in mode {mode_id}"),
        ));
    }
    if let Some((player_id, mode_id)) = actual.difference(&expected).next() {
        return Err(Error::integrity(
            PlayerStat::TABLE,
            "id_player, id_mode",
            format!("stats for unknown pair ({player_id}, {mode_id})"),
        ));
    }

    Ok(())
}

fn ensure_unique<T, I>(table: &'static str, field: &'static str, values: I) -> Result<()>
where
    T: Eq + Hash + std::fmt::Debug,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    for value in values {
        if seen.contains(&value) {
            return Err(Error::integrity(
                table,
                field,
                format!("duplicate value {value:?}"),
            ));
        }
        seen.insert(value);
    }
    Ok(())
}
