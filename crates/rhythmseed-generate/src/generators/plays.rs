use std::collections::HashSet;

use rand::Rng;
use rand::seq::{IndexedRandom, index};

use rhythmseed_core::{
    Beatmap, GameMode, Medal, Mod, Play, PlayMod, Player, PlayerMedal, PlayerStat, Rank,
};

use super::GenerationContext;
use super::beatmaps::missing;
use crate::errors::GenerationError;

/// Years before the anchor date a play may have happened.
pub const PLAY_WINDOW_YEARS: u32 = 2;
/// Years before the anchor date a medal may have been achieved.
pub const ACHIEVEMENT_WINDOW_YEARS: u32 = 4;
/// Chance that a play is flagged perfect.
pub const PERFECT_PROBABILITY: f64 = 0.02;
/// Upper bound on mods per play and medals per player.
pub const MAX_PER_ROW: usize = 3;

pub fn generate_plays(
    ctx: &mut GenerationContext<'_>,
    players: &[Player],
    beatmaps: &[Beatmap],
    count: u32,
) -> Result<Vec<Play>, GenerationError> {
    let mut plays = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let player_id = players
            .choose(&mut ctx.rng)
            .map(|player| player.id)
            .ok_or_else(|| missing("plays", "players"))?;
        let beatmap_id = beatmaps
            .choose(&mut ctx.rng)
            .map(|beatmap| beatmap.id)
            .ok_or_else(|| missing("plays", "beatmaps"))?;
        let score = ctx.rng.random_range(1_000..=1_000_000);
        let max_combo = ctx.rng.random_range(1..=5_000);
        let accuracy = ctx.uniform_rounded(50.0, 100.0, 2);
        let rank = *Rank::ALL.choose(&mut ctx.rng).unwrap_or(&Rank::D);
        let date_played = ctx.random_datetime(PLAY_WINDOW_YEARS);
        let perfect = ctx.rng.random_bool(PERFECT_PROBABILITY);

        plays.push(Play {
            id,
            player_id,
            beatmap_id,
            score,
            max_combo,
            accuracy,
            rank,
            date_played,
            perfect,
        });
    }
    Ok(plays)
}

/// Zero to three distinct mods per play, sampled without replacement.
pub fn generate_play_mods(
    ctx: &mut GenerationContext<'_>,
    plays: &[Play],
    mods: &[Mod],
) -> Vec<PlayMod> {
    let mut play_mods = Vec::new();
    let cap = MAX_PER_ROW.min(mods.len());
    for play in plays {
        let k = ctx.rng.random_range(0..=cap);
        if k == 0 {
            continue;
        }
        for idx in index::sample(&mut ctx.rng, mods.len(), k).into_iter() {
            play_mods.push(PlayMod {
                play_id: play.id,
                mod_id: mods[idx].id,
            });
        }
    }
    play_mods
}

/// Zero to three distinct medals per player.
///
/// Pairs already emitted are skipped, so `(player, medal)` stays unique even
/// if the sampling were to repeat.
pub fn generate_player_medals(
    ctx: &mut GenerationContext<'_>,
    players: &[Player],
    medals: &[Medal],
) -> Vec<PlayerMedal> {
    let mut player_medals = Vec::new();
    let mut seen = HashSet::new();
    for player in players {
        let n = ctx.rng.random_range(0..=MAX_PER_ROW).min(medals.len());
        if n == 0 {
            continue;
        }
        for idx in index::sample(&mut ctx.rng, medals.len(), n).into_iter() {
            let medal_id = medals[idx].id;
            if !seen.insert((player.id, medal_id)) {
                continue;
            }
            player_medals.push(PlayerMedal {
                player_id: player.id,
                medal_id,
                achieved_date: ctx.random_date(ACHIEVEMENT_WINDOW_YEARS),
            });
        }
    }
    player_medals
}

/// Exactly one stat row per player and game mode.
pub fn generate_player_stats(
    ctx: &mut GenerationContext<'_>,
    players: &[Player],
    modes: &[GameMode],
) -> Vec<PlayerStat> {
    let mut stats = Vec::with_capacity(players.len() * modes.len());
    for player in players {
        for mode in modes {
            stats.push(PlayerStat {
                player_id: player.id,
                mode_id: mode.id,
                global_rank: ctx.rng.random_range(1..=50_000),
                local_rank: ctx.rng.random_range(1..=5_000),
                pp_total: ctx.uniform_rounded(0.0, 10_000.0, 2),
                playcount: ctx.rng.random_range(0..=10_000),
                overall_accuracy: ctx.uniform_rounded(0.0, 100.0, 2),
            });
        }
    }
    stats
}
