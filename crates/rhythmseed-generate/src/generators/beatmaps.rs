use rand::Rng;
use rand::seq::IndexedRandom;

use rhythmseed_core::{Beatmap, BeatmapSet, BeatmapStatus, GameMode, Player};

use super::GenerationContext;
use crate::errors::GenerationError;
use crate::faker::capitalize;

/// Years before the anchor date an approved set may have been approved.
pub const APPROVAL_WINDOW_YEARS: u32 = 5;

pub fn generate_beatmap_sets(
    ctx: &mut GenerationContext<'_>,
    players: &[Player],
    count: u32,
) -> Result<Vec<BeatmapSet>, GenerationError> {
    let mut sets = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let title = ctx.faker.sentence(3, &mut ctx.rng).replace('.', "");
        let artist = ctx.faker.person_name(&mut ctx.rng);
        // Creator is stored by username, not by player id.
        let creator = players
            .choose(&mut ctx.rng)
            .map(|player| player.username.clone())
            .ok_or_else(|| missing("beatmap sets", "players"))?;
        let source = ctx.faker.word(&mut ctx.rng);
        let tags = ctx.faker.words(5, &mut ctx.rng).join(" ");
        let status = *BeatmapStatus::ALL
            .choose(&mut ctx.rng)
            .unwrap_or(&BeatmapStatus::Pending);
        let approved_date = if status.is_approved() {
            Some(ctx.random_date(APPROVAL_WINDOW_YEARS))
        } else {
            None
        };

        sets.push(BeatmapSet {
            id,
            title,
            artist,
            creator,
            source,
            tags,
            status,
            approved_date,
        });
    }
    Ok(sets)
}

pub fn generate_beatmaps(
    ctx: &mut GenerationContext<'_>,
    sets: &[BeatmapSet],
    modes: &[GameMode],
    count: u32,
) -> Result<Vec<Beatmap>, GenerationError> {
    let mut beatmaps = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let set_id = sets
            .choose(&mut ctx.rng)
            .map(|set| set.id)
            .ok_or_else(|| missing("beatmaps", "beatmap sets"))?;
        let mode_id = modes
            .choose(&mut ctx.rng)
            .map(|mode| mode.id)
            .ok_or_else(|| missing("beatmaps", "game modes"))?;
        let difficulty_name = capitalize(&ctx.faker.word(&mut ctx.rng));

        beatmaps.push(Beatmap {
            id,
            set_id,
            mode_id,
            difficulty_name,
            difficulty_rating: ctx.uniform_rounded(0.5, 7.0, 2),
            total_length: ctx.rng.random_range(30..=600),
            bpm: ctx.rng.random_range(60..=220),
            max_combo: ctx.rng.random_range(50..=4000),
            approach_rate: ctx.uniform_rounded(0.0, 11.0, 1),
            overall_difficulty: ctx.uniform_rounded(0.0, 11.0, 1),
            circle_size: ctx.uniform_rounded(1.0, 10.0, 1),
            health_points: ctx.uniform_rounded(0.0, 10.0, 1),
        });
    }
    Ok(beatmaps)
}

pub(crate) fn missing(dependents: &str, referents: &str) -> GenerationError {
    GenerationError::InvalidConfig(format!("{dependents} need at least one of {referents}"))
}
