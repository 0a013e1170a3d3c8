use std::collections::HashSet;

use rhythmseed_core::{GameMode, Medal, Mod};

use super::GenerationContext;
use crate::errors::GenerationError;
use crate::faker::capitalize;

/// Curated mods as `(code, name, description)`.
pub const COMMON_MODS: [(&str, &str, &str); 12] = [
    ("NF", "No Fail", "Player will not fail"),
    ("EZ", "Easy", "Reduces difficulty"),
    ("HD", "Hidden", "No approach circles"),
    ("HR", "HardRock", "Increases difficulty"),
    ("DT", "DoubleTime", "Faster playback"),
    ("HT", "HalfTime", "Slower playback"),
    ("FL", "Flashlight", "Limited vision"),
    ("SO", "SpunOut", "Spinners auto-complete"),
    ("NC", "Nightcore", "Special DoubleTime"),
    ("PF", "Perfect", "Auto-perfect"),
    ("SD", "SuddenDeath", "Player will fail on a miss"),
    ("TD", "Target", "Example mod"),
];

pub fn generate_game_modes() -> Vec<GameMode> {
    GameMode::NAMES
        .iter()
        .zip(1..)
        .map(|(name, id)| GameMode {
            id,
            name: (*name).to_string(),
            description: format!("{name} mode"),
        })
        .collect()
}

/// Curated mods first, then `M<nn>`/`Mod<n>` fillers up to `count`.
///
/// Ids follow append order, so a skipped curated entry never leaves a gap
/// that a filler could collide with.
pub fn generate_mods(count: u32) -> Vec<Mod> {
    let target = count as usize;
    let mut mods: Vec<Mod> = Vec::with_capacity(target);
    let mut codes: HashSet<String> = HashSet::new();
    let mut names: HashSet<String> = HashSet::new();

    for (code, name, description) in COMMON_MODS {
        if mods.len() >= target {
            break;
        }
        if codes.contains(code) || names.contains(name) {
            continue;
        }
        codes.insert(code.to_string());
        names.insert(name.to_string());
        mods.push(Mod {
            id: next_id(mods.len()),
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        });
    }

    let mut seq = mods.len() + 1;
    while mods.len() < target {
        let code = format!("M{seq:02}");
        let name = format!("Mod{seq}");
        seq += 1;
        if !codes.insert(code.clone()) || !names.insert(name.clone()) {
            continue;
        }
        mods.push(Mod {
            id: next_id(mods.len()),
            code,
            name,
            description: "Generated mod".to_string(),
        });
    }
    mods
}

/// Medals named `<Word> Medal` from distinct words.
pub fn generate_medals(
    ctx: &mut GenerationContext<'_>,
    count: u32,
) -> Result<Vec<Medal>, GenerationError> {
    let mut medals = Vec::with_capacity(count as usize);
    let mut names: HashSet<String> = HashSet::new();
    let mut collisions = 0_u32;
    while medals.len() < count as usize {
        let word = ctx.faker.unique_word(&mut ctx.rng)?;
        let name = format!("{} Medal", capitalize(&word));
        // Distinct words can still capitalize to the same name.
        if !names.insert(name.clone()) {
            collisions += 1;
            if collisions >= ctx.faker.max_attempts() {
                return Err(GenerationError::Exhausted(format!(
                    "medal names collided {collisions} times"
                )));
            }
            continue;
        }
        let id = next_id(medals.len());
        medals.push(Medal {
            id,
            name,
            description: ctx.faker.sentence(6, &mut ctx.rng),
            icon_url: format!("https://medals.example/{id}.png"),
        });
    }
    Ok(medals)
}

fn next_id(len: usize) -> u32 {
    u32::try_from(len + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_modes_with_sequential_ids() {
        let modes = generate_game_modes();
        let ids: Vec<u32> = modes.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(modes[1].name, "standard");
        assert_eq!(modes[3].description, "ctb mode");
    }

    #[test]
    fn mods_stop_at_the_target() {
        let mods = generate_mods(3);
        let codes: Vec<&str> = mods.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["NF", "EZ", "HD"]);
    }

    #[test]
    fn mods_are_padded_past_the_curated_pool() {
        let mods = generate_mods(15);
        assert_eq!(mods.len(), 15);
        assert_eq!(mods[12].code, "M13");
        assert_eq!(mods[12].name, "Mod13");
        assert_eq!(mods[14].description, "Generated mod");
        let ids: Vec<u32> = mods.iter().map(|m| m.id).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn zero_mods_is_empty() {
        assert!(generate_mods(0).is_empty());
    }
}
