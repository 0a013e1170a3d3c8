use std::collections::HashSet;

use rand::seq::IndexedRandom;

use rhythmseed_core::{Country, Player};

use super::GenerationContext;
use crate::errors::GenerationError;

/// Years before the anchor date a player may have joined.
pub const JOIN_WINDOW_YEARS: u32 = 6;

/// Players with distinct usernames and emails, each from an existing country.
///
/// A username the provider repeats gets the player id appended; a repeated
/// email is rebuilt from the username and a free mail domain.
pub fn generate_players(
    ctx: &mut GenerationContext<'_>,
    countries: &[Country],
    count: u32,
) -> Result<Vec<Player>, GenerationError> {
    let mut players = Vec::with_capacity(count as usize);
    let mut usernames: HashSet<String> = HashSet::new();
    let mut emails: HashSet<String> = HashSet::new();

    for id in 1..=count {
        let mut username = ctx.faker.username(&mut ctx.rng);
        if usernames.contains(&username) {
            let repaired = format!("{username}{id}");
            ctx.record_repair("username", &repaired);
            username = repaired;
        }
        usernames.insert(username.clone());

        let mut email = ctx.faker.email(&mut ctx.rng);
        if emails.contains(&email) {
            let domain = ctx.faker.free_email_domain(&mut ctx.rng);
            let repaired = format!("{username}@{domain}");
            ctx.record_repair("email", &repaired);
            email = repaired;
        }
        emails.insert(email.clone());

        let password_hash = ctx.faker.password_hash(&mut ctx.rng);
        let country = countries.choose(&mut ctx.rng).ok_or_else(|| {
            GenerationError::InvalidConfig("players need at least one country".to_string())
        })?;
        let join_date = ctx.random_date(JOIN_WINDOW_YEARS);

        players.push(Player {
            id,
            username,
            password_hash,
            email,
            country_code: country.code.clone(),
            join_date,
        });
    }
    Ok(players)
}
