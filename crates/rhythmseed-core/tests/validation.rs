use chrono::NaiveDate;

use rhythmseed_core::{
    Country, Dataset, Error, GameMode, Medal, Mod, PlayMod, Player, PlayerMedal, PlayerStat,
    validate_dataset,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

fn player(id: u32, username: &str, email: &str, country: &str) -> Player {
    Player {
        id,
        username: username.to_string(),
        password_hash: "0".repeat(64),
        email: email.to_string(),
        country_code: country.to_string(),
        join_date: date(),
    }
}

fn stat(player_id: u32, mode_id: u32) -> PlayerStat {
    PlayerStat {
        player_id,
        mode_id,
        global_rank: 1,
        local_rank: 1,
        pp_total: 0.0,
        playcount: 0,
        overall_accuracy: 0.0,
    }
}

fn valid_dataset() -> Dataset {
    let game_modes = GameMode::NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| GameMode {
            id: index as u32 + 1,
            name: name.to_string(),
            description: format!("{name} mode"),
        })
        .collect::<Vec<_>>();
    let players = vec![
        player(1, "alpha", "alpha@example.com", "DE"),
        player(2, "bravo", "bravo@example.com", "FR"),
    ];
    let player_stats = players
        .iter()
        .flat_map(|p| game_modes.iter().map(move |m| stat(p.id, m.id)))
        .collect();

    Dataset {
        countries: vec![Country::new("DE", "Germany"), Country::new("FR", "France")],
        game_modes,
        mods: vec![Mod {
            id: 1,
            code: "NF".to_string(),
            name: "No Fail".to_string(),
            description: "Player will not fail".to_string(),
        }],
        medals: vec![Medal {
            id: 1,
            name: "Spinner Medal".to_string(),
            description: "Spin it.".to_string(),
            icon_url: "https://medals.example/1.png".to_string(),
        }],
        players,
        player_medals: vec![PlayerMedal {
            player_id: 1,
            medal_id: 1,
            achieved_date: date(),
        }],
        player_stats,
        ..Dataset::default()
    }
}

fn violated_field(dataset: &Dataset) -> (&'static str, &'static str) {
    match validate_dataset(dataset) {
        Err(Error::Integrity { table, field, .. }) => (table, field),
        Ok(()) => panic!("expected an integrity violation"),
    }
}

#[test]
fn accepts_consistent_dataset() {
    validate_dataset(&valid_dataset()).expect("dataset is valid");
}

#[test]
fn flag_url_follows_code() {
    assert_eq!(
        Country::new("JP", "Japan").flag_url,
        "https://flags.example/jp.png"
    );
}

#[test]
fn rejects_duplicate_country_code() {
    let mut dataset = valid_dataset();
    dataset.countries.push(Country::new("DE", "Deutschland"));
    assert_eq!(violated_field(&dataset), ("Countries", "code"));
}

#[test]
fn rejects_duplicate_country_name() {
    let mut dataset = valid_dataset();
    dataset.countries.push(Country::new("GE", "Germany"));
    assert_eq!(violated_field(&dataset), ("Countries", "name"));
}

#[test]
fn rejects_malformed_country_code() {
    let mut dataset = valid_dataset();
    dataset.countries.push(Country::new("gb", "United Kingdom"));
    assert_eq!(violated_field(&dataset), ("Countries", "code"));
}

#[test]
fn rejects_duplicate_username_and_email() {
    let mut dataset = valid_dataset();
    dataset.players[1].username = "alpha".to_string();
    assert_eq!(violated_field(&dataset), ("Players", "username"));

    let mut dataset = valid_dataset();
    dataset.players[1].email = "alpha@example.com".to_string();
    assert_eq!(violated_field(&dataset), ("Players", "email"));
}

#[test]
fn rejects_unknown_country_reference() {
    let mut dataset = valid_dataset();
    dataset.players[0].country_code = "ZZ".to_string();
    assert_eq!(violated_field(&dataset), ("Players", "country_code"));
}

#[test]
fn rejects_duplicate_mod_and_medal_names() {
    let mut dataset = valid_dataset();
    let mut copy = dataset.mods[0].clone();
    copy.id = 2;
    copy.code = "XX".to_string();
    dataset.mods.push(copy);
    assert_eq!(violated_field(&dataset), ("Mods", "name"));

    let mut dataset = valid_dataset();
    let mut copy = dataset.medals[0].clone();
    copy.id = 2;
    dataset.medals.push(copy);
    assert_eq!(violated_field(&dataset), ("Medals", "name"));
}

#[test]
fn rejects_duplicate_player_medal() {
    let mut dataset = valid_dataset();
    let repeat = dataset.player_medals[0].clone();
    dataset.player_medals.push(repeat);
    assert_eq!(
        violated_field(&dataset),
        ("PlayerMedals", "id_player, id_medal")
    );
}

#[test]
fn rejects_duplicate_play_mod() {
    let mut dataset = valid_dataset();
    let pair = PlayMod {
        play_id: 1,
        mod_id: 1,
    };
    dataset.play_mods = vec![pair, pair];
    assert_eq!(violated_field(&dataset), ("PlayMods", "id_play, id_mod"));
}

#[test]
fn rejects_stats_for_unknown_pair() {
    let mut dataset = valid_dataset();
    dataset.player_stats.push(stat(99, 1));
    assert_eq!(
        violated_field(&dataset),
        ("PlayerStats", "id_player, id_mode")
    );
    let detail = match validate_dataset(&dataset) {
        Err(Error::Integrity { detail, .. }) => detail,
        Ok(()) => panic!("expected an integrity violation"),
    };
    assert!(detail.contains("unknown pair (99, 1)"), "{detail}");
}

#[test]
fn rejects_incomplete_player_stats() {
    let mut dataset = valid_dataset();
    dataset.player_stats.pop();
    assert_eq!(
        violated_field(&dataset),
        ("PlayerStats", "id_player, id_mode")
    );
}
