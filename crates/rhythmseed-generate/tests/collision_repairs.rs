use std::collections::HashSet;

use rand::RngCore;

use rhythmseed_generate::{DatasetCounts, FakeData, GenerateOptions, GenerationEngine};

/// Fake data whose usernames and emails never change.
struct RepeatingFakes;

impl FakeData for RepeatingFakes {
    fn country_name(&self, rng: &mut dyn RngCore) -> String {
        format!("Land {}", rng.next_u32())
    }

    fn word(&self, rng: &mut dyn RngCore) -> String {
        format!("word{}", rng.next_u32())
    }

    fn words(&self, count: usize, rng: &mut dyn RngCore) -> Vec<String> {
        (0..count).map(|_| self.word(rng)).collect()
    }

    fn sentence(&self, words: usize, rng: &mut dyn RngCore) -> String {
        format!("{}.", self.words(words, rng).join(" "))
    }

    fn person_name(&self, _rng: &mut dyn RngCore) -> String {
        "Ada Lovelace".to_string()
    }

    fn username(&self, _rng: &mut dyn RngCore) -> String {
        "mapper".to_string()
    }

    fn email(&self, _rng: &mut dyn RngCore) -> String {
        "mapper@example.com".to_string()
    }

    fn free_email_domain(&self, _rng: &mut dyn RngCore) -> String {
        "mail.example".to_string()
    }
}

fn options() -> GenerateOptions {
    GenerateOptions {
        counts: DatasetCounts {
            countries: 5,
            players: 3,
            beatmap_sets: 2,
            beatmaps: 4,
            mods: 3,
            plays: 5,
            medals: 2,
        },
        ..GenerateOptions::default()
    }
}

#[test]
fn repeated_usernames_and_emails_are_repaired() {
    let engine = GenerationEngine::with_fake_data(options(), Box::new(RepeatingFakes));
    let result = engine.generate().expect("generate");

    let usernames: Vec<&str> = result
        .dataset
        .players
        .iter()
        .map(|p| p.username.as_str())
        .collect();
    assert_eq!(usernames, vec!["mapper", "mapper2", "mapper3"]);

    let emails: Vec<&str> = result.dataset.players.iter().map(|p| p.email.as_str()).collect();
    assert_eq!(
        emails,
        vec![
            "mapper@example.com",
            "mapper2@mail.example",
            "mapper3@mail.example"
        ]
    );

    assert_eq!(result.report.repairs_for("username"), 2);
    assert_eq!(result.report.repairs_for("email"), 2);
}

#[test]
fn generated_country_codes_are_stepped_apart() {
    let options = GenerateOptions {
        use_reference_countries: false,
        ..options()
    };
    let engine = GenerationEngine::with_fake_data(options, Box::new(RepeatingFakes));
    let result = engine.generate().expect("generate");

    // Every name starts with "La", so all but the first code collide.
    let codes: Vec<&str> = result
        .dataset
        .countries
        .iter()
        .map(|c| c.code.as_str())
        .collect();
    assert_eq!(codes, vec!["LA", "LB", "LC", "LD", "LE"]);
    assert_eq!(result.report.repairs_for("country_code"), 4);
    assert_eq!(result.report.country_source, "generative");

    let names: HashSet<&str> = result
        .dataset
        .countries
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names.len(), 5);
}
