use std::collections::{BTreeMap, HashSet};

use fake::Fake;
use fake::faker::address::en::CountryName;
use fake::faker::internet::en::{FreeEmailProvider, SafeEmail, Username};
use fake::faker::lorem::en::{Sentence, Word, Words};
use fake::faker::name::en::Name;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::GenerationError;

/// Redraws allowed before a unique draw gives up.
pub const MAX_UNIQUE_ATTEMPTS: u32 = 1000;

/// Source of plausible text values.
///
/// All randomness comes from the caller's RNG so a seeded run is repeatable.
pub trait FakeData {
    fn country_name(&self, rng: &mut dyn RngCore) -> String;
    fn word(&self, rng: &mut dyn RngCore) -> String;
    fn words(&self, count: usize, rng: &mut dyn RngCore) -> Vec<String>;
    fn sentence(&self, words: usize, rng: &mut dyn RngCore) -> String;
    fn person_name(&self, rng: &mut dyn RngCore) -> String;
    fn username(&self, rng: &mut dyn RngCore) -> String;
    fn email(&self, rng: &mut dyn RngCore) -> String;
    fn free_email_domain(&self, rng: &mut dyn RngCore) -> String;

    /// Hex SHA-256 of random bytes, shaped like a stored password hash.
    fn password_hash(&self, rng: &mut dyn RngCore) -> String {
        let mut bytes = [0_u8; 32];
        rng.fill_bytes(&mut bytes);
        hex::encode(Sha256::digest(bytes))
    }
}

/// [`FakeData`] backed by the English fakers of the `fake` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeRs;

impl FakeData for FakeRs {
    fn country_name(&self, rng: &mut dyn RngCore) -> String {
        CountryName().fake_with_rng(rng)
    }

    fn word(&self, rng: &mut dyn RngCore) -> String {
        Word().fake_with_rng(rng)
    }

    fn words(&self, count: usize, rng: &mut dyn RngCore) -> Vec<String> {
        Words(count..count + 1).fake_with_rng(rng)
    }

    fn sentence(&self, words: usize, rng: &mut dyn RngCore) -> String {
        Sentence(words..words + 1).fake_with_rng(rng)
    }

    fn person_name(&self, rng: &mut dyn RngCore) -> String {
        Name().fake_with_rng(rng)
    }

    fn username(&self, rng: &mut dyn RngCore) -> String {
        Username().fake_with_rng(rng)
    }

    fn email(&self, rng: &mut dyn RngCore) -> String {
        SafeEmail().fake_with_rng(rng)
    }

    fn free_email_domain(&self, rng: &mut dyn RngCore) -> String {
        FreeEmailProvider().fake_with_rng(rng)
    }
}

/// Seen-sets per value kind with bounded redraws.
#[derive(Debug)]
pub struct UniqueValues {
    seen: BTreeMap<&'static str, HashSet<String>>,
    max_attempts: u32,
}

impl UniqueValues {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            seen: BTreeMap::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draw until `next` yields an unseen value.
    ///
    /// Returns `Err` with the last candidate when every attempt collided; the
    /// candidate is not recorded.
    pub fn draw<F>(&mut self, kind: &'static str, mut next: F) -> Result<String, String>
    where
        F: FnMut() -> String,
    {
        let seen = self.seen.entry(kind).or_default();
        let mut candidate = String::new();
        for _ in 0..self.max_attempts {
            candidate = next();
            if seen.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(candidate)
    }
}

/// Fake-data provider with a unique proxy, mirroring how the generation
/// steps consume values.
pub struct FakeProvider<'a> {
    data: &'a dyn FakeData,
    unique: UniqueValues,
}

impl<'a> FakeProvider<'a> {
    pub fn new(data: &'a dyn FakeData) -> Self {
        Self::with_max_attempts(data, MAX_UNIQUE_ATTEMPTS)
    }

    pub fn with_max_attempts(data: &'a dyn FakeData, max_attempts: u32) -> Self {
        Self {
            data,
            unique: UniqueValues::new(max_attempts),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.unique.max_attempts()
    }

    pub fn unique_country_name(
        &mut self,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        let data = self.data;
        self.unique
            .draw("country_name", || data.country_name(rng))
            .map_err(|_| exhausted("country names", self.unique.max_attempts()))
    }

    pub fn unique_word(&mut self, rng: &mut dyn RngCore) -> Result<String, GenerationError> {
        let data = self.data;
        self.unique
            .draw("word", || data.word(rng))
            .map_err(|_| exhausted("words", self.unique.max_attempts()))
    }

    /// Best-effort unique username; may repeat once the pool is exhausted.
    pub fn username(&mut self, rng: &mut dyn RngCore) -> String {
        let data = self.data;
        self.unique
            .draw("username", || data.username(rng))
            .unwrap_or_else(|last| last)
    }

    /// Best-effort unique email; may repeat once the pool is exhausted.
    pub fn email(&mut self, rng: &mut dyn RngCore) -> String {
        let data = self.data;
        self.unique
            .draw("email", || data.email(rng))
            .unwrap_or_else(|last| last)
    }

    pub fn word(&self, rng: &mut dyn RngCore) -> String {
        self.data.word(rng)
    }

    pub fn words(&self, count: usize, rng: &mut dyn RngCore) -> Vec<String> {
        self.data.words(count, rng)
    }

    pub fn sentence(&self, words: usize, rng: &mut dyn RngCore) -> String {
        self.data.sentence(words, rng)
    }

    pub fn person_name(&self, rng: &mut dyn RngCore) -> String {
        self.data.person_name(rng)
    }

    pub fn free_email_domain(&self, rng: &mut dyn RngCore) -> String {
        self.data.free_email_domain(rng)
    }

    pub fn password_hash(&self, rng: &mut dyn RngCore) -> String {
        self.data.password_hash(rng)
    }
}

fn exhausted(what: &str, attempts: u32) -> GenerationError {
    GenerationError::Exhausted(format!("no fresh {what} after {attempts} attempts"))
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn capitalizes_like_a_title() {
        assert_eq!(capitalize("spinner"), "Spinner");
        assert_eq!(capitalize("hARDROCK"), "Hardrock");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn unique_draw_returns_last_candidate_when_exhausted() {
        let mut unique = UniqueValues::new(3);
        assert_eq!(unique.draw("k", || "same".to_string()), Ok("same".to_string()));
        assert_eq!(unique.draw("k", || "same".to_string()), Err("same".to_string()));
        assert_eq!(unique.draw("other", || "same".to_string()), Ok("same".to_string()));
    }

    #[test]
    fn password_hash_is_hex_sha256() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let hash = FakeRs.password_hash(&mut rng);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn free_email_domain_is_a_bare_host() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let domain = FakeRs.free_email_domain(&mut rng);
        assert!(domain.contains('.'), "{domain}");
        assert!(!domain.contains('@'), "{domain}");
    }

    #[test]
    fn same_seed_same_values() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(FakeRs.username(&mut a), FakeRs.username(&mut b));
        assert_eq!(FakeRs.sentence(6, &mut a), FakeRs.sentence(6, &mut b));
    }
}
