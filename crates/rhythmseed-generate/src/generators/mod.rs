//! Per-table generation steps.
//!
//! Every step takes the shared [`GenerationContext`] plus the referent
//! collections it needs and returns the rows it built. Nothing is kept
//! between steps except what the caller threads through.

pub mod beatmaps;
pub mod catalog;
pub mod people;
pub mod plays;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use rhythmseed_core::round_to;

use crate::faker::{FakeData, FakeProvider};
use crate::model::GenerationReport;

pub use beatmaps::{generate_beatmap_sets, generate_beatmaps};
pub use catalog::{generate_game_modes, generate_medals, generate_mods};
pub use people::generate_players;
pub use plays::{generate_play_mods, generate_player_medals, generate_player_stats, generate_plays};

/// State shared by the generation steps of one run.
pub struct GenerationContext<'a> {
    /// The only RNG of the run, seeded once.
    pub rng: ChaCha8Rng,
    pub faker: FakeProvider<'a>,
    /// Latest date any generated date may take.
    pub anchor_date: NaiveDate,
    pub report: GenerationReport,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        seed: u64,
        data: &'a dyn FakeData,
        anchor_date: NaiveDate,
        report: GenerationReport,
    ) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            faker: FakeProvider::new(data),
            anchor_date,
            report,
        }
    }

    /// Uniform date within `years` of the anchor date, both ends included.
    pub fn random_date(&mut self, years: u32) -> NaiveDate {
        let span = i64::from(years) * 365;
        let offset = self.rng.random_range(0..=span);
        self.anchor_date - chrono::Duration::days(offset)
    }

    /// Uniform timestamp within `years` before midnight of the anchor date.
    pub fn random_datetime(&mut self, years: u32) -> NaiveDateTime {
        let end = NaiveDateTime::new(self.anchor_date, NaiveTime::default());
        let span = i64::from(years) * 365 * 24 * 60 * 60;
        let offset = self.rng.random_range(0..=span);
        end - chrono::Duration::seconds(offset)
    }

    /// Uniform float in `[low, high]` rounded to `decimals` places.
    pub fn uniform_rounded(&mut self, low: f64, high: f64, decimals: u32) -> f64 {
        round_to(self.rng.random_range(low..=high), decimals)
    }

    /// Count a collision repair of `kind`.
    pub fn record_repair(&mut self, kind: &str, detail: &str) {
        debug!(kind, detail, "collision repaired");
        self.report.record_repair(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faker::FakeRs;

    fn context(seed: u64) -> GenerationContext<'static> {
        let anchor = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date");
        GenerationContext::new(seed, &FakeRs, anchor, GenerationReport::new("t".into(), seed))
    }

    #[test]
    fn dates_stay_inside_the_window() {
        let mut ctx = context(1);
        let earliest = ctx.anchor_date - chrono::Duration::days(6 * 365);
        for _ in 0..500 {
            let date = ctx.random_date(6);
            assert!(date >= earliest && date <= ctx.anchor_date);
        }
    }

    #[test]
    fn timestamps_stay_inside_the_window() {
        let mut ctx = context(2);
        let end = NaiveDateTime::new(ctx.anchor_date, NaiveTime::default());
        let start = end - chrono::Duration::days(2 * 365);
        for _ in 0..500 {
            let ts = ctx.random_datetime(2);
            assert!(ts >= start && ts <= end);
        }
    }

    #[test]
    fn rounded_floats_respect_bounds_and_precision() {
        let mut ctx = context(3);
        for _ in 0..500 {
            let value = ctx.uniform_rounded(0.5, 7.0, 2);
            assert!((0.5..=7.0).contains(&value));
            assert_eq!(round_to(value, 2), value);
        }
    }

    #[test]
    fn repairs_are_counted_by_kind() {
        let mut ctx = context(4);
        ctx.record_repair("username", "a -> a1");
        ctx.record_repair("username", "b -> b2");
        assert_eq!(ctx.report.repairs_for("username"), 2);
        assert_eq!(ctx.report.repairs_for("email"), 0);
    }
}
