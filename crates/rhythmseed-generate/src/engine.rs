use std::time::Instant;

use tracing::{info, warn};

use rhythmseed_core::{Dataset, GameMode, validate_dataset};

use crate::assets::CountryAsset;
use crate::countries::select_country_source;
use crate::errors::GenerationError;
use crate::faker::{FakeData, FakeRs};
use crate::generators::{
    GenerationContext, generate_beatmap_sets, generate_beatmaps, generate_game_modes,
    generate_medals, generate_mods, generate_play_mods, generate_player_medals,
    generate_player_stats, generate_players, generate_plays,
};
use crate::model::{DatasetCounts, GenerateOptions, GenerationReport, TableReport};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Entry point for generating the dataset.
pub struct GenerationEngine {
    options: GenerateOptions,
    data: Box<dyn FakeData>,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self::with_fake_data(options, Box::new(FakeRs))
    }

    /// Use `data` instead of the `fake` crate for text values.
    pub fn with_fake_data(options: GenerateOptions, data: Box<dyn FakeData>) -> Self {
        Self { options, data }
    }

    /// Build every table in dependency order and validate the result.
    ///
    /// Nothing is written; an integrity violation comes back as
    /// [`GenerationError::Integrity`].
    pub fn generate(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let counts = self.options.counts;
        counts.validate()?;

        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self.options.seed;
        info!(
            run_id = %run_id,
            seed,
            anchor_date = %self.options.anchor_date,
            "generation started"
        );

        let report = GenerationReport::new(run_id.clone(), seed);
        let mut ctx = GenerationContext::new(
            seed,
            self.data.as_ref(),
            self.options.anchor_date,
            report,
        );

        let dataset = match self.build(&mut ctx, &counts) {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                return Err(err);
            }
        };
        if let Err(err) = validate_dataset(&dataset) {
            warn!(run_id = %run_id, error = %err, "dataset failed validation");
            return Err(err.into());
        }

        let mut report = ctx.report;
        for (table, rows) in dataset.row_counts() {
            info!(table, rows, "table generated");
            report.tables.push(TableReport {
                table: table.to_string(),
                rows_requested: requested_rows(table, &counts),
                rows_generated: rows as u64,
            });
        }
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            repairs = report.repairs.values().sum::<u64>(),
            duration_ms = report.duration_ms,
            "generation completed"
        );
        Ok(GenerationResult { dataset, report })
    }

    fn build(
        &self,
        ctx: &mut GenerationContext<'_>,
        counts: &DatasetCounts,
    ) -> Result<Dataset, GenerationError> {
        let asset = self
            .options
            .use_reference_countries
            .then(|| CountryAsset::from_option(self.options.countries_path.as_deref()));
        let mut source = select_country_source(asset, counts.countries as usize);
        ctx.report.country_source = source.name();
        info!(source = %ctx.report.country_source, "country source selected");

        let countries = source.countries(counts.countries as usize, ctx)?;
        let game_modes = generate_game_modes();
        let mods = generate_mods(counts.mods);
        let medals = generate_medals(ctx, counts.medals)?;
        let players = generate_players(ctx, &countries, counts.players)?;
        let beatmap_sets = generate_beatmap_sets(ctx, &players, counts.beatmap_sets)?;
        let beatmaps = generate_beatmaps(ctx, &beatmap_sets, &game_modes, counts.beatmaps)?;
        let plays = generate_plays(ctx, &players, &beatmaps, counts.plays)?;
        let play_mods = generate_play_mods(ctx, &plays, &mods);
        let player_medals = generate_player_medals(ctx, &players, &medals);
        let player_stats = generate_player_stats(ctx, &players, &game_modes);

        Ok(Dataset {
            countries,
            game_modes,
            mods,
            medals,
            players,
            beatmap_sets,
            beatmaps,
            plays,
            play_mods,
            player_medals,
            player_stats,
        })
    }
}

fn requested_rows(table: &str, counts: &DatasetCounts) -> Option<u64> {
    let requested = match table {
        "Countries" => counts.countries,
        "GameModes" => GameMode::COUNT as u32,
        "Mods" => counts.mods,
        "Medals" => counts.medals,
        "Players" => counts.players,
        "BeatmapSets" => counts.beatmap_sets,
        "Beatmaps" => counts.beatmaps,
        "Plays" => counts.plays,
        "PlayerStats" => counts.players.saturating_mul(GameMode::COUNT as u32),
        _ => return None,
    };
    Some(u64::from(requested))
}
