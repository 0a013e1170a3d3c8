use std::env;
use std::path::PathBuf;

use rhythmseed_generate::{GenerateOptions, GenerationEngine, render_dataset, write_sql};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();
    let mut out = PathBuf::from("osu_demo_data.sql");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("missing --seed value")?;
                options.seed = value.parse()?;
            }
            "--out" => out = args.next().map(PathBuf::from).ok_or("missing --out path")?,
            "--no-reference" => options.use_reference_countries = false,
            _ => return Err(format!("unexpected argument {arg}").into()),
        }
    }

    let result = GenerationEngine::new(options).generate()?;
    let lines = render_dataset(&result.dataset);
    let bytes = write_sql(&out, &lines)?;

    println!("{}", serde_json::to_string_pretty(&result.report)?);
    println!("wrote {} lines ({bytes} bytes) to {}", lines.len(), out.display());
    Ok(())
}
