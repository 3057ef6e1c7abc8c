use std::path::PathBuf;

use anyhow::{bail, Result};
use waveform_lzw::batch::Batch;

/// Usage: `waveform-lzw [SAMPLES_DIR] [OUTPUT_DIR]`, defaulting to `samples` and the current
/// directory.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let samples_dir = PathBuf::from(args.next().unwrap_or_else(|| "samples".to_string()));
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    if !samples_dir.is_dir() {
        bail!("Samples directory not found: {}", samples_dir.display());
    }

    let batch = Batch::new(samples_dir, output_dir)?;
    let outcomes = batch.run();

    let failed = outcomes
        .iter()
        .filter(|outcome| outcome.result.is_err())
        .count();
    log::info!(
        "{} of {} samples compressed, results in {}",
        outcomes.len() - failed,
        outcomes.len(),
        batch.results().path().display()
    );

    Ok(())
}
