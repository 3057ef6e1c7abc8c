use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use hashlzw::{encoder::FixedEncoder, Config};

use crate::{
    bits::to_bit_text,
    entropy::binary_entropy,
    report::{ResultLog, ResultRecord},
};

/// Samples looked for when none are given.
pub const SAMPLES: [&str; 4] = ["SINEWAVE", "CRICKETSOUND", "REPEATINGWORD", "AREA"];

pub const RESULTS_FILE: &str = "compression_results.csv";

/// How the compression of one sample went.
#[derive(Debug)]
pub struct SampleOutcome {
    pub sample: String,
    pub result: Result<ResultRecord>,
}

/// Compresses a list of samples one after the other.
///
/// For a sample `NAME`, reads `WAV_NAME.wav` and, if present, `MP3_NAME.mp3` from the samples
/// directory. `NAME_bitInput.txt` and `NAME_output.lzw` are written to the output directory,
/// along with the result log.
#[derive(Debug)]
pub struct Batch {
    samples_dir: PathBuf,
    output_dir: PathBuf,
    samples: Vec<String>,
    encoder: FixedEncoder,
    results: ResultLog,
}

impl Batch {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(samples_dir: P, output_dir: Q) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Couldn't create {}", output_dir.display()))?;

        Ok(Self {
            samples_dir: samples_dir.into(),
            results: ResultLog::new(output_dir.join(RESULTS_FILE)),
            output_dir,
            samples: SAMPLES.iter().map(|sample| sample.to_string()).collect(),
            encoder: FixedEncoder::new(Config::ascii())?,
        })
    }

    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.samples = samples.into_iter().map(Into::into).collect();
        self
    }

    pub fn results(&self) -> &ResultLog {
        &self.results
    }

    /// Runs every sample. A failing sample is logged and doesn't stop the others.
    pub fn run(&self) -> Vec<SampleOutcome> {
        self.samples
            .iter()
            .map(|sample| {
                let result = self.run_sample(sample);
                if let Err(error) = &result {
                    log::error!("Compression failed for WAV_{sample}.wav: {error:#}");
                }
                SampleOutcome {
                    sample: sample.clone(),
                    result,
                }
            })
            .collect()
    }

    pub fn run_sample(&self, sample: &str) -> Result<ResultRecord> {
        let wav_path = self.samples_dir.join(format!("WAV_{sample}.wav"));
        let mp3_path = self.samples_dir.join(format!("MP3_{sample}.mp3"));
        let bit_path = self.output_dir.join(format!("{sample}_bitInput.txt"));
        let compressed_path = self.output_dir.join(format!("{sample}_output.lzw"));

        let wav = fs::read(&wav_path)
            .with_context(|| format!("Couldn't read {}", wav_path.display()))?;

        let bit_text = to_bit_text(&wav);
        let entropy = binary_entropy(&bit_text);
        log::info!("Entropy (bits/bit) for WAV_{sample}.wav: {entropy:.4}");

        fs::write(&bit_path, &bit_text)
            .with_context(|| format!("Couldn't write {}", bit_path.display()))?;

        let input = File::open(&bit_path)
            .with_context(|| format!("Couldn't open {}", bit_path.display()))?;
        let output = File::create(&compressed_path)
            .with_context(|| format!("Couldn't create {}", compressed_path.display()))?;
        let summary = self
            .encoder
            .encode(BufReader::new(input), BufWriter::new(output))
            .with_context(|| format!("Couldn't compress {}", bit_path.display()))?;
        log::debug!("{sample}: {summary:?}");

        let wav_size = file_size(&wav_path)?;
        let compressed_size = file_size(&compressed_path)?;
        let reference_size = fs::metadata(&mp3_path).ok().map(|metadata| metadata.len());

        log::info!("WAV file size for WAV_{sample}.wav: {wav_size} bytes");
        log::info!("Compressed file size: {compressed_size} bytes");
        match reference_size {
            Some(size) => log::info!("MP3 file size for MP3_{sample}.mp3: {size} bytes"),
            None => log::warn!("MP3 file not found: {}", mp3_path.display()),
        }

        let record = ResultRecord {
            source: wav_path.display().to_string(),
            original_size: wav_size,
            compressed_size,
            reference_size,
            entropy,
        };
        self.results.append(&record)?;

        Ok(record)
    }
}

fn file_size(path: &Path) -> Result<u64> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Couldn't stat {}", path.display()))?;
    Ok(metadata.len())
}
