use std::{
    borrow::Cow,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub const HEADER: &str = "WAV_File,WAV_Size,Compressed_Size,MP3_Size,Entropy,Compression_Ratio";

/// The outcome of compressing one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Where the sample was read from.
    pub source: String,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Size of the same sample in a reference format, if there is one.
    pub reference_size: Option<u64>,
    /// Entropy of the bit text, in bits per bit.
    pub entropy: f64,
}

impl ResultRecord {
    /// Original size over compressed size.
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    /// One CSV line, without the line ending. A missing reference is written as -1.
    pub fn to_csv(&self) -> String {
        let reference_size = self
            .reference_size
            .map_or(-1, |reference_size| reference_size as i64);
        format!(
            "{},{},{},{},{:.4},{:.4}",
            csv_field(&self.source),
            self.original_size,
            self.compressed_size,
            reference_size,
            self.entropy,
            self.ratio()
        )
    }
}

/// Quotes `field` if it holds a separator, a quote or a line break.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// A CSV file that records are appended to. The header is written while the file is empty.
#[derive(Debug, Clone)]
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &ResultRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Couldn't open {}", self.path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("Couldn't stat {}", self.path.display()))?
            .len();

        let mut lines = String::new();
        if len == 0 {
            lines.push_str(HEADER);
            lines.push('\n');
        }
        lines.push_str(&record.to_csv());
        lines.push('\n');

        file.write_all(lines.as_bytes())
            .with_context(|| format!("Couldn't write to {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ResultRecord {
        ResultRecord {
            source: "samples/WAV_AREA.wav".to_string(),
            original_size: 1000,
            compressed_size: 3000,
            reference_size: None,
            entropy: 0.811_278,
        }
    }

    #[test]
    fn csv_line() {
        let mut record = record();

        assert_eq!(
            record.to_csv(),
            "samples/WAV_AREA.wav,1000,3000,-1,0.8113,0.3333"
        );

        record.reference_size = Some(250);
        record.compressed_size = 400;
        assert_eq!(
            record.to_csv(),
            "samples/WAV_AREA.wav,1000,400,250,0.8113,2.5000"
        );
    }

    #[test]
    fn source_with_separators_is_quoted() {
        let mut record = record();

        record.source = "a,b/WAV_X.wav".to_string();
        assert_eq!(
            record.to_csv(),
            "\"a,b/WAV_X.wav\",1000,3000,-1,0.8113,0.3333"
        );

        record.source = "say \"hi\"/WAV_X.wav".to_string();
        assert_eq!(
            record.to_csv(),
            "\"say \"\"hi\"\"/WAV_X.wav\",1000,3000,-1,0.8113,0.3333"
        );
    }

    #[test]
    fn header_written_into_empty_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "")?;
        let log = ResultLog::new(&path);

        log.append(&record())?;

        let content = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines, [HEADER, record().to_csv().as_str()]);

        Ok(())
    }

    #[test]
    fn header_written_once() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let log = ResultLog::new(dir.path().join("results.csv"));

        log.append(&record())?;
        log.append(&record())?;

        let content = std::fs::read_to_string(log.path())?;
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], lines[2]);

        Ok(())
    }
}
