//! Digest JSON files
//!
//! One file per company and run date, holding an array of digest entries.

use crate::digest::DigestEntry;
use crate::PulseError;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the digest for `company` on `date`
///
/// ```
/// use chrono::NaiveDate;
/// use market_pulse::output::digest_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
/// assert_eq!(digest_file_name("Nvidia", date), "news_summary_Nvidia_2024-06-05.json");
/// ```
pub fn digest_file_name(company: &str, date: NaiveDate) -> String {
    format!("news_summary_{}_{}.json", company, date.format("%Y-%m-%d"))
}

/// Writes a digest into `directory`, creating it if needed
///
/// Returns the path of the written file.
pub fn write_digest(
    directory: &Path,
    company: &str,
    date: NaiveDate,
    entries: &[DigestEntry],
) -> Result<PathBuf, PulseError> {
    std::fs::create_dir_all(directory)?;
    let path = directory.join(digest_file_name(company, date));

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut writer, entries)?;
    writer.flush()?;

    tracing::info!("Wrote {} digest entries to {}", entries.len(), path.display());
    Ok(path)
}

/// Reads a digest file
pub fn read_digest(path: &Path) -> Result<Vec<DigestEntry>, PulseError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Selects the entries worth showing
///
/// Keeps entries with sentiment at or above `certainty`, in file order,
/// stopping after `limit`.
pub fn relevant_articles(entries: &[DigestEntry], limit: usize, certainty: f64) -> Vec<&DigestEntry> {
    entries
        .iter()
        .filter(|entry| entry.sentiment >= certainty)
        .take(limit)
        .collect()
}
