//! CSV loading for the launch records dataset.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use super::{Dataset, LaunchRecord};
use crate::error::{Error, Result};

impl Dataset {
    /// Load the dataset from a CSV file.
    ///
    /// The file must have a header row containing at least `Launch Site`,
    /// `class`, `Payload Mass (kg)`, and `Booster Version Category`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, a row cannot be parsed,
    /// or a row violates a record invariant.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening dataset at {}", path.display());
        let file = File::open(path).map_err(|source| Error::DatasetOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_reader(file)?;
        info!(
            records = dataset.len(),
            sites = dataset.sites().len(),
            "Loaded dataset from {}",
            path.display()
        );
        Ok(dataset)
    }

    /// Load the dataset from any CSV source.
    ///
    /// # Errors
    ///
    /// Returns an error if a row cannot be parsed or violates a record invariant.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut row = csv::StringRecord::new();
        let mut records = Vec::new();
        while csv_reader.read_record(&mut row)? {
            let record: LaunchRecord = row.deserialize(Some(&headers))?;
            if let Err(message) = record.check() {
                let line = row.position().map_or(0, csv::Position::line);
                return Err(Error::InvalidRecord { line, message });
            }
            records.push(record);
        }

        Ok(Self::from_records(records))
    }
}
