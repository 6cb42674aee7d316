// src/output.rs
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::zillow::{PropertyRecord, CSV_HEADER};

/// CSV file that records are appended to one at a time. The file is opened
/// and closed around every write, so a crash loses at most the row being
/// written.
pub struct CsvSink {
    path: PathBuf,
    /// Whether the next write appends rather than truncating.
    append: bool,
    header_pending: bool,
}

impl CsvSink {
    /// Append mode only applies to a file that already exists; otherwise the
    /// file is (re)created with a header on first write. Nothing touches the
    /// filesystem until then.
    pub fn new(path: impl Into<PathBuf>, append: bool) -> Self {
        let path = path.into();
        let continue_existing = append && path.exists();
        Self {
            path,
            append: continue_existing,
            header_pending: !continue_existing,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, record: &PropertyRecord) -> Result<(), AppError> {
        let file = if self.append {
            OpenOptions::new().create(true).append(true).open(&self.path)?
        } else {
            File::create(&self.path)?
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if self.header_pending {
            writer.write_record(CSV_HEADER)?;
        }
        writer.serialize(record)?;
        writer.flush()?;

        self.header_pending = false;
        self.append = true;
        Ok(())
    }
}
