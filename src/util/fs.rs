//! Staged output files for `sql2csv convert --output-dir`.
//!
//! Output is written to a temporary file created inside the destination
//! directory and only renamed to its final `converted_<timestamp>.<ext>` name
//! once the conversion has fully succeeded. Dropping a [`StagedOutput`]
//! without calling [`StagedOutput::commit`] removes the temporary file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;

use crate::SqlCsvError;

/// File name for a conversion finished at `at`, e.g. `converted_20250314_093000.csv`.
pub fn timestamped_name(at: DateTime<Local>, ext: &str) -> String {
    format!("converted_{}.{}", at.format("%Y%m%d_%H%M%S"), ext)
}

/// First non-existing path for `name` in `dir`, adding `_1`, `_2`, ... to the stem.
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (name, String::new()),
    };
    let mut n = 1;
    loop {
        let candidate = dir.join(format!("{}_{}{}", stem, n, ext));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// An output file staged in its destination directory.
pub struct StagedOutput {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedOutput {
    /// Stage a new timestamped output file with extension `ext` in `dir`.
    pub fn create(dir: &Path, ext: &str) -> Result<Self, SqlCsvError> {
        if !dir.is_dir() {
            return Err(SqlCsvError::Argument(format!(
                "Output directory does not exist: {}",
                dir.display()
            )));
        }

        let target = unique_path(dir, &timestamped_name(Local::now(), ext));
        let tmp = tempfile::Builder::new()
            .prefix(".sql2csv-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(|e| {
                SqlCsvError::Io(format!("Cannot create staging file in {}: {}", dir.display(), e))
            })?;

        Ok(Self { tmp, target })
    }

    /// Path of the temporary staging file.
    pub fn staging_path(&self) -> &Path {
        self.tmp.path()
    }

    /// Flush and move the staged file to its final name.
    pub fn commit(mut self) -> Result<PathBuf, SqlCsvError> {
        self.tmp
            .flush()
            .map_err(|e| SqlCsvError::Io(format!("Cannot flush staging file: {}", e)))?;
        let target = self.target;
        self.tmp.persist_noclobber(&target).map_err(|e| {
            SqlCsvError::Io(format!("Cannot write {}: {}", target.display(), e.error))
        })?;
        Ok(target)
    }
}

impl Write for StagedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tmp.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.tmp.flush()
    }
}
