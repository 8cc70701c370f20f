use primex_core::{Error, ResponseRecord, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// The append-only session output: one CSV file, header written at
/// creation, one row per completed trial or questionnaire, flushed after
/// every append. Rows are never rewritten or reordered.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    writer: csv::Writer<File>,
    columns: Vec<String>,
    constants: Vec<(String, String)>,
    rows: usize,
}

impl Ledger {
    pub fn create(path: &Path, columns: &[&str]) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_writer(File::create(path)?);
        writer
            .write_record(columns)
            .and_then(|()| writer.flush().map_err(Into::into))
            .map_err(|e| ledger_error(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            constants: Vec::new(),
            rows: 0,
        })
    }

    /// Values stamped into every row, e.g. the subject intake fields.
    pub fn with_constants(mut self, constants: Vec<(String, String)>) -> Self {
        self.constants = constants;
        self
    }

    pub fn append(&mut self, record: &ResponseRecord) -> Result<()> {
        let row: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                record.cell(column).unwrap_or_else(|| {
                    self.constants
                        .iter()
                        .find(|(name, _)| name == column)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default()
                })
            })
            .collect();

        self.writer
            .write_record(&row)
            .and_then(|()| self.writer.flush().map_err(Into::into))
            .map_err(|e| ledger_error(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// The write cursor: how many rows have been appended so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ledger_error(path: &Path, err: csv::Error) -> Error {
    Error::Table {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
