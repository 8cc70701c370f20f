use primex_core::{ConditionRecord, Error, FieldValue, Result};
use std::path::{Path, PathBuf};

/// An ordered set of condition records loaded from a CSV file with a
/// header row. Relative asset references inside the records resolve
/// against the directory the table itself lives in.
#[derive(Debug, Clone)]
pub struct ConditionTable {
    records: Vec<ConditionRecord>,
    base_dir: PathBuf,
}

impl ConditionTable {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| table_error(path, e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| table_error(path, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| table_error(path, e))?;
            let fields = headers
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.clone(), FieldValue::new(cell)))
                .collect();
            records.push(ConditionRecord::new(fields));
        }

        if records.is_empty() {
            return Err(Error::Table {
                path: path.to_path_buf(),
                message: "condition table has no records".to_string(),
            });
        }

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { records, base_dir })
    }

    pub fn from_records(records: Vec<ConditionRecord>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            records,
            base_dir: base_dir.into(),
        }
    }

    pub fn records(&self) -> &[ConditionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The directory relative asset paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn table_error(path: &Path, err: csv::Error) -> Error {
    Error::Table {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_table(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_records_in_source_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            dir.path(),
            "primes.csv",
            "forward,prime,backward,neutral\n\
             masks/f1.png,faces/p1.png,masks/b1.png,faces/n1.png\n\
             masks/f2.png,faces/p2.png,masks/b2.png,faces/n2.png\n",
        );

        let table = ConditionTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.base_dir(), dir.path());
        assert_eq!(
            table.records()[0].get("prime").unwrap().as_text(),
            "faces/p1.png"
        );
        assert_eq!(
            table.records()[1].get("neutral").unwrap().as_text(),
            "faces/n2.png"
        );
    }

    #[test]
    fn empty_table_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(dir.path(), "empty.csv", "forward,prime,backward,neutral\n");
        assert!(matches!(
            ConditionTable::load(&path),
            Err(primex_core::Error::Table { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConditionTable::load(&dir.path().join("absent.csv")).is_err());
    }
}
