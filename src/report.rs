use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};

use csv::Writer;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::EpiError;
use crate::network::GroupId;
use crate::simulation::StateCounts;

/// One row of the per-tick group counts report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCountsRow {
    pub tick: u64,
    pub group_id: usize,
    pub group_name: String,
    pub healthy: usize,
    pub infected: usize,
    pub cured: usize,
    pub vaccinated: usize,
    pub deceased: usize,
}

impl GroupCountsRow {
    #[must_use]
    pub fn new(tick: u64, group: GroupId, group_name: &str, counts: StateCounts) -> Self {
        GroupCountsRow {
            tick,
            group_id: group.index(),
            group_name: group_name.to_string(),
            healthy: counts.healthy,
            infected: counts.infected,
            cured: counts.cured,
            vaccinated: counts.vaccinated,
            deceased: counts.deceased,
        }
    }
}

// Checks that the path is valid. Creates the file and all parent directories if
// they do not exist. Returns the file if successful.
fn generate_validate_filepath(path: &Path) -> Result<File, EpiError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("csv") => {
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }
            let file = File::create(path)?;
            Ok(file)
        }
        _ => Err(EpiError::EpiError(
            "Report output files must be CSVs at this time".to_string(),
        )),
    }
}

/// Writes serializable rows to one CSV file, flushing after every row.
pub struct ReportWriter {
    path: PathBuf,
    writer: Writer<File>,
}

impl ReportWriter {
    /// # Errors
    /// Returns [`EpiError`] if `path` does not end in `.csv` or cannot be created.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, EpiError> {
        let path = path.into();
        let file = generate_validate_filepath(&path)?;
        debug!("writing report to {}", path.display());
        Ok(ReportWriter {
            path,
            writer: Writer::from_writer(file),
        })
    }

    /// Write a new row with columns following the fields of `row`.
    ///
    /// # Errors
    /// Returns [`EpiError`] if serialization or the write fails.
    pub fn send<R: Serialize>(&mut self, row: &R) -> Result<(), EpiError> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    #[derive(Serialize, Deserialize)]
    struct SampleReport {
        id: u32,
        value: String,
    }

    #[test]
    fn add_and_send_report() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("sample_report.csv");
        let mut writer = ReportWriter::create(&file_path).unwrap();
        writer
            .send(&SampleReport {
                id: 1,
                value: "Test Value".to_string(),
            })
            .unwrap();
        assert!(file_path.exists(), "CSV file should exist");

        let mut reader = csv::Reader::from_path(file_path).unwrap();
        for result in reader.deserialize() {
            let record: SampleReport = result.unwrap();
            assert_eq!(record.id, 1);
            assert_eq!(record.value, "Test Value");
        }
    }

    #[test]
    fn directory_creation_writing_works() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test-temp").join("group_counts.csv");
        let mut writer = ReportWriter::create(&file_path).unwrap();
        let counts = StateCounts {
            healthy: 3,
            infected: 1,
            ..StateCounts::default()
        };
        writer
            .send(&GroupCountsRow::new(0, GroupId(2), "Kids", counts))
            .unwrap();
        assert_eq!(writer.path(), file_path.as_path());

        let mut reader = csv::Reader::from_path(file_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            [
                "tick",
                "group_id",
                "group_name",
                "healthy",
                "infected",
                "cured",
                "vaccinated",
                "deceased"
            ]
        );
        let rows: Vec<GroupCountsRow> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].group_name, "Kids");
        assert_eq!(rows[0].healthy, 3);
        assert_eq!(rows[0].infected, 1);
    }

    #[test]
    fn only_csvs_allowed() {
        let temp_dir = tempdir().unwrap();
        let result = ReportWriter::create(temp_dir.path().join("sample_report.tsv"));
        assert!(matches!(
            result,
            Err(EpiError::EpiError(ref msg)) if msg == "Report output files must be CSVs at this time"
        ));
    }

    #[test]
    fn multiple_rows_keep_special_characters() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("mult_report_sample_report.csv");
        let mut writer = ReportWriter::create(&file_path).unwrap();
        writer
            .send(&SampleReport {
                id: 1,
                value: "Value,1".to_string(),
            })
            .unwrap();
        writer
            .send(&SampleReport {
                id: 2,
                value: "Value\n2".to_string(),
            })
            .unwrap();

        let mut reader = csv::Reader::from_path(file_path).expect("Failed to open CSV file");
        let records: Vec<SampleReport> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value, "Value,1");
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].value, "Value\n2");
    }
}
