use crate::model::{AssignmentKind, ImageRef, ProjectEntry, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access backing file")]
    Io(#[from] io::Error),
    #[error("cannot read or write table rows")]
    Csv(#[from] csv::Error),
}

/// One row of the backing file, with the column names of the original
/// table. `Group Work` is written from the derived value and ignored on
/// read, since the assignment type column is authoritative. Legacy files
/// may lack the `Timestamp` column entirely.
#[derive(Debug, Deserialize, Serialize)]
struct Record {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Department")]
    department: String,
    #[serde(rename = "Module")]
    module: String,
    #[serde(rename = "Assignment Type")]
    kind: AssignmentKind,
    #[serde(rename = "Assignment Name", default)]
    assignment: String,
    #[serde(rename = "Live Link", default)]
    live_link: String,
    #[serde(rename = "Image", default)]
    image: String,
    #[serde(rename = "Group Work", default)]
    group_work: String,
    #[serde(rename = "Timestamp", default)]
    timestamp: String,
}

impl Record {
    fn from_entry(entry: &ProjectEntry) -> Record {
        Record {
            name: entry.name.clone(),
            department: entry.department.clone(),
            module: entry.module.clone(),
            kind: entry.kind,
            assignment: entry.assignment.clone(),
            live_link: entry.live_link.clone(),
            image: entry.image.as_path().unwrap_or_default().to_owned(),
            group_work: entry.group_work().to_string(),
            timestamp: entry
                .timestamp
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    fn into_entry(self) -> ProjectEntry {
        ProjectEntry {
            name: self.name,
            department: self.department,
            module: self.module,
            kind: self.kind,
            assignment: self.assignment,
            live_link: self.live_link,
            image: if self.image.is_empty() {
                ImageRef::None
            } else {
                ImageRef::Stored(self.image)
            },
            timestamp: NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok(),
        }
    }
}

/// The flat file behind the project table.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> CsvStore {
        CsvStore { path: path.into() }
    }

    /// Reads the whole table; an absent file is an empty table.
    pub fn load(&self) -> Result<Vec<ProjectEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut entries = Vec::new();
        for record in reader.deserialize::<Record>() {
            entries.push(record?.into_entry());
        }
        debug!(rows = entries.len(), "loaded backing file");
        Ok(entries)
    }

    /// Rewrites the whole table; the overwrite is not atomic.
    pub fn save(&self, entries: &[ProjectEntry]) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        for entry in entries {
            writer.serialize(Record::from_entry(entry))?;
        }
        writer.flush()?;
        debug!(rows = entries.len(), "rewrote backing file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(name: &str, timestamp: Option<NaiveDateTime>) -> ProjectEntry {
        ProjectEntry {
            name: name.to_owned(),
            department: "CS".to_owned(),
            module: "CS101".to_owned(),
            kind: AssignmentKind::Individual,
            assignment: "Assignment #1".to_owned(),
            live_link: "https://example.org".to_owned(),
            image: ImageRef::None,
            timestamp,
        }
    }

    fn at(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 5)
            .unwrap()
            .and_hms_opt(10, 0, second)
            .unwrap()
    }

    #[test]
    fn absent_file_is_an_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("projects.csv"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn table_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("projects.csv"));
        let entries = vec![
            entry("Ada", Some(at(1))),
            ProjectEntry {
                kind: AssignmentKind::Group,
                image: ImageRef::Stored("uploads/shot.png".to_owned()),
                ..entry("Grace", Some(at(2)))
            },
        ];
        store.save(&entries).unwrap();
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, entries);
        assert_eq!(
            reloaded[1].image.as_path(),
            Some("uploads/shot.png")
        );
    }

    #[test]
    fn legacy_rows_without_timestamp_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");
        // Pre-timestamp file, complete with the Python writer's booleans.
        std::fs::write(
            &path,
            "Name,Department,Module,Assignment Type,Assignment Name,Live Link,Image,Group Work\n\
             Ada,CS,CS101,Group,Final Project,https://example.org,,True\n",
        )
        .unwrap();
        let entries = CsvStore::new(&path).load().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, None);
        assert!(entries[0].group_work());
        assert_eq!(entries[0].image, ImageRef::None);
    }

    #[test]
    fn group_work_column_holds_the_derived_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");
        let store = CsvStore::new(&path);
        store
            .save(&[ProjectEntry {
                kind: AssignmentKind::Group,
                ..entry("Ada", Some(at(0)))
            }])
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Department,Module,Assignment Type,Assignment Name,Live Link,Image,Group Work,Timestamp"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Ada,CS,CS101,Group,Assignment #1,https://example.org,,true,2026-08-05 10:00:00"
        );
    }
}
