use crate::config::Config;
use crate::images::{ImageStore, Upload};
use crate::model::{ImageRef, ProjectEntry, Submission};
use crate::store::{CsvStore, StoreError};
use chrono::{Local, NaiveDateTime};
use eyre::{Result, WrapErr};
use std::cmp::Reverse;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("required fields are missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{name} already submitted \"{assignment}\" for module {module}")]
    Duplicate {
        name: String,
        module: String,
        assignment: String,
    },
    #[error("cannot persist submission")]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, Default)]
pub struct Filter {
    pub department: Option<String>,
    pub module: Option<String>,
    pub group_only: bool,
}

/// The project table and its backing file. The in-memory copy is rebuilt
/// from the file at load time and after every successful write.
pub struct Registry {
    entries: Vec<ProjectEntry>,
    store: CsvStore,
    images: ImageStore,
}

impl Registry {
    pub fn load(config: &Config) -> Result<Registry> {
        let store = CsvStore::new(&config.data_file);
        let entries = store.load().wrap_err("cannot load project table")?;
        Ok(Registry {
            entries,
            store,
            images: ImageStore::new(&config.image_dir),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a submission: required fields must be filled and the
    /// (name, module, assignment name) triple must be new. An image that
    /// cannot be stored only costs the entry its image, not the
    /// submission itself.
    pub fn submit(
        &mut self,
        submission: Submission,
        image: Option<Upload>,
    ) -> Result<(), SubmitError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(SubmitError::MissingFields(missing));
        }
        if self.entries.iter().any(|e| {
            e.name == submission.name
                && e.module == submission.module
                && e.assignment == submission.assignment
        }) {
            return Err(SubmitError::Duplicate {
                name: submission.name,
                module: submission.module,
                assignment: submission.assignment,
            });
        }
        let image = match image {
            Some(upload) => match self.images.store(&upload) {
                Ok(path) => ImageRef::Stored(path),
                Err(err) => {
                    warn!(
                        file = %upload.file_name,
                        %err,
                        "could not store uploaded image, submitting without one",
                    );
                    ImageRef::None
                }
            },
            None => ImageRef::None,
        };
        let entry = submission.into_entry(image, Local::now().naive_local());
        self.entries.push(entry);
        self.store.save(&self.entries)?;
        self.entries = self.store.load()?;
        Ok(())
    }

    /// The `min(n, len)` most recent entries, most recent first.
    pub fn latest(&self, n: usize) -> Vec<&ProjectEntry> {
        let mut entries: Vec<&ProjectEntry> = self.entries.iter().collect();
        sort_most_recent_first(&mut entries);
        entries.truncate(n);
        entries
    }

    /// Entries matching the filter exactly, most recent first.
    pub fn filter(&self, filter: &Filter) -> Vec<&ProjectEntry> {
        let mut entries: Vec<&ProjectEntry> = self
            .entries
            .iter()
            .filter(|e| {
                filter
                    .department
                    .as_ref()
                    .map_or(true, |department| e.department == *department)
                    && filter
                        .module
                        .as_ref()
                        .map_or(true, |module| e.module == *module)
                    && (!filter.group_only || e.group_work())
            })
            .collect();
        sort_most_recent_first(&mut entries);
        entries
    }

    pub fn departments(&self) -> Vec<&str> {
        unique_values(self.entries.iter().map(|e| e.department.as_str()))
    }

    pub fn modules(&self) -> Vec<&str> {
        unique_values(self.entries.iter().map(|e| e.module.as_str()))
    }
}

// Rows written before the timestamp existed sort as oldest; the stable
// sort keeps their insertion order.
fn sort_most_recent_first(entries: &mut [&ProjectEntry]) {
    entries.sort_by_key(|e| Reverse(e.timestamp.unwrap_or(NaiveDateTime::MIN)));
}

fn unique_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut values: Vec<&str> = values.collect();
    values.sort_unstable();
    values.dedup();
    values
}
