use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timestamp format used in the backing file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AssignmentKind {
    Individual,
    Group,
}

impl AssignmentKind {
    pub fn is_group(self) -> bool {
        self == AssignmentKind::Group
    }
}

impl fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssignmentKind::Individual => "Individual",
            AssignmentKind::Group => "Group",
        })
    }
}

#[derive(Debug, Error)]
#[error("unknown assignment type: {0}")]
pub struct ParseKindError(String);

impl FromStr for AssignmentKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<AssignmentKind, ParseKindError> {
        if s.eq_ignore_ascii_case("individual") {
            Ok(AssignmentKind::Individual)
        } else if s.eq_ignore_ascii_case("group") {
            Ok(AssignmentKind::Group)
        } else {
            Err(ParseKindError(s.to_owned()))
        }
    }
}

/// Reference to a submitted image, decided once at submission time.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ImageRef {
    #[default]
    None,
    Stored(String),
}

impl ImageRef {
    pub fn as_path(&self) -> Option<&str> {
        match self {
            ImageRef::None => None,
            ImageRef::Stored(path) => Some(path),
        }
    }
}

/// One submitted assignment record. Rows are append-only: an entry is never
/// mutated or deleted once it has been recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectEntry {
    pub name: String,
    pub department: String,
    pub module: String,
    pub kind: AssignmentKind,
    pub assignment: String,
    pub live_link: String,
    pub image: ImageRef,
    /// `None` only for rows written before the field existed.
    pub timestamp: Option<NaiveDateTime>,
}

impl ProjectEntry {
    pub fn group_work(&self) -> bool {
        self.kind.is_group()
    }
}

/// Candidate fields of a submission; the registry assigns the image
/// reference and the timestamp.
#[derive(Clone, Debug)]
pub struct Submission {
    pub name: String,
    pub department: String,
    pub module: String,
    pub kind: AssignmentKind,
    pub assignment: String,
    pub live_link: String,
}

impl Submission {
    /// Names of the required fields left empty, in form order. The
    /// assignment name is the only optional text field.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.department.is_empty() {
            missing.push("department");
        }
        if self.module.is_empty() {
            missing.push("module");
        }
        if self.live_link.is_empty() {
            missing.push("live link");
        }
        missing
    }

    pub fn into_entry(self, image: ImageRef, timestamp: NaiveDateTime) -> ProjectEntry {
        ProjectEntry {
            name: self.name,
            department: self.department,
            module: self.module,
            kind: self.kind,
            assignment: self.assignment,
            live_link: self.live_link,
            image,
            timestamp: Some(timestamp),
        }
    }
}

#[test]
fn test_group_work_follows_kind() {
    let entry = ProjectEntry {
        name: "Ada".into(),
        department: "CS".into(),
        module: "CS101".into(),
        kind: AssignmentKind::Group,
        assignment: "Final Project".into(),
        live_link: "https://example.org".into(),
        image: ImageRef::None,
        timestamp: None,
    };
    assert!(entry.group_work());
    let entry = ProjectEntry {
        kind: AssignmentKind::Individual,
        ..entry
    };
    assert!(!entry.group_work());
}

#[test]
fn test_parse_kind() {
    assert_eq!(
        "Individual".parse::<AssignmentKind>().unwrap(),
        AssignmentKind::Individual
    );
    assert_eq!(
        "group".parse::<AssignmentKind>().unwrap(),
        AssignmentKind::Group
    );
    assert!("Solo".parse::<AssignmentKind>().is_err());
}

#[test]
fn test_missing_fields() {
    let submission = Submission {
        name: "Ada".into(),
        department: String::new(),
        module: "CS101".into(),
        kind: AssignmentKind::Individual,
        assignment: String::new(),
        live_link: String::new(),
    };
    assert_eq!(submission.missing_fields(), vec!["department", "live link"]);
}
