pub use self::entry::{
    AssignmentKind, ImageRef, ProjectEntry, Submission, TIMESTAMP_FORMAT,
};

mod entry;
