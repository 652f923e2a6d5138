use error_set::error_set;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

error_set! {
    /// Errors from reading a file status tag
    StatusError := {
        /// Tag is not one of the known statuses
        #[display("Unknown file status '{value}': expected added, modified or deleted")]
        Unknown { value: String },
    }
}

/// How a file changed between the compared snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
}

/// What a file's diff must be taken against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparison {
    /// No prior content: every line shows as added
    EmptyTree,
    /// The last committed snapshot
    Head,
}

/// Object id of git's empty tree
pub const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

impl FileStatus {
    /// Which snapshot this file's diff compares against.
    ///
    /// Added files have nothing committed to compare with, so they diff
    /// against the empty tree; everything else diffs against `HEAD`.
    pub fn comparison(self) -> Comparison {
        match self {
            FileStatus::Added => Comparison::EmptyTree,
            FileStatus::Modified | FileStatus::Deleted => Comparison::Head,
        }
    }
}

impl Comparison {
    /// Revision spelling accepted by `git diff`
    pub fn revision(self) -> &'static str {
        match self {
            Comparison::EmptyTree => EMPTY_TREE,
            Comparison::Head => "HEAD",
        }
    }
}

impl FromStr for FileStatus {
    type Err = StatusError;

    /// Accepts the status word or its porcelain letter (`A`, `M`, `D`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "added" | "a" => Ok(FileStatus::Added),
            "modified" | "m" => Ok(FileStatus::Modified),
            "deleted" | "d" => Ok(FileStatus::Deleted),
            _ => Err(StatusError::Unknown {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
        })
    }
}
