use error_set::error_set;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub mod change;
pub mod diff;
pub mod language;

pub use change::{Changeset, Comparison, FileChange, FileStatus, StatusError};
pub use diff::{DiffLine, Hunk, LineKind, parse};

error_set! {
    /// Top-level error for git-review operations
    ReviewError := {
        #[display("Failed to write output: {message}")]
        OutputFailed { message: String },
        StatusError(StatusError),
    } || InputError

    /// Errors from obtaining diff text
    InputError := {
        #[display("Could not read changes from {origin}: {message}")]
        ReadFailed { origin: String, message: String },
        #[display("Invalid UTF-8 in changes from {origin}: {message}")]
        InvalidUtf8 { origin: String, message: String },
    }
}

/// Diff text source: a file, or stdin when no path (or `-`) is given
pub struct DiffInput<'a> {
    path: Option<&'a Path>,
}

impl<'a> DiffInput<'a> {
    /// Create an input reading from `path`, or stdin for `None` / `-`
    pub fn new(path: Option<&'a Path>) -> Self {
        Self {
            path: path.filter(|p| *p != Path::new("-")),
        }
    }

    /// Human-readable name of the source for messages
    pub fn origin(&self) -> String {
        match self.path {
            Some(path) => path.display().to_string(),
            None => "stdin".to_string(),
        }
    }

    /// Read the whole diff text
    pub fn read(&self) -> Result<String, InputError> {
        let bytes = match self.path {
            Some(path) => fs::read(path),
            None => {
                let mut buf = Vec::new();
                io::stdin().read_to_end(&mut buf).map(|_| buf)
            }
        }
        .map_err(|e| InputError::ReadFailed {
            origin: self.origin(),
            message: e.to_string(),
        })?;

        String::from_utf8(bytes).map_err(|e| InputError::InvalidUtf8 {
            origin: self.origin(),
            message: e.to_string(),
        })
    }

    /// Read one file's diff and parse it into a change record
    ///
    /// Without an explicit `path`, the file's path is taken from the diff's
    /// own `---`/`+++` lines.
    ///
    /// # Examples
    /// ```no_run
    /// # use git_review::{DiffInput, FileStatus};
    /// # use std::path::Path;
    /// let input = DiffInput::new(Some(Path::new("layout.diff")));
    /// let change = input.file_change(None, FileStatus::Added).unwrap();
    /// println!("{} has {} hunks", change.path, change.hunks.len());
    /// ```
    pub fn file_change(
        &self,
        path: Option<String>,
        status: FileStatus,
    ) -> Result<FileChange, InputError> {
        let text = self.read()?;
        let path = path.unwrap_or_else(|| change::SectionHeader::read(&text).path);
        Ok(FileChange::new(path, status, &text))
    }

    /// Read complete `git diff` output and parse every file in it
    pub fn changeset(&self) -> Result<Changeset, InputError> {
        Ok(Changeset::parse(&self.read()?))
    }
}
