pub mod file;
pub mod set;
pub mod status;

pub use file::{FileChange, SectionHeader};
pub use set::Changeset;
pub use status::{Comparison, EMPTY_TREE, FileStatus, StatusError};
