use super::status::{Comparison, FileStatus};
use crate::diff::{self, Hunk};
use crate::language::detect_language;
use serde::Serialize;
use std::fmt;

/// Everything a display needs to show one changed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
    pub hunks: Vec<Hunk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'static str>,
}

impl FileChange {
    /// Parse `diff_text` for the file at `path` whose status is already known
    pub fn new(path: impl Into<String>, status: FileStatus, diff_text: &str) -> Self {
        let path = path.into();
        let language = detect_language(&path);

        FileChange {
            hunks: diff::parse(diff_text),
            path,
            status,
            language,
        }
    }

    /// Build a change from one file's section of `git diff` output.
    ///
    /// Path and status come from the section's header lines; see
    /// [`SectionHeader`].
    pub fn from_section(text: &str) -> Self {
        let header = SectionHeader::read(text);
        Self::new(header.path, header.status, text)
    }

    /// Which snapshot this change was taken against
    pub fn comparison(&self) -> Comparison {
        self.status.comparison()
    }

    /// Total added lines across all hunks
    pub fn additions(&self) -> u32 {
        self.hunks.iter().map(Hunk::additions).sum()
    }

    /// Total removed lines across all hunks
    pub fn deletions(&self) -> u32 {
        self.hunks.iter().map(Hunk::deletions).sum()
    }
}

/// File identity read from the lines before a section's first hunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub path: String,
    pub status: FileStatus,
}

impl SectionHeader {
    /// Read path and status from `diff --git`, mode and `---`/`+++` lines.
    ///
    /// The new-side path wins, then the old-side path, then the `b/` path of
    /// the `diff --git` line. A `/dev/null` side or a new/deleted file mode
    /// marks the file added or deleted; anything else is modified.
    pub fn read(text: &str) -> Self {
        let mut git_path = None;
        let mut old_path = None;
        let mut new_path = None;
        let mut status = FileStatus::Modified;

        for line in text.lines().take_while(|line| !line.starts_with("@@")) {
            if let Some(rest) = line.strip_prefix("diff --git ") {
                git_path = rest
                    .split_once(" b/")
                    .map(|(_, path)| path.to_string());
            } else if line.starts_with("new file mode") {
                status = FileStatus::Added;
            } else if line.starts_with("deleted file mode") {
                status = FileStatus::Deleted;
            } else if let Some(rest) = line.strip_prefix("--- ") {
                match side_path(rest, "a/") {
                    Some(path) => old_path = Some(path),
                    None => status = FileStatus::Added,
                }
            } else if let Some(rest) = line.strip_prefix("+++ ") {
                match side_path(rest, "b/") {
                    Some(path) => new_path = Some(path),
                    None => status = FileStatus::Deleted,
                }
            }
        }

        SectionHeader {
            path: new_path.or(old_path).or(git_path).unwrap_or_default(),
            status,
        }
    }
}

/// Path named by a `---`/`+++` line, or `None` for `/dev/null`
fn side_path(rest: &str, prefix: &str) -> Option<String> {
    // git appends a tab when the path contains spaces
    let rest = rest.trim_end_matches('\t');
    if rest == "/dev/null" {
        return None;
    }
    Some(rest.strip_prefix(prefix).unwrap_or(rest).to_string())
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.path, self.status)?;
        if let Some(language) = self.language {
            write!(f, ", {}", language)?;
        }
        writeln!(
            f,
            ") vs {} +{} -{}",
            self.comparison().revision(),
            self.additions(),
            self.deletions()
        )?;

        write!(f, "{}", diff::format_hunks(&self.hunks))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diff::DiffLine;
    use similar_asserts::assert_eq;

    #[test]
    fn new_detects_language_and_parses() {
        let change = FileChange::new(
            "src/types/index.ts",
            FileStatus::Modified,
            "@@ -1,2 +1,2 @@\n export interface GitFile {\n-  status: string;\n+  status: Status;\n",
        );

        assert_eq!(change.language, Some("typescript"));
        assert_eq!(change.hunks.len(), 1);
        assert_eq!(change.additions(), 1);
        assert_eq!(change.deletions(), 1);
        assert_eq!(change.comparison(), Comparison::Head);
    }

    #[test]
    fn new_with_empty_diff() {
        let change = FileChange::new("notes.txt", FileStatus::Modified, "");
        assert_eq!(change.hunks, vec![]);
        assert_eq!(change.language, None);
    }

    #[test]
    fn read_modified_section() {
        let text = r#"diff --git a/flake.nix b/flake.nix
index abc1234..def5678 100644
--- a/flake.nix
+++ b/flake.nix
@@ -136,0 +137 @@
+      debug = true;
"#;
        assert_eq!(
            SectionHeader::read(text),
            SectionHeader {
                path: "flake.nix".to_string(),
                status: FileStatus::Modified,
            }
        );
    }

    #[test]
    fn read_added_section() {
        let text = r#"diff --git a/src/new.rs b/src/new.rs
new file mode 100644
index 0000000..e69de29
--- /dev/null
+++ b/src/new.rs
@@ -0,0 +1 @@
+fn main() {}
"#;
        assert_eq!(
            SectionHeader::read(text),
            SectionHeader {
                path: "src/new.rs".to_string(),
                status: FileStatus::Added,
            }
        );
    }

    #[test]
    fn read_deleted_section() {
        let text = r#"diff --git a/README.md b/README.md
deleted file mode 100644
index 1234567..0000000
--- a/README.md
+++ /dev/null
@@ -1 +0,0 @@
-# Old Project
"#;
        assert_eq!(
            SectionHeader::read(text),
            SectionHeader {
                path: "README.md".to_string(),
                status: FileStatus::Deleted,
            }
        );
    }

    #[test]
    fn read_ignores_body_lines_that_look_like_headers() {
        let text = "--- a/x.txt\n+++ b/x.txt\n@@ -1 +1 @@\n---- /dev/null\n++++ b/other\n";
        assert_eq!(
            SectionHeader::read(text),
            SectionHeader {
                path: "x.txt".to_string(),
                status: FileStatus::Modified,
            }
        );
    }

    #[test]
    fn read_mode_only_section_uses_git_line() {
        let text = "diff --git a/run.sh b/run.sh\nold mode 100644\nnew mode 100755\n";
        assert_eq!(SectionHeader::read(text).path, "run.sh");
    }

    #[test]
    fn read_headerless_text() {
        assert_eq!(
            SectionHeader::read("+hello\n"),
            SectionHeader {
                path: String::new(),
                status: FileStatus::Modified,
            }
        );
    }

    #[test]
    fn from_section_parses_hunks() {
        let text = "diff --git a/a.py b/a.py\n--- a/a.py\n+++ b/a.py\n@@ -3 +3 @@\n-x = 1\n+x = 2\n";
        let change = FileChange::from_section(text);

        assert_eq!(change.path, "a.py");
        assert_eq!(change.language, Some("python"));
        assert_eq!(
            change.hunks[0].lines,
            vec![DiffLine::removed("x = 1", 3), DiffLine::added("x = 2", 3)]
        );
    }

    #[test]
    fn render_file_change() {
        let change = FileChange::new(
            "README.md",
            FileStatus::Deleted,
            "@@ -1,2 +0,0 @@\n-# Old Project\n-\n",
        );

        insta::assert_snapshot!(change.to_string(), @r"
        README.md (deleted, markdown) vs HEAD +0 -2
        @@ -1,2 +0,0 @@
             1        -# Old Project
             2        -
        ");
    }

    #[test]
    fn serialize_for_display_layer() {
        let change = FileChange::new(
            "hello.rs",
            FileStatus::Added,
            "@@ -0,0 +1 @@\n+fn main() {}\n",
        );

        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            serde_json::json!({
                "path": "hello.rs",
                "status": "added",
                "hunks": [{
                    "old_start": 0,
                    "old_lines": 0,
                    "new_start": 1,
                    "new_lines": 1,
                    "lines": [{
                        "kind": "added",
                        "content": "fn main() {}",
                        "new_line_number": 1
                    }]
                }],
                "language": "rust"
            })
        );
    }
}
