use super::file::FileChange;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;
use std::thread;

/// Every file change found in one `git diff` run, in output order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Changeset {
    pub files: Vec<FileChange>,
}

impl Changeset {
    /// Parse complete, possibly multi-file, `git diff` output.
    ///
    /// Files are parsed on worker threads and returned in the order they
    /// appear in `text`.
    pub fn parse(text: &str) -> Self {
        let sections = split_sections(text);
        log::debug!("parsing {} file section(s)", sections.len());

        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let chunk_size = sections.len().div_ceil(workers).max(1);

        let files = thread::scope(|scope| {
            let handles: Vec<_> = sections
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|section| FileChange::from_section(section))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        Changeset { files }
    }

    /// Find a file by path
    pub fn file(&self, path: &str) -> Option<&FileChange> {
        self.files.iter().find(|file| file.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Split `git diff` output at each `diff --git` line.
///
/// Text before the first such line is dropped. Text with no `diff --git`
/// line at all is kept whole as a single section.
fn split_sections(text: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.starts_with("diff --git ") {
            starts.push(offset);
        }
        offset += line.len();
    }

    if starts.is_empty() {
        return if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![text]
        };
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, file) in self.files.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", file)?;
        }
        Ok(())
    }
}
