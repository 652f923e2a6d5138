//! Unified diff text to line-numbered hunks.
//!
//! Parsing never fails. Text with hunk headers is split at each header and
//! numbered from the header's start positions; text without any header is
//! rebuilt into a single hunk numbered from 1; anything else yields no hunks.
//!
//! ```
//! use git_review::diff::{DiffLine, parse};
//!
//! let hunks = parse("@@ -1,2 +1,2 @@\n keep\n-old\n+new\n");
//! assert_eq!(hunks.len(), 1);
//! assert_eq!(hunks[0].lines[1], DiffLine::removed("old", 2));
//! assert_eq!(hunks[0].lines[2], DiffLine::added("new", 2));
//! ```

use super::hunk::{Hunk, HunkHeader};

/// A header occurrence and the byte span it covers in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderMatch {
    header: HunkHeader,
    start: usize,
    end: usize,
}

/// Parse the diff text of a single file into its hunks.
///
/// Hunks come back in the order they appear in the text. Stray lines that do
/// not start with `+`, `-` or a space are ignored and do not affect numbering.
pub fn parse(diff_text: &str) -> Vec<Hunk> {
    let headers = scan_headers(diff_text);

    if headers.is_empty() {
        return reconstruct(diff_text);
    }

    log::debug!("found {} hunk header(s)", headers.len());

    headers
        .iter()
        .enumerate()
        .map(|(i, found)| {
            let body_end = headers
                .get(i + 1)
                .map_or(diff_text.len(), |next| next.start);
            let hunk = Hunk::from_header(found.header, &diff_text[found.end..body_end]);
            log::trace!("{} -> {} line(s)", found.header, hunk.lines.len());
            hunk
        })
        .collect()
}

/// Find every hunk header in `text`, wherever it occurs, in order.
///
/// Scanning resumes after the end of each match, so header text is never
/// shared between two matches.
fn scan_headers(text: &str) -> Vec<HeaderMatch> {
    let mut found = Vec::new();
    let mut from = 0;

    while let Some(offset) = text[from..].find("@@ -") {
        let start = from + offset;
        match HunkHeader::parse(&text[start..]) {
            Some((header, len)) => {
                found.push(HeaderMatch {
                    header,
                    start,
                    end: start + len,
                });
                from = start + len;
            }
            // '@' is a single byte, so this stays on a char boundary
            None => from = start + 1,
        }
    }

    found
}

fn reconstruct(diff_text: &str) -> Vec<Hunk> {
    if diff_text.trim().is_empty() {
        return Vec::new();
    }

    log::debug!("no hunk headers found, rebuilding a single hunk");

    Hunk::reconstruct(diff_text).into_iter().collect()
}
