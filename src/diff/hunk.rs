use super::line::{DiffLine, LineCursor, LineKind};
use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{char, u32 as number},
    combinator::opt,
    sequence::{delimited, preceded},
};
use serde::Serialize;
use std::fmt;

/// Positions and counts declared by a `@@ -a,b +c,d @@` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
}

impl HunkHeader {
    /// Parse a header at the very start of `text`.
    ///
    /// Returns the header and the number of bytes it spans, so callers can
    /// locate the body that follows. Trailing section context after the
    /// closing `@@` is not part of the match.
    pub fn parse(text: &str) -> Option<(Self, usize)> {
        let (rest, header) = hunk_header(text).ok()?;
        Some((header, text.len() - rest.len()))
    }
}

/// `start[,count]` where an omitted count means a single line
fn range(input: &str) -> IResult<&str, (u32, u32)> {
    (number, opt(preceded(char(','), number)))
        .map(|(start, count)| (start, count.unwrap_or(1)))
        .parse(input)
}

fn hunk_header(input: &str) -> IResult<&str, HunkHeader> {
    (
        preceded(tag("@@ -"), range),
        delimited(tag(" +"), range, tag(" @@")),
    )
        .map(
            |((old_start, old_lines), (new_start, new_lines))| HunkHeader {
                old_start,
                old_lines,
                new_start,
                new_lines,
            },
        )
        .parse(input)
}

impl fmt::Display for HunkHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(start: u32, count: u32) -> String {
            match count {
                1 => format!("{}", start),
                n => format!("{},{}", start, n),
            }
        }

        write!(
            f,
            "@@ -{} +{} @@",
            side(self.old_start, self.old_lines),
            side(self.new_start, self.new_lines)
        )
    }
}

/// One contiguous change region of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    pub lines: Vec<DiffLine>,
}

/// Metadata prefixes ignored when rebuilding a hunk without headers
const METADATA_PREFIXES: [&str; 4] = ["@@", "+++", "---", "index "];

impl Hunk {
    /// Build a hunk from a parsed header and the body text that followed it.
    ///
    /// The first line of `body` is the rest of the header line and is dropped.
    /// Declared counts are kept as-is even when the body disagrees with them.
    pub fn from_header(header: HunkHeader, body: &str) -> Self {
        let mut cursor = LineCursor::new(header.old_start, header.new_start);
        let lines = cursor.walk(body.lines().skip(1));

        Hunk {
            old_start: header.old_start,
            old_lines: header.old_lines,
            new_start: header.new_start,
            new_lines: header.new_lines,
            lines,
        }
    }

    /// Rebuild a single hunk from diff text that has no usable headers.
    ///
    /// Numbering starts at 1 on both sides and the counts are taken from the
    /// classified lines. Returns `None` when nothing classifies.
    pub fn reconstruct(text: &str) -> Option<Self> {
        let mut cursor = LineCursor::new(1, 1);
        let lines = cursor.walk(text.lines().filter(|line| {
            !METADATA_PREFIXES
                .iter()
                .any(|prefix| line.starts_with(prefix))
        }));

        if lines.is_empty() {
            return None;
        }

        let old_lines = count(&lines, |kind| kind != LineKind::Added);
        let new_lines = count(&lines, |kind| kind != LineKind::Removed);

        Some(Hunk {
            old_start: 1,
            old_lines,
            new_start: 1,
            new_lines,
            lines,
        })
    }

    /// The positions and counts this hunk declares
    pub fn header(&self) -> HunkHeader {
        HunkHeader {
            old_start: self.old_start,
            old_lines: self.old_lines,
            new_start: self.new_start,
            new_lines: self.new_lines,
        }
    }

    /// Number of added lines
    pub fn additions(&self) -> u32 {
        count(&self.lines, |kind| kind == LineKind::Added)
    }

    /// Number of removed lines
    pub fn deletions(&self) -> u32 {
        count(&self.lines, |kind| kind == LineKind::Removed)
    }
}

fn count(lines: &[DiffLine], mut matches: impl FnMut(LineKind) -> bool) -> u32 {
    lines.iter().filter(|line| matches(line.kind)).count() as u32
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;

        for line in &self.lines {
            writeln!(f, "{}{}", line.marker(), line.content)?;
        }

        Ok(())
    }
}
