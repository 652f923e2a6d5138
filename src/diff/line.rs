use serde::Serialize;

/// Which side(s) of the diff a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Present only in the new version
    Added,
    /// Present only in the old version
    Removed,
    /// Unchanged, present in both versions
    Context,
}

impl LineKind {
    /// Classify a raw hunk body line by its leading marker.
    ///
    /// Returns the kind and the content with the marker stripped, or `None`
    /// for blank lines and anything not starting with `+`, `-` or a space.
    pub fn classify(line: &str) -> Option<(Self, &str)> {
        if let Some(content) = line.strip_prefix('+') {
            Some((LineKind::Added, content))
        } else if let Some(content) = line.strip_prefix('-') {
            Some((LineKind::Removed, content))
        } else {
            line.strip_prefix(' ')
                .map(|content| (LineKind::Context, content))
        }
    }

    /// Marker character used in unified diff output
    pub fn marker(self) -> char {
        match self {
            LineKind::Added => '+',
            LineKind::Removed => '-',
            LineKind::Context => ' ',
        }
    }
}

/// A single classified, line-numbered line inside a hunk.
///
/// Added lines carry only a new-side number, removed lines only an old-side
/// number, context lines both. Use the constructors to keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    /// Line text without its marker; may be empty
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line_number: Option<u32>,
}

impl DiffLine {
    pub fn added(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Added,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new_line),
        }
    }

    pub fn removed(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Removed,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: None,
        }
    }

    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: Some(new_line),
        }
    }

    /// Marker character for this line's kind
    pub fn marker(&self) -> char {
        self.kind.marker()
    }
}

/// Running old/new line counters while walking a hunk body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCursor {
    pub old: u32,
    pub new: u32,
}

impl LineCursor {
    pub fn new(old: u32, new: u32) -> Self {
        Self { old, new }
    }

    /// Number a line of the given kind and advance the counter(s) for its side.
    ///
    /// Counters advance unconditionally, even past the range a header declared.
    pub fn stamp(&mut self, kind: LineKind, content: &str) -> DiffLine {
        let line = match kind {
            LineKind::Added => DiffLine::added(content, self.new),
            LineKind::Removed => DiffLine::removed(content, self.old),
            LineKind::Context => DiffLine::context(content, self.old, self.new),
        };

        if kind != LineKind::Added {
            self.old = self.old.saturating_add(1);
        }
        if kind != LineKind::Removed {
            self.new = self.new.saturating_add(1);
        }

        line
    }

    /// Classify and number every marker line in `lines`, skipping the rest
    pub fn walk<'a, I>(&mut self, lines: I) -> Vec<DiffLine>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .filter_map(LineKind::classify)
            .map(|(kind, content)| self.stamp(kind, content))
            .collect()
    }
}
