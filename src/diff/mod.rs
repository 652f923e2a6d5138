pub mod hunk;
pub mod line;
pub mod parse;

pub use hunk::{Hunk, HunkHeader};
pub use line::{DiffLine, LineCursor, LineKind};
pub use parse::parse;

/// Format hunks for display with explicit old/new line numbers
///
/// Example output:
/// ```text
/// @@ -1,2 +1,3 @@
///      1      1  context
///      2        -old line
///             2 +new line
/// ```
pub fn format_hunks(hunks: &[Hunk]) -> String {
    let mut result = String::new();

    for hunk in hunks {
        if !result.is_empty() {
            result.push('\n');
        }

        result.push_str(&hunk.header().to_string());
        result.push('\n');

        for line in &hunk.lines {
            result.push_str(&format!(
                "{:>6} {:>6} {}{}\n",
                number(line.old_line_number),
                number(line.new_line_number),
                line.marker(),
                line.content
            ));
        }
    }

    result
}

fn number(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_single_hunk() {
        let hunks = parse("@@ -1,2 +1,3 @@\n context\n-old line\n+new line\n+extra line\n");

        insta::assert_snapshot!(format_hunks(&hunks), @r"
        @@ -1,2 +1,3 @@
             1      1  context
             2        -old line
                    2 +new line
                    3 +extra line
        ");
    }

    #[test]
    fn format_separates_hunks() {
        let hunks = parse("@@ -136,0 +137 @@\n+debug = true;\n@@ -140,0 +142 @@\n+./home.nix\n");

        insta::assert_snapshot!(format_hunks(&hunks), @r"
        @@ -136,0 +137 @@
                  137 +debug = true;

        @@ -140,0 +142 @@
                  142 +./home.nix
        ");
    }

    #[test]
    fn format_nothing() {
        assert_eq!(format_hunks(&[]), "");
    }
}
