use std::path::Path;

/// Extension to language tag, matched case-insensitively
const EXTENSIONS: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("mts", "typescript"),
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("py", "python"),
    ("go", "go"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("swift", "swift"),
    ("c", "c"),
    ("h", "c"),
    ("cc", "cpp"),
    ("cpp", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("rb", "ruby"),
    ("php", "php"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("zsh", "bash"),
    ("nix", "nix"),
    ("lua", "lua"),
    ("sql", "sql"),
    ("html", "html"),
    ("css", "css"),
    ("scss", "scss"),
    ("json", "json"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("xml", "xml"),
    ("md", "markdown"),
    ("markdown", "markdown"),
];

/// Whole file names that identify a language without an extension
const FILE_NAMES: &[(&str, &str)] = &[
    ("Makefile", "makefile"),
    ("GNUmakefile", "makefile"),
    ("Dockerfile", "dockerfile"),
];

/// Detect a file's language from its name.
///
/// ```
/// use git_review::language::detect_language;
///
/// assert_eq!(detect_language("src/main.rs"), Some("rust"));
/// assert_eq!(detect_language("LICENSE"), None);
/// ```
pub fn detect_language(path: &str) -> Option<&'static str> {
    let path = Path::new(path);
    let file_name = path.file_name()?.to_str()?;

    if let Some((_, language)) = FILE_NAMES.iter().find(|(name, _)| *name == file_name) {
        return Some(*language);
    }

    let extension = path.extension()?.to_str()?;
    EXTENSIONS
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, language)| *language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_by_extension() {
        assert_eq!(detect_language("src/components/Layout.tsx"), Some("typescript"));
        assert_eq!(detect_language("flake.nix"), Some("nix"));
        assert_eq!(detect_language("README.md"), Some("markdown"));
    }

    #[test]
    fn detect_ignores_extension_case() {
        assert_eq!(detect_language("LEGACY.PY"), Some("python"));
    }

    #[test]
    fn detect_by_file_name() {
        assert_eq!(detect_language("docker/Dockerfile"), Some("dockerfile"));
        assert_eq!(detect_language("Makefile"), Some("makefile"));
    }

    #[test]
    fn detect_unknown() {
        assert_eq!(detect_language("LICENSE"), None);
        assert_eq!(detect_language("archive.tar.zst"), None);
        assert_eq!(detect_language(".gitignore"), None);
        assert_eq!(detect_language(""), None);
    }
}
