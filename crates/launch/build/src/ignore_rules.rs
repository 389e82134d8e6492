//! `.launchignore` rules
//!
//! Patterns use gitignore syntax: `*`, `?` and `**` wildcards, a leading
//! `/` anchors at the source root, a trailing `/` matches directories only
//! and `!` re-includes something an earlier pattern excluded. A matching
//! directory excludes everything below it. `.git` is always excluded.

use std::io;
use std::path::{Component, Path};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use launch_deployment::BuildError;

/// Ignore file read from the root of the source directory.
pub const IGNORE_FILE: &str = ".launchignore";

/// Names excluded regardless of the ignore file.
const ALWAYS_IGNORED: &[&str] = &[".git"];

/// Compiled ignore patterns for one source directory
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }
}

impl IgnoreRules {
    /// Compile `contents` as the ignore file of `root`.
    pub fn parse(root: &Path, contents: &str) -> Result<Self, BuildError> {
        let source = root.join(IGNORE_FILE);
        let mut builder = GitignoreBuilder::new(root);

        for (number, line) in contents.lines().enumerate() {
            builder
                .add_line(Some(source.clone()), line)
                .map_err(|e| BuildError::Package {
                    path: source.clone(),
                    reason: format!("line {}: {}", number + 1, e),
                })?;
        }

        let matcher = builder.build().map_err(|e| BuildError::Package {
            path: source.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { matcher })
    }

    /// Read `IGNORE_FILE` from `dir`; a missing file means no extra rules.
    pub fn load(dir: &Path) -> Result<Self, BuildError> {
        match std::fs::read_to_string(dir.join(IGNORE_FILE)) {
            Ok(contents) => Self::parse(dir, &contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of patterns, whitelist lines included.
    pub fn len(&self) -> usize {
        self.matcher.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// Is `relative` (a path below the source root) excluded?
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        if relative.as_os_str().is_empty() {
            return false;
        }
        let always_ignored = relative.components().any(|c| match c {
            Component::Normal(name) => ALWAYS_IGNORED.iter().any(|n| name == *n),
            _ => false,
        });
        if always_ignored {
            return true;
        }

        self.matcher
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(contents: &str) -> IgnoreRules {
        IgnoreRules::parse(Path::new("/src/app"), contents).unwrap()
    }

    #[test]
    fn test_git_is_always_ignored() {
        let rules = IgnoreRules::default();
        assert!(rules.is_ignored(Path::new(".git"), true));
        assert!(rules.is_ignored(Path::new(".git/HEAD"), false));
        assert!(rules.is_ignored(Path::new("vendor/lib/.git/config"), false));
        assert!(!rules.is_ignored(Path::new(".github/workflows/ci.yml"), false));
    }

    #[test]
    fn test_negation_cannot_bring_back_git() {
        let rules = rules("!.git\n!.git/**\n");
        assert!(rules.is_ignored(Path::new(".git/config"), false));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let rules = rules("# build output\n\ntarget\n  \n");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_bare_name_matches_at_any_depth() {
        let rules = rules("node_modules/");
        assert!(rules.is_ignored(Path::new("node_modules"), true));
        assert!(rules.is_ignored(Path::new("web/node_modules/react/index.js"), false));
        assert!(!rules.is_ignored(Path::new("web/src/app.js"), false));
    }

    #[test]
    fn test_trailing_slash_matches_directories_only() {
        let rules = rules("cache/");
        assert!(rules.is_ignored(Path::new("cache"), true));
        assert!(!rules.is_ignored(Path::new("cache"), false));
    }

    #[test]
    fn test_anchored_pattern_only_matches_from_root() {
        let rules = rules("/tmp\nconfig/local.toml");
        assert!(rules.is_ignored(Path::new("tmp/cache"), false));
        assert!(!rules.is_ignored(Path::new("src/tmp"), true));
        assert!(rules.is_ignored(Path::new("config/local.toml"), false));
        assert!(!rules.is_ignored(Path::new("config/prod.toml"), false));
    }

    #[test]
    fn test_double_star_spans_directories() {
        let rules = rules("**/*.log\ndocs/**/draft.md");
        assert!(rules.is_ignored(Path::new("debug.log"), false));
        assert!(rules.is_ignored(Path::new("a/b/debug.log"), false));
        assert!(rules.is_ignored(Path::new("docs/guide/v2/draft.md"), false));
        assert!(!rules.is_ignored(Path::new("guide/draft.md"), false));
    }

    #[test]
    fn test_negation_reincludes_a_path() {
        let rules = rules("*.log\n!keep.log\n");
        assert!(rules.is_ignored(Path::new("debug.log"), false));
        assert!(!rules.is_ignored(Path::new("keep.log"), false));
        assert!(!rules.is_ignored(Path::new("logs/keep.log"), false));
    }

    #[test]
    fn test_single_segment_wildcards() {
        let rules = rules("build-?");
        assert!(rules.is_ignored(Path::new("build-1/out"), false));
        assert!(!rules.is_ignored(Path::new("build-12"), true));
    }

    #[test]
    fn test_invalid_pattern_names_the_line() {
        let err = IgnoreRules::parse(Path::new("/src/app"), "target\nsrc/[z-a].rs\n")
            .unwrap_err();
        match err {
            BuildError::Package { path, reason } => {
                assert_eq!(path, Path::new("/src/app").join(IGNORE_FILE));
                assert!(reason.starts_with("line 2:"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_ignore_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let rules = IgnoreRules::load(dir.path()).unwrap();
        assert!(rules.is_empty());
    }
}
