// ============================================================================
// colors.rs — Rewrites hard-coded Color(0xAARRGGBB) literals to theme constants
// ============================================================================
//
// Matching is textual. A literal inside a comment or string is rewritten just
// like live code. Files are only written back when something changed.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use regex::{NoExpand, Regex};
use walkdir::WalkDir;

use crate::config::ColorConfig;
use crate::error::RewriteError;
use crate::report::Reporter;

pub const DEFAULT_COLOR_MAPPING: [(&str, &str); 18] = [
    ("0xFF4A90E2", "AppTheme.primaryBlue"),
    ("0xFFD4EFFB", "AppTheme.lightBlue"),
    ("0xFF4A4A4A", "AppTheme.textPrimary"),
    ("0xFF29B6F6", "AppTheme.secondaryBlue"),
    ("0xFFBFE6FB", "AppTheme.lightBlueBorder"),
    ("0xFF2F6DF2", "AppTheme.darkBlue"),
    ("0xFF62CEF5", "AppTheme.lightCyan"),
    ("0xFFA855F7", "AppTheme.accentPurple"),
    ("0xFFEC4899", "AppTheme.accentPink"),
    ("0xFFEF4444", "AppTheme.accentRed"),
    ("0xFF22C55E", "AppTheme.successGreen"),
    ("0xFF8E44AD", "AppTheme.primaryPurple"),
    ("0xFFF97316", "AppTheme.accentOrange"),
    ("0xFF6366F1", "AppTheme.accentIndigo"),
    ("0xFF06B6D4", "AppTheme.accentCyan"),
    ("0xFF8E8E93", "AppTheme.textSecondary"),
    ("0xFFF2F6FA", "AppTheme.backgroundLight"),
    ("0xFFB0B0B0", "AppTheme.dividerColor"),
];

struct ColorRule {
    call: String,
    constant: String,
    pattern: Regex,
}

/// Result of rewriting one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub substitutions: usize,
    pub imports_added: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Modified { substitutions: usize, imports_added: usize },
    Unchanged,
}

#[derive(Debug, Default)]
pub struct RewriteReport {
    pub scanned: usize,
    pub modified: Vec<PathBuf>,
    pub unchanged: usize,
    pub failed: usize,
    pub substitutions: usize,
}

pub struct ColorRewriter {
    rules: Vec<ColorRule>,
    imports: Vec<String>,
    theme_marker: String,
    extension: String,
    excluded_prefix: String,
}

impl ColorRewriter {
    pub fn new(config: &ColorConfig) -> Result<Self, RewriteError> {
        let rules = config
            .mapping
            .iter()
            .map(|(literal, constant)| {
                let call = format!("Color({})", literal);
                let pattern = Regex::new(&regex::escape(&call)).map_err(|source| RewriteError::Pattern {
                    literal: literal.clone(),
                    source,
                })?;
                Ok(ColorRule {
                    call,
                    constant: constant.clone(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, RewriteError>>()?;

        Ok(Self {
            rules,
            imports: config.imports.clone(),
            theme_marker: config.theme_marker.to_lowercase(),
            extension: config.extension.clone(),
            excluded_prefix: config.excluded_prefix.clone(),
        })
    }

    /// True for files with the configured extension that are not the theme
    /// definition itself.
    pub fn is_eligible(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let extension_matches = path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str());
        extension_matches && !name.starts_with(&self.excluded_prefix)
    }

    /// Returns `None` when the text needs no change.
    pub fn rewrite_text(&self, content: &str) -> Option<Rewrite> {
        let mut text = content.to_string();
        let mut modified = false;
        let mut imports_added = 0;

        let has_literal = self.rules.iter().any(|r| text.contains(&r.call));
        if has_literal && !text.to_lowercase().contains(&self.theme_marker) {
            let missing: Vec<&String> = self.imports.iter().filter(|i| !text.contains(i.as_str())).collect();
            if !missing.is_empty() {
                let mut header = String::new();
                for line in &missing {
                    header.push_str(line);
                    header.push('\n');
                }
                header.push('\n');
                text.insert_str(0, &header);
                imports_added = missing.len();
            }
            modified = true;
        }

        let mut substitutions = 0;
        for rule in &self.rules {
            let count = rule.pattern.find_iter(&text).count();
            if count > 0 {
                text = rule.pattern.replace_all(&text, NoExpand(&rule.constant)).into_owned();
                substitutions += count;
                modified = true;
            }
        }

        modified.then_some(Rewrite {
            content: text,
            substitutions,
            imports_added,
        })
    }

    pub fn rewrite_file(&self, path: &Path, dry_run: bool) -> Result<FileOutcome, RewriteError> {
        let content = fs::read_to_string(path).map_err(|source| RewriteError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let Some(rewrite) = self.rewrite_text(&content) else {
            return Ok(FileOutcome::Unchanged);
        };

        if !dry_run {
            fs::write(path, &rewrite.content).map_err(|source| RewriteError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(FileOutcome::Modified {
            substitutions: rewrite.substitutions,
            imports_added: rewrite.imports_added,
        })
    }

    /// Walks `root` and rewrites every eligible file. Per-file failures are
    /// reported and counted; only a missing root is an error.
    pub fn process_directory(&self, root: &Path, dry_run: bool, reporter: &Reporter) -> Result<RewriteReport, RewriteError> {
        if !root.is_dir() {
            return Err(RewriteError::RootMissing(root.to_path_buf()));
        }

        let mut report = RewriteReport::default();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                    reporter.failure(&RewriteError::Walk { path, source }.to_string());
                    report.failed += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.is_eligible(entry.path()) {
                continue;
            }

            report.scanned += 1;
            let path = entry.path();
            match self.rewrite_file(path, dry_run) {
                Ok(FileOutcome::Modified { substitutions, imports_added }) => {
                    let verb = if dry_run { "Would modify" } else { "Modified" };
                    reporter.success(&format!(
                        "{}: {} ({} replacement(s), {} import(s))",
                        verb,
                        path.display(),
                        substitutions,
                        imports_added
                    ));
                    report.substitutions += substitutions;
                    report.modified.push(path.to_path_buf());
                }
                Ok(FileOutcome::Unchanged) => {
                    reporter.detail(&format!("No change: {}", path.display()));
                    report.unchanged += 1;
                }
                Err(e) => {
                    reporter.failure(&e.to_string());
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rewriter() -> ColorRewriter {
        ColorRewriter::new(&ColorConfig::default()).unwrap()
    }

    #[test]
    fn test_replaces_literal_and_adds_imports() {
        let source = "class A {\n  final c = Color(0xFF4A90E2);\n}\n";
        let rewrite = rewriter().rewrite_text(source).unwrap();
        assert!(rewrite.content.contains("final c = AppTheme.primaryBlue;"));
        assert!(!rewrite.content.contains("Color(0xFF4A90E2)"));
        assert!(rewrite.content.starts_with(
            "import 'package:flutter/material.dart';\nimport '../utils/app_theme.dart';\n\nclass A {"
        ));
        assert_eq!(rewrite.substitutions, 1);
        assert_eq!(rewrite.imports_added, 2);
    }

    #[test]
    fn test_only_missing_import_is_added() {
        let source = "import 'package:flutter/material.dart';\n\nvar x = Color(0xFFEF4444);\nvar y = Color(0xFFEF4444);\n";
        let rewrite = rewriter().rewrite_text(source).unwrap();
        assert!(rewrite.content.starts_with("import '../utils/app_theme.dart';\n\nimport 'package:flutter/material.dart';"));
        assert_eq!(rewrite.imports_added, 1);
        assert_eq!(rewrite.substitutions, 2);
        assert_eq!(rewrite.content.matches("AppTheme.accentRed").count(), 2);
    }

    #[test]
    fn test_theme_marker_suppresses_imports() {
        let source = "import 'package:app/utils/App_Theme.dart';\nvar x = Color(0xFF22C55E);\n";
        let rewrite = rewriter().rewrite_text(source).unwrap();
        assert_eq!(rewrite.imports_added, 0);
        assert_eq!(rewrite.content, "import 'package:app/utils/App_Theme.dart';\nvar x = AppTheme.successGreen;\n");
    }

    #[test]
    fn test_no_match_means_no_rewrite() {
        let source = "var x = Color(0xFF123456);\nvar y = Colors.red;\n";
        assert_eq!(rewriter().rewrite_text(source), None);
    }

    #[test]
    fn test_matching_is_case_sensitive_and_textual() {
        let source = "// Color(0xFF8E8E93) in a comment\nvar x = Color(0xff8e8e93);\n";
        let rewrite = rewriter().rewrite_text(source).unwrap();
        assert!(rewrite.content.contains("// AppTheme.textSecondary in a comment"));
        assert!(rewrite.content.contains("Color(0xff8e8e93)"));
    }

    #[test]
    fn test_eligibility() {
        let r = rewriter();
        assert!(r.is_eligible(Path::new("lib/screens/home.dart")));
        assert!(!r.is_eligible(Path::new("lib/utils/app_theme.dart")));
        assert!(!r.is_eligible(Path::new("lib/utils/app_theme_dark.dart")));
        assert!(!r.is_eligible(Path::new("lib/readme.md")));
        assert!(!r.is_eligible(Path::new("lib/dart")));
    }

    #[test]
    fn test_process_directory() {
        let dir = TempDir::new().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir_all(lib.join("screens")).unwrap();
        fs::create_dir_all(lib.join("utils")).unwrap();

        let home = lib.join("screens/home.dart");
        let plain = lib.join("screens/plain.dart");
        let theme = lib.join("utils/app_theme.dart");
        let notes = lib.join("notes.txt");
        fs::write(&home, "var a = Color(0xFF4A90E2);\n").unwrap();
        fs::write(&plain, "var b = Colors.white;\n").unwrap();
        fs::write(&theme, "static const primaryBlue = Color(0xFF4A90E2);\n").unwrap();
        fs::write(&notes, "Color(0xFF4A90E2)\n").unwrap();
        let plain_mtime = fs::metadata(&plain).unwrap().modified().unwrap();

        let report = rewriter().process_directory(&lib, false, &Reporter::silent()).unwrap();
        assert_eq!(report.scanned, 2);
        assert_eq!(report.modified, vec![home.clone()]);
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.substitutions, 1);

        assert!(fs::read_to_string(&home).unwrap().contains("AppTheme.primaryBlue"));
        assert_eq!(fs::read_to_string(&plain).unwrap(), "var b = Colors.white;\n");
        assert_eq!(fs::metadata(&plain).unwrap().modified().unwrap(), plain_mtime);
        assert!(fs::read_to_string(&theme).unwrap().contains("Color(0xFF4A90E2)"));
        assert_eq!(fs::read_to_string(&notes).unwrap(), "Color(0xFF4A90E2)\n");
    }

    #[test]
    fn test_dry_run_leaves_files_alone() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.dart");
        fs::write(&file, "x = Color(0xFFB0B0B0);\n").unwrap();

        let report = rewriter().process_directory(dir.path(), true, &Reporter::silent()).unwrap();
        assert_eq!(report.modified.len(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "x = Color(0xFFB0B0B0);\n");
    }

    #[test]
    fn test_unreadable_file_is_counted_and_walk_continues() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a_bad.dart"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        fs::write(dir.path().join("b_good.dart"), "x = Color(0xFF06B6D4);\n").unwrap();

        let report = rewriter().process_directory(dir.path(), false, &Reporter::silent()).unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.modified.len(), 1);
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let result = rewriter().process_directory(&dir.path().join("lib"), false, &Reporter::silent());
        assert!(matches!(result, Err(RewriteError::RootMissing(_))));
    }
}
