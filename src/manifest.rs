// ============================================================================
// manifest.rs — Registers the icon source as a packaged asset (pubspec.yaml)
// ============================================================================
//
// This is a literal text patch: the asset block must appear exactly as
// expected or nothing is changed. The manifest is never parsed as YAML.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;

/// Entries of the asset block the new entry is inserted into. The new entry
/// goes right before the last one.
pub const ANCHOR_ASSETS: [&str; 4] = [
    "assets/images/",
    "assets/sounds/",
    "assets/animations/",
    "assets/images/instagram.png",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    AlreadyPresent,
    Patched,
    /// The asset block was not found verbatim; the file was left alone.
    AnchorNotFound,
}

pub struct ManifestPatch {
    path: PathBuf,
    asset: String,
}

fn asset_block(entries: &[&str]) -> String {
    let mut block = String::from("  assets:");
    for entry in entries {
        block.push_str("\n    - ");
        block.push_str(entry);
    }
    block
}

impl ManifestPatch {
    pub fn new(path: impl Into<PathBuf>, asset: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            asset: asset.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies the patch to manifest text. Returns `None` when nothing changes.
    pub fn patch_text(&self, content: &str) -> (PatchOutcome, Option<String>) {
        if content.contains(&self.asset) {
            return (PatchOutcome::AlreadyPresent, None);
        }

        let anchor = asset_block(&ANCHOR_ASSETS);
        if !content.contains(&anchor) {
            return (PatchOutcome::AnchorNotFound, None);
        }

        let (head, last) = ANCHOR_ASSETS.split_at(ANCHOR_ASSETS.len() - 1);
        let mut entries: Vec<&str> = head.to_vec();
        entries.push(&self.asset);
        entries.extend_from_slice(last);
        let replacement = asset_block(&entries);

        (PatchOutcome::Patched, Some(content.replace(&anchor, &replacement)))
    }

    pub fn apply(&self) -> Result<PatchOutcome, ManifestError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ManifestError::Read {
            path: self.path.clone(),
            source,
        })?;

        let (outcome, patched) = self.patch_text(&content);
        if let Some(patched) = patched {
            fs::write(&self.path, patched).map_err(|source| ManifestError::Write {
                path: self.path.clone(),
                source,
            })?;
            log::debug!("patched {}", self.path.display());
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBSPEC: &str = "name: smooth_ai\n\nflutter:\n  uses-material-design: true\n  assets:\n    - assets/images/\n    - assets/sounds/\n    - assets/animations/\n    - assets/images/instagram.png\n";

    fn patch() -> ManifestPatch {
        ManifestPatch::new("pubspec.yaml", "assets/images/icone1.jpg")
    }

    #[test]
    fn test_inserts_before_last_entry() {
        let (outcome, patched) = patch().patch_text(PUBSPEC);
        assert_eq!(outcome, PatchOutcome::Patched);
        let patched = patched.unwrap();
        assert!(patched.contains(
            "    - assets/animations/\n    - assets/images/icone1.jpg\n    - assets/images/instagram.png\n"
        ));
        assert!(patched.starts_with("name: smooth_ai\n"));
    }

    #[test]
    fn test_already_present_is_untouched() {
        let content = format!("{}    - assets/images/icone1.jpg\n", PUBSPEC);
        assert_eq!(patch().patch_text(&content), (PatchOutcome::AlreadyPresent, None));
    }

    #[test]
    fn test_reformatted_block_is_a_no_op() {
        let content = PUBSPEC.replace("    - assets/sounds/\n", "");
        assert_eq!(patch().patch_text(&content), (PatchOutcome::AnchorNotFound, None));
    }

    #[test]
    fn test_apply_rewrites_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pubspec.yaml");
        fs::write(&path, PUBSPEC).unwrap();
        let patch = ManifestPatch::new(&path, "assets/images/icone1.jpg");

        assert_eq!(patch.apply().unwrap(), PatchOutcome::Patched);
        let once = fs::read_to_string(&path).unwrap();
        assert_eq!(patch.apply().unwrap(), PatchOutcome::AlreadyPresent);
        assert_eq!(fs::read_to_string(&path).unwrap(), once);
    }

    #[test]
    fn test_apply_missing_manifest_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let patch = ManifestPatch::new(dir.path().join("pubspec.yaml"), "assets/x.png");
        assert!(matches!(patch.apply(), Err(ManifestError::Read { .. })));
    }
}
