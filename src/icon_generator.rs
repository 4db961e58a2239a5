// ============================================================================
// icon_generator.rs — Icon generation pipeline over the target catalog
// ============================================================================
//
// The source image is decoded once. Each target is then rendered and written
// independently: a failure is recorded against that target and the run moves
// on. Only a missing source file aborts, before anything is written.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use sha2::{Digest, Sha256};

use crate::error::IconError;
use crate::icon_render::render_target;
use crate::icon_targets::{IconTarget, Platform};
use crate::report::Reporter;

#[derive(Debug)]
pub enum TargetOutcome {
    Written,
    /// Check mode: file on disk matches the rendered bytes
    UpToDate,
    /// Check mode: file on disk differs
    Stale,
    /// Check mode: file does not exist
    Missing,
    Failed(IconError),
}

#[derive(Debug)]
pub struct TargetResult {
    pub target: IconTarget,
    pub output: PathBuf,
    pub outcome: TargetOutcome,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub results: Vec<TargetResult>,
}

impl GenerationReport {
    fn count(&self, pred: impl Fn(&TargetOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Written))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Failed(_)))
    }

    pub fn up_to_date(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::UpToDate))
    }

    /// Stale or missing outputs found by a check run.
    pub fn outdated(&self) -> usize {
        self.count(|o| matches!(o, TargetOutcome::Stale | TargetOutcome::Missing))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.outdated() == 0
    }
}

pub struct IconGenerator {
    project_root: PathBuf,
    source: PathBuf,
    targets: Vec<IconTarget>,
}

impl IconGenerator {
    pub fn new(project_root: impl Into<PathBuf>, source: impl Into<PathBuf>, targets: Vec<IconTarget>) -> Self {
        Self {
            project_root: project_root.into(),
            source: source.into(),
            targets,
        }
    }

    pub fn targets(&self) -> &[IconTarget] {
        &self.targets
    }

    fn output_path(&self, target: &IconTarget) -> PathBuf {
        self.project_root.join(&target.path)
    }

    fn load_source(&self) -> Result<Result<DynamicImage, String>, IconError> {
        if !self.source.exists() {
            return Err(IconError::SourceMissing(self.source.clone()));
        }
        let decoded = image::open(&self.source).map_err(|e| e.to_string());
        match &decoded {
            Ok(img) => log::debug!(
                "decoded {} ({}x{}, {:?})",
                self.source.display(),
                img.width(),
                img.height(),
                img.color()
            ),
            Err(e) => log::debug!("decode of {} failed: {}", self.source.display(), e),
        }
        Ok(decoded)
    }

    /// Renders and writes every target.
    pub fn generate(&self, reporter: &Reporter) -> Result<GenerationReport, IconError> {
        self.run(reporter, false)
    }

    /// Renders every target in memory and compares against the files on disk.
    /// Nothing is written.
    pub fn check(&self, reporter: &Reporter) -> Result<GenerationReport, IconError> {
        self.run(reporter, true)
    }

    fn run(&self, reporter: &Reporter, check_only: bool) -> Result<GenerationReport, IconError> {
        let source = self.load_source()?;
        reporter.done(&format!("Source image found: {}", self.source.display()));

        let mut report = GenerationReport::default();
        let mut current: Option<Platform> = None;
        reporter.start_progress(self.targets.len() as u64, "icons");

        for target in &self.targets {
            if current != Some(target.platform) {
                current = Some(target.platform);
                reporter.section(&format!("{} icons", target.platform));
            }

            let output = self.output_path(target);
            let outcome = match &source {
                Ok(image) => {
                    if check_only {
                        check_target(image, target, &output)
                    } else {
                        write_target(image, target, &output)
                    }
                }
                Err(reason) => TargetOutcome::Failed(IconError::Decode(reason.clone())),
            };

            match &outcome {
                TargetOutcome::Written => reporter.success(&format!("Created: {}", target.label())),
                TargetOutcome::UpToDate => reporter.success(&format!("Up to date: {}", target.label())),
                TargetOutcome::Stale => reporter.warn(&format!("Stale: {}", output.display())),
                TargetOutcome::Missing => reporter.warn(&format!("Missing: {}", output.display())),
                TargetOutcome::Failed(e) => {
                    reporter.failure(&format!("Error creating {}: {}", output.display(), e))
                }
            }
            reporter.tick(&target.path.display().to_string());

            report.results.push(TargetResult {
                target: target.clone(),
                output,
                outcome,
            });
        }

        reporter.finish_progress("done");
        Ok(report)
    }
}

fn write_target(source: &DynamicImage, target: &IconTarget, output: &Path) -> TargetOutcome {
    let result = render_target(source, target).and_then(|bytes| {
        if let Some(parent) = output.parent() {
            ensure_directory_exists(parent)?;
        }
        fs::write(output, &bytes).map_err(|source| IconError::Write {
            path: output.to_path_buf(),
            source,
        })?;
        log::debug!("wrote {} ({} bytes)", output.display(), bytes.len());
        Ok(())
    });
    match result {
        Ok(()) => TargetOutcome::Written,
        Err(e) => TargetOutcome::Failed(e),
    }
}

fn check_target(source: &DynamicImage, target: &IconTarget, output: &Path) -> TargetOutcome {
    if !output.exists() {
        return TargetOutcome::Missing;
    }
    let rendered = match render_target(source, target) {
        Ok(bytes) => bytes,
        Err(e) => return TargetOutcome::Failed(e),
    };
    let on_disk = match fs::read(output) {
        Ok(bytes) => bytes,
        Err(source) => {
            return TargetOutcome::Failed(IconError::Read {
                path: output.to_path_buf(),
                source,
            })
        }
    };
    let expected = digest(&rendered);
    let actual = digest(&on_disk);
    log::debug!("{}: expected {} actual {}", output.display(), expected, actual);
    if expected == actual {
        TargetOutcome::UpToDate
    } else {
        TargetOutcome::Stale
    }
}

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn ensure_directory_exists(path: &Path) -> Result<(), IconError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| IconError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
