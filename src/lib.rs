// ============================================================================
// lib.rs — Library API (shared by the CLI and tests)
// ============================================================================

pub mod colors;
pub mod config;
pub mod error;
pub mod icon_generator;
pub mod icon_render;
pub mod icon_targets;
pub mod manifest;
pub mod options;
pub mod promo;
pub mod report;

pub use colors::{ColorRewriter, RewriteReport};
pub use config::ToolConfig;
pub use error::{ConfigError, IconError, ManifestError, PromoError, RewriteError};
pub use icon_generator::{GenerationReport, IconGenerator, TargetOutcome};
pub use icon_targets::{catalog, IconTarget, Platform};
pub use manifest::{ManifestPatch, PatchOutcome};
pub use options::{Command, Options};
pub use promo::{generate_codes, render_insert, PromoBatch};
pub use report::Reporter;
