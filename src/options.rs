// ============================================================================
// options.rs — Command-line arguments (CLI)
// ============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ToolConfig;
use crate::icon_targets::Platform;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate app icons for every platform from one source image
    Icons {
        /// Project root the icon paths are relative to (default: config or ".")
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Source image, relative to the project root
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Only generate icons for these platforms (repeatable)
        #[arg(short, long, value_enum)]
        platform: Vec<Platform>,

        /// Compare rendered icons with the files on disk instead of writing
        #[arg(long)]
        check: bool,

        /// Do not touch the asset manifest
        #[arg(long)]
        no_manifest: bool,
    },

    /// Replace hard-coded Color(0x...) literals with theme constants
    Colors {
        /// Directory to scan (default: config or "lib")
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Report what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print an SQL INSERT statement with random promo codes
    Promo {
        /// Number of codes (at most 1296)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Code prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Seed for a reproducible batch
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "assetsmith")]
#[command(about = "assetsmith - App icon generation, theme color rewriting and promo code seeding", long_about = None)]
#[command(version)]
pub struct Options {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path (default: assetsmith.toml if present)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (one line per file)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only errors and summary
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Options {
    /// If both verbose and quiet are set, quiet takes precedence
    pub fn show_verbose_output(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Command-line values win over the config file.
    pub fn apply_overrides(&self, config: &mut ToolConfig) {
        match &self.command {
            Command::Icons { root, source, .. } => {
                if let Some(root) = root {
                    config.icons.project_root = root.clone();
                }
                if let Some(source) = source {
                    config.icons.source = source.clone();
                }
            }
            Command::Colors { dir, .. } => {
                if let Some(dir) = dir {
                    config.colors.root = dir.clone();
                }
            }
            Command::Promo { count, prefix, .. } => {
                if let Some(count) = count {
                    config.promo.count = *count;
                }
                if let Some(prefix) = prefix {
                    config.promo.prefix = prefix.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }

    #[test]
    fn test_icons_flags() {
        let options = Options::try_parse_from([
            "assetsmith", "icons", "--platform", "ios", "-p", "web", "--check", "-s", "logo.png",
        ])
        .unwrap();
        match &options.command {
            Command::Icons { platform, check, source, no_manifest, .. } => {
                assert_eq!(platform, &vec![Platform::Ios, Platform::Web]);
                assert!(*check);
                assert!(!*no_manifest);
                assert_eq!(source.as_deref(), Some(std::path::Path::new("logo.png")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_overrides_win_over_config() {
        let options = Options::try_parse_from(["assetsmith", "-q", "promo", "-n", "12", "--prefix", "SPRING"]).unwrap();
        let mut config = ToolConfig::default();
        options.apply_overrides(&mut config);
        assert_eq!(config.promo.count, 12);
        assert_eq!(config.promo.prefix, "SPRING");
        assert_eq!(config.promo.description, "Réduction 10%");
        assert!(options.quiet);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let options = Options::try_parse_from(["assetsmith", "colors", "-v", "-q"]).unwrap();
        assert!(!options.show_verbose_output());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Options::try_parse_from(["assetsmith"]).is_err());
    }
}
