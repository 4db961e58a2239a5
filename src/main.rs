// ============================================================================
// main.rs — assetsmith CLI entry point
// ============================================================================

use std::process;

use anyhow::Context;
use clap::Parser;
use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use assetsmith::colors::ColorRewriter;
use assetsmith::config::{parse_hex_color, ToolConfig};
use assetsmith::icon_generator::IconGenerator;
use assetsmith::icon_targets::{catalog, Platform};
use assetsmith::manifest::{ManifestPatch, PatchOutcome};
use assetsmith::options::{Command, Options};
use assetsmith::promo::{self, MAX_CODES};
use assetsmith::report::Reporter;

fn main() {
    let options = Options::parse();

    let default_filter = if options.show_verbose_output() { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let reporter = Reporter::new(options.quiet, options.verbose);

    let result = load_config(&options).and_then(|config| match &options.command {
        Command::Icons { platform, check, no_manifest, .. } => {
            run_icons(&config, platform, *check, *no_manifest, &reporter)
        }
        Command::Colors { dry_run, .. } => run_colors(&config, *dry_run, &reporter),
        Command::Promo { seed, .. } => run_promo(&config, *seed, &reporter),
    });

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            process::exit(1);
        }
    }
}

fn load_config(options: &Options) -> anyhow::Result<ToolConfig> {
    let mut config = ToolConfig::load(options.config.as_deref()).context("configuration error")?;
    options.apply_overrides(&mut config);
    config.validate().context("configuration error")?;
    Ok(config)
}

/// Returns Ok(false) when some target failed (or is outdated in check mode).
fn run_icons(
    config: &ToolConfig,
    platforms: &[Platform],
    check: bool,
    no_manifest: bool,
    reporter: &Reporter,
) -> anyhow::Result<bool> {
    reporter.banner("App icon generation");

    let background = config.icons.maskable_background.as_deref().and_then(parse_hex_color);
    let generator = IconGenerator::new(
        &config.icons.project_root,
        config.icons.source_path(),
        catalog(platforms, background),
    );

    let report = if check {
        generator.check(reporter)
    } else {
        generator.generate(reporter)
    }
    .context("icon generation aborted")?;

    let mut success = report.is_success();

    if check {
        let summary = format!(
            "{} up to date, {} outdated, {} failed",
            report.up_to_date(),
            report.outdated(),
            report.failed()
        );
        if success {
            reporter.done(&summary);
        } else {
            reporter.failure(&summary);
        }
        return Ok(success);
    }

    if !no_manifest {
        reporter.section("Asset manifest");
        let patch = ManifestPatch::new(config.icons.manifest_path(), config.icons.asset_entry());
        match patch.apply() {
            Ok(PatchOutcome::Patched) => {
                reporter.done(&format!("Added {} to {}", config.icons.asset_entry(), patch.path().display()))
            }
            Ok(PatchOutcome::AlreadyPresent) => {
                reporter.done(&format!("{} is already listed in the assets", config.icons.asset_entry()))
            }
            Ok(PatchOutcome::AnchorNotFound) => reporter.info(&format!(
                "Asset block not found in {}; left unchanged",
                patch.path().display()
            )),
            Err(e) => {
                reporter.failure(&e.to_string());
                success = false;
            }
        }
    }

    if !reporter.is_quiet() {
        println!();
    }
    let summary = format!("{} icon file(s) written, {} failed", report.written(), report.failed());
    if report.failed() == 0 {
        reporter.done(&summary);
    } else {
        reporter.failure(&summary);
    }
    Ok(success)
}

fn run_colors(config: &ToolConfig, dry_run: bool, reporter: &Reporter) -> anyhow::Result<bool> {
    reporter.banner("Theme color replacement");
    if dry_run {
        reporter.info("Dry run: no file will be written");
    }

    let rewriter = ColorRewriter::new(&config.colors)?;
    let report = rewriter.process_directory(&config.colors.root, dry_run, reporter)?;

    let summary = format!(
        "{} file(s) scanned, {} modified, {} unchanged, {} failed ({} replacement(s))",
        report.scanned,
        report.modified.len(),
        report.unchanged,
        report.failed,
        report.substitutions
    );
    if report.failed == 0 {
        reporter.done(&summary);
    } else {
        reporter.failure(&summary);
    }
    Ok(report.failed == 0)
}

fn run_promo(config: &ToolConfig, seed: Option<u64>, reporter: &Reporter) -> anyhow::Result<bool> {
    let promo_config = &config.promo;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let batch = promo::generate_codes(&promo_config.prefix, promo_config.count, &mut rng)?;
    if batch.is_capped() {
        reporter.warn(&format!(
            "requested {} codes but only {} distinct suffixes exist; emitting {}",
            batch.requested,
            MAX_CODES,
            batch.codes.len()
        ));
    }

    print!("{}", promo::render_insert(&batch, promo_config));
    Ok(true)
}
