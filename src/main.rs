//! Archive Migrator - command line front end.
//!
//! Lists games and profiles under the save root, shows the migration status
//! of every slot of a profile, and migrates selected slots to the device flag
//! of the profile's auto-save.
//!
//! # Execution Flow
//!
//! 1. Load `Migrator Settings.yaml` from the config directory
//! 2. Initialize logging → `<config dir>/logs/archive-migrator.<date>`
//! 3. Resolve game and profile (argument, then last used, then first found)
//! 4. Scan, print, and for `migrate` run the executor and re-scan

mod cli;

use anyhow::{Context, Result, bail};
use archive_migrator::services::{ArchiveScanner, MigrationExecutor, MigrationOutcome, MigrationReport};
use archive_migrator::{APP_NAME, ArchiveCatalog, ConfigManager, ScanContext, SlotStatus, UserConfig, VERSION};
use camino::Utf8Path;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, Target};

fn main() -> Result<()> {
    let args = Cli::parse();

    let config_manager = ConfigManager::new(&args.config_dir)?;
    let user_config = config_manager.load_user_config()?;
    let debug_mode = args.debug || user_config.migrator_settings.debug_mode;

    let _guard = archive_migrator::logging::setup_logging_with_console(
        &config_manager.config_dir().join("logs"),
        APP_NAME,
        debug_mode,
        debug_mode,
    )?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let root = args.root.clone().unwrap_or_else(|| user_config.root_dir());

    let result = match args.command {
        Some(Commands::Games) => run_games(&root),
        Some(Commands::Profiles { game }) => run_profiles(&root, game, &user_config),
        Some(Commands::Scan(target)) => run_scan(&root, target, &config_manager, &user_config),
        Some(Commands::Migrate { target, slots, all }) => {
            run_migrate(&root, target, slots, all, &config_manager, &user_config)
        }
        None => {
            Cli::command().print_long_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

fn run_games(root: &Utf8Path) -> Result<()> {
    let games = archive_migrator::services::list_games(root)
        .with_context(|| format!("Failed to read save root {}", root))?;
    if games.is_empty() {
        println!("No games found under {}", root);
    }
    for game in games {
        println!("{}", game);
    }
    Ok(())
}

fn run_profiles(root: &Utf8Path, game: Option<String>, config: &UserConfig) -> Result<()> {
    let game = resolve_game(root, game, config)?;
    let profiles = archive_migrator::services::list_profiles(root, &game)
        .with_context(|| format!("Failed to read profiles of {}", game))?;
    if profiles.is_empty() {
        println!("No profiles found for {}", game);
    }
    for profile in profiles {
        println!("{}", profile);
    }
    Ok(())
}

fn run_scan(
    root: &Utf8Path,
    target: Target,
    config_manager: &ConfigManager,
    config: &UserConfig,
) -> Result<()> {
    let ctx = resolve_context(root, target, config)?;
    let scanner = ArchiveScanner::new(config.layout());
    let catalog = load_catalog(&scanner, &ctx)?;
    config_manager.remember_selection(&ctx.game, &ctx.profile)?;

    print_catalog(&ctx, &catalog);
    Ok(())
}

fn run_migrate(
    root: &Utf8Path,
    target: Target,
    slots: Vec<String>,
    all: bool,
    config_manager: &ConfigManager,
    config: &UserConfig,
) -> Result<()> {
    let ctx = resolve_context(root, target, config)?;
    let scanner = ArchiveScanner::new(config.layout());
    let executor = MigrationExecutor::new(config.layout());
    let mut catalog = load_catalog(&scanner, &ctx)?;
    config_manager.remember_selection(&ctx.game, &ctx.profile)?;

    if all {
        catalog.select_all_migratable();
    } else {
        let unknown = catalog.select_only(&slots);
        if !unknown.is_empty() {
            bail!("Unknown slot(s): {}", unknown.join(", "));
        }
    }

    if !catalog.has_selected_migratable() {
        print_catalog(&ctx, &catalog);
        println!();
        println!("No selected slot needs migration.");
        return Ok(());
    }

    let report = catalog.migrate_selected(&executor);
    print_report(&report);

    catalog
        .refresh(&scanner, &ctx)
        .context("Failed to re-scan after migration")?;
    println!();
    print_catalog(&ctx, &catalog);

    let failed = report.failed().count();
    if failed > 0 {
        bail!("{} slot(s) failed to migrate", failed);
    }
    Ok(())
}

fn load_catalog(scanner: &ArchiveScanner, ctx: &ScanContext) -> Result<ArchiveCatalog> {
    ArchiveCatalog::load(scanner, ctx)
        .with_context(|| format!("Failed to load save archives from {}", ctx.base_dir()))
}

fn resolve_context(root: &Utf8Path, target: Target, config: &UserConfig) -> Result<ScanContext> {
    let game = resolve_game(root, target.game, config)?;
    let profile = match target.profile {
        Some(profile) => profile,
        None => {
            let profiles = archive_migrator::services::list_profiles(root, &game)?;
            pick_default(profiles, config.last_profile())
                .with_context(|| format!("No profiles found for {}", game))?
        }
    };
    Ok(ScanContext::new(root.to_path_buf(), game, profile))
}

fn resolve_game(root: &Utf8Path, game: Option<String>, config: &UserConfig) -> Result<String> {
    if let Some(game) = game {
        return Ok(game);
    }
    let games = archive_migrator::services::list_games(root)?;
    pick_default(games, config.last_game())
        .with_context(|| format!("No games found under {}", root))
}

/// Last used entry if it still exists, otherwise the first one.
fn pick_default(mut names: Vec<String>, last_used: Option<&str>) -> Option<String> {
    if let Some(last) = last_used {
        if let Some(pos) = names.iter().position(|n| n == last) {
            return Some(names.swap_remove(pos));
        }
    }
    names.into_iter().next()
}

fn status_label(status: SlotStatus) -> &'static str {
    match status {
        SlotStatus::FileMissing => "File missing",
        SlotStatus::UnknownReference => "Unknown",
        SlotStatus::UpToDate => "Up to date",
        SlotStatus::NeedsMigration => "Needs migration",
    }
}

fn print_catalog(ctx: &ScanContext, catalog: &ArchiveCatalog) {
    println!("{} / {}", ctx.game, ctx.profile);
    match catalog.reference_flag() {
        Some(flag) => println!("Auto-save device flag: {}", flag),
        None => println!("Auto-save device flag: unavailable, statuses unknown"),
    }

    if catalog.is_empty() {
        println!("No save slots found.");
        return;
    }

    println!();
    println!("{:<14} {:<18} {}", "Slot", "Device flag", "Status");
    for slot in catalog.slots() {
        let flag = slot.flag().map(|f| f.to_hex()).unwrap_or_else(|| "-".to_string());
        println!("{:<14} {:<18} {}", slot.name(), flag, status_label(slot.status()));
    }

    if catalog.has_migratable() {
        let count = catalog.status_counts()[&SlotStatus::NeedsMigration];
        println!();
        println!("{} slot(s) can be migrated.", count);
    }
}

fn print_report(report: &MigrationReport) {
    for entry in &report.entries {
        match &entry.outcome {
            MigrationOutcome::Migrated { backup_path } => {
                println!("{}: migrated (backup {})", entry.name, file_name(backup_path))
            }
            MigrationOutcome::BackupFailed(reason) => {
                println!("{}: backup failed, not modified: {}", entry.name, reason)
            }
            MigrationOutcome::PatchFailed {
                backup_path,
                reason,
            } => println!(
                "{}: patch failed, original kept at {}: {}",
                entry.name, backup_path, reason
            ),
        }
    }
    println!("{}", report.summary());
}

fn file_name(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or(path.as_str())
}
