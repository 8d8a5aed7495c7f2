use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "archive-migrator")]
#[command(version, about = "Migrate save slot device flags to match the auto-save", long_about = None)]
pub struct Cli {
    /// Save root containing one directory per game (defaults to the configured root)
    #[arg(long, global = true)]
    pub root: Option<Utf8PathBuf>,

    /// Directory holding Migrator Settings.yaml and logs
    #[arg(long, global = true, default_value = "Migrator Data")]
    pub config_dir: Utf8PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List game directories under the save root
    Games,
    /// List profile directories of a game
    Profiles {
        /// Game directory name (defaults to the last used or first game)
        game: Option<String>,
    },
    /// Show every save slot of a profile and its migration status
    Scan(Target),
    /// Back up and patch selected slots to the auto-save's device flag
    Migrate {
        #[command(flatten)]
        target: Target,

        /// Slot to migrate, e.g. SAVEDATA2 (repeatable)
        #[arg(long = "slot", value_name = "NAME", required_unless_present = "all")]
        slots: Vec<String>,

        /// Migrate every slot that needs it
        #[arg(long, conflicts_with = "slots")]
        all: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct Target {
    /// Game directory name (defaults to the last used or first game)
    pub game: Option<String>,
    /// Profile directory name (defaults to the last used or first profile)
    pub profile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_migrate_slots() {
        let cli = Cli::parse_from([
            "archive-migrator",
            "migrate",
            "GameX",
            "765",
            "--slot",
            "SAVEDATA2",
            "--slot",
            "SAVEDATA3",
        ]);
        match cli.command {
            Some(Commands::Migrate { target, slots, all }) => {
                assert_eq!(target.game.as_deref(), Some("GameX"));
                assert_eq!(target.profile.as_deref(), Some("765"));
                assert_eq!(slots, vec!["SAVEDATA2", "SAVEDATA3"]);
                assert!(!all);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_migrate_requires_selection() {
        let result = Cli::try_parse_from(["archive-migrator", "migrate", "GameX", "765"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_root() {
        let cli = Cli::parse_from(["archive-migrator", "scan", "--root", "/saves"]);
        assert_eq!(cli.root, Some(Utf8PathBuf::from("/saves")));
        assert!(matches!(cli.command, Some(Commands::Scan(_))));
    }
}
