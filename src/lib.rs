// Archive Migrator - device flag migration for Koei Tecmo PC save archives
//
// This is the library crate containing the scan, classify and migrate engine.
// The binary crate (main.rs) provides the command line front end.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ArchiveSlot, DeviceFlag, ReferenceMarker, SaveLayout, ScanContext, SlotStatus, UserConfig};
pub use services::{ArchiveError, ArchiveScanner, MigrationExecutor, MigrationReport};
pub use state::ArchiveCatalog;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
