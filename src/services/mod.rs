//! Services module - Scan, classify and migrate save archives.
//!
//! The services are synchronous and framework-agnostic; every input is an
//! explicit parameter and nothing is cached between calls.
//!
//! # Components
//!
//! - [`marker`]: Reads and writes the 8-byte device flag at offset 16 of a save blob
//! - [`ArchiveScanner`]: Finds the reference marker and the numbered slot directories
//!   of one profile
//! - [`classify`]: Assigns a [`SlotStatus`](crate::models::SlotStatus) by comparing a
//!   slot's flag with the reference
//! - [`MigrationExecutor`]: Backs up and patches selected slots, producing a
//!   [`MigrationReport`]
//! - [`discovery`]: Lists games and profiles under a save root
//!
//! # Usage Example
//!
//! ```ignore
//! use archive_migrator::services::{ArchiveScanner, MigrationExecutor};
//! use archive_migrator::models::ArchiveCatalog;
//!
//! let scanner = ArchiveScanner::default();
//! let mut catalog = ArchiveCatalog::load(&scanner, &ctx)?;
//!
//! catalog.select_all_migratable();
//! let report = catalog.migrate_selected(&MigrationExecutor::default());
//! catalog.refresh(&scanner, &ctx)?;
//! ```
//!
//! # Errors
//!
//! All fallible operations return [`ArchiveError`]. A missing or unreadable
//! auto-save is not an error; it shows up as an absent reference. Migration
//! failures are recorded per slot in the report.

pub mod classifier;
pub mod discovery;
pub mod error;
pub mod marker;
pub mod migration;
pub mod scanner;

pub use classifier::{Classification, classify, classify_all, classify_slot};
pub use discovery::{list_games, list_profiles};
pub use error::{ArchiveError, ArchiveResult};
pub use marker::{read_marker, write_marker};
pub use migration::{MigrationExecutor, MigrationOutcome, MigrationReport, SlotMigration};
pub use scanner::{ArchiveScanner, SlotScan};
