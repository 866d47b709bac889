//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! router.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     + content snapshot (JSON, path relative to router.toml)
//!     → loader.rs build_parts
//!     → SnapshotParts → RequestResolver::install
//!
//! On file change:
//!     watcher.rs detects change (config or content file)
//!     → loader.rs reloads both
//!     → SnapshotParts sent over the update channel
//!     → owner installs it (atomic swap)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A failed reload never replaces a working snapshot

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_snapshot, ConfigError};
pub use schema::{DomainConfig, LookupConfig, LookupKind, RouterConfig, RoutingConfig};
pub use validation::ValidationError;
pub use watcher::SnapshotWatcher;
