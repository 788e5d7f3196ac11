//! Backing-file subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON object / TOML table of strings)
//!     → loader.rs (read & decode into a flat map)
//!     → handed to the actor, which installs it in one step
//!
//! On write:
//!     watcher.rs detects a data modification
//!     → FileEvent::Modified into the actor's event inbox
//!     → actor calls loader.rs again
//!     → success replaces the map, failure keeps the old one
//! ```
//!
//! # Design Decisions
//! - Decoding is pure; only the actor owns and mutates the live map
//! - Reloads replace, never merge: keys missing from the new file disappear
//! - Only data writes are reload triggers; rename/remove/chmod are ignored

pub mod error;
pub mod loader;
pub mod watcher;

pub use error::{ConfigError, ConfigResult};
pub use loader::{decode_map, load_map, read_source, ConfigFormat, ConfigMap};
pub use watcher::{ConfigWatcher, FileEvent};
