//! Hot-reloadable key/value configuration backed by a single file.
//!
//! One actor task owns the map; handles talk to it over channels.
//!
//! ```no_run
//! # async fn demo() -> Result<(), shared_config::ConfigError> {
//! let config = shared_config::SharedConfig::new("/etc/app/shared.json")?;
//! let height = config.get("height").await;
//! config.close();
//! # let _ = height;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod shared;

pub use config::{ConfigError, ConfigMap};
pub use shared::SharedConfig;
