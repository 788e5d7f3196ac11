//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Initial load → Register watch → Spawn actor loop → Hand out SharedConfig
//!
//! Shutdown (shutdown.rs):
//!     SharedConfig::close → Shutdown::trigger → actor loop exits
//!     → request inbox dropped → parked callers get the empty value
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned and nothing is spawned
//! - Shutdown is a sticky flag, so late readers see it without a message

pub mod shutdown;

pub use shutdown::Shutdown;
