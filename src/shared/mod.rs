//! Single-owner shared configuration.
//!
//! # Data Flow
//! ```text
//! SharedConfig::get(key)
//!     → Request::Get { key, reply } into the actor inbox
//!     → actor looks the key up in its private map
//!     → value back on the request's own oneshot
//!
//! notify watcher (own thread)
//!     → FileEvent::Modified into the actor's event inbox
//!     → actor reloads; success swaps the map, failure is logged
//!
//! SharedConfig::close()
//!     → shutdown flag set → actor loop exits
//!     → inbox dropped, every unanswered request resolves to ""
//! ```
//!
//! # Design Decisions
//! - The map is owned by one task and never shared, so it needs no lock
//! - Reloads and lookups are serialized by the same loop: a lookup sees the
//!   map from before or after a reload, never a mix
//! - No priority between shutdown, file events and lookups beyond
//!   `tokio::select!`'s random fairness
//! - `get` has no timeout

pub mod actor;
pub mod handle;
pub mod message;

pub use actor::{ActorState, ConfigActor};
pub use handle::SharedConfig;
pub use message::Request;
