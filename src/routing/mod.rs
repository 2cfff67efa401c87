//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (startup):
//!     (method, pattern, handler, tag)
//!     → pattern.rs (split & validate segments)
//!     → router.rs (pick or create the method's trie)
//!     → node.rs (graft segments, detect duplicates/conflicts)
//!
//! Incoming Request (method, path)
//!     → router.rs (exact method trie, then ANY)
//!     → node.rs (segment-by-segment descent)
//!     → Return: Match { handler, tag, params } or None
//! ```
//!
//! # Design Decisions
//! - Tries are built once, then only read
//! - No regex, no decoding: matching is on raw `/`-delimited segments
//! - Literal segments beat captures; a wildcard must be pattern-final

pub mod error;
mod node;
pub mod params;
pub mod pattern;
pub mod router;

pub use error::{RouteError, SyntaxError};
pub use params::Params;
pub use router::{Match, RouteInfo, Router, ANY};
