//! Trie-based HTTP request router.
//!
//! Routes are `/`-delimited patterns made of literal segments, named
//! parameters (`:id`) and a trailing wildcard (`*path`). Each HTTP method
//! owns a trie; the reserved `ANY` trie catches whatever the exact method
//! does not.
//!
//! ```ignore
//! let mut mux: Mux = Mux::new();
//! mux.get("/posts/:id", |_req, ctx: RouteContext| async move {
//!     format!("post {}", ctx.param("id").unwrap_or_default())
//! })?;
//!
//! let server = HttpServer::new(ServerConfig::default(), MuxService::new(mux));
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::{HttpServer, Mux, MuxService, RouteContext};
pub use lifecycle::Shutdown;
pub use routing::{Params, RouteError, Router, ANY};
