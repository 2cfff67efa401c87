//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower-http layers)
//!     → request.rs (x-request-id)
//!     → service.rs (current mux snapshot)
//!     → mux.rs (resolve, middleware chain, panic boundary)
//!     → handler.rs (handler(req, RouteContext))
//!     → response.rs (default 404 / 500 bodies)
//! ```

pub mod handler;
pub mod middleware;
pub mod mux;
pub mod request;
pub mod response;
pub mod server;
pub mod service;

pub use handler::{BoxHandler, Handler, RouteContext};
pub use middleware::{from_fn, Middleware, Next};
pub use mux::{Mux, PanicHandler};
pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use response::HandlerPanic;
pub use server::HttpServer;
pub use service::MuxService;
