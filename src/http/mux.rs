//! Request multiplexer.
//!
//! # Responsibilities
//! - Public registration surface (per-method wrappers, `ANY`, no-op routes)
//! - Resolve each request against the routing tries
//! - Run the matched handler through the middleware chain
//! - Recover handler panics and route misses into responses
//!
//! # Data Flow
//! ```text
//! Request (method, path)
//!     → Router::search (exact method, then ANY)
//!     → hit:  middleware chain → handler(req, RouteContext)
//!     → miss: not-found handler
//!     → panic inside either: panic handler (default 500)
//! ```

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::FutureExt;

use crate::http::handler::{self, BoxHandler, Handler, RouteContext};
use crate::http::middleware::{self, Middleware};
use crate::http::request::RequestIdExt;
use crate::http::response::{self, HandlerPanic};
use crate::observability::metrics::{self, Outcome};
use crate::routing::{RouteError, RouteInfo, Router, ANY};

/// Converts a handler panic into a response.
pub type PanicHandler = Arc<dyn Fn(HandlerPanic) -> Response + Send + Sync>;

macro_rules! method_wrappers {
    ($($(#[$doc:meta])* $name:ident => $method:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name<F, Fut, R>(&mut self, pattern: &str, handler: F) -> Result<&mut Self, RouteError>
            where
                F: Fn(Request<Body>, RouteContext<T>) -> Fut + Send + Sync + 'static,
                Fut: std::future::Future<Output = R> + Send + 'static,
                R: IntoResponse,
            {
                self.handle($method, pattern, handler, None)
            }
        )*
    };
}

/// HTTP request multiplexer.
///
/// Routes are registered up front; the finished mux is then frozen into a
/// [`MuxService`](crate::http::MuxService) and shared by every connection.
pub struct Mux<T = ()> {
    router: Router<BoxHandler<T>, T>,
    middlewares: Vec<Arc<dyn Middleware<T>>>,
    not_found: BoxHandler<T>,
    panic_handler: Option<PanicHandler>,
}

impl<T> Mux<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            middlewares: Vec::new(),
            not_found: Arc::new(|_req: Request<Body>, _ctx: RouteContext<T>| async {
                response::not_found()
            }),
            panic_handler: None,
        }
    }

    /// Register `handler` for `method` and `pattern`, with an optional tag.
    pub fn handle<F, Fut, R>(
        &mut self,
        method: &str,
        pattern: &str,
        handler: F,
        tag: Option<T>,
    ) -> Result<&mut Self, RouteError>
    where
        F: Fn(Request<Body>, RouteContext<T>) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.handle_boxed(method, pattern, Arc::new(handler), tag)
    }

    /// Register an already boxed handler.
    pub fn handle_boxed(
        &mut self,
        method: &str,
        pattern: &str,
        handler: BoxHandler<T>,
        tag: Option<T>,
    ) -> Result<&mut Self, RouteError> {
        self.router.register(method, pattern, handler, tag)?;
        Ok(self)
    }

    /// Register a route without business logic; it answers `200 OK`.
    pub fn handle_noop(&mut self, method: &str, pattern: &str, tag: Option<T>) -> Result<&mut Self, RouteError> {
        self.handle_boxed(method, pattern, handler::noop(), tag)
    }

    method_wrappers! {
        /// Register a `GET` route.
        get => "GET";
        /// Register a `POST` route.
        post => "POST";
        /// Register a `PUT` route.
        put => "PUT";
        /// Register a `DELETE` route.
        delete => "DELETE";
        /// Register a `PATCH` route.
        patch => "PATCH";
        /// Register a `HEAD` route.
        head => "HEAD";
        /// Register an `OPTIONS` route.
        options => "OPTIONS";
        /// Register a route on the `ANY` fallback trie.
        any => ANY;
    }

    /// Append a middleware. Earlier middlewares run first.
    pub fn use_middleware(&mut self, middleware: impl Middleware<T>) -> &mut Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Replace the handler used when no route matches.
    pub fn set_not_found(&mut self, handler: impl Handler<T>) -> &mut Self {
        self.not_found = Arc::new(handler);
        self
    }

    /// Replace the handler used when a handler panics.
    pub fn set_panic_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(HandlerPanic) -> Response + Send + Sync + 'static,
    {
        self.panic_handler = Some(Arc::new(handler));
        self
    }

    /// Every registered route.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.router.routes()
    }

    /// Resolve and serve one request.
    pub async fn dispatch(&self, req: Request<Body>) -> Response {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let request_id = req.request_id().unwrap_or("unknown").to_string();

        let (handler, ctx, outcome) = match self.router.search(method.as_str(), &path) {
            Some(found) => {
                tracing::debug!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    pattern = %found.pattern,
                    "Route matched"
                );
                let ctx = RouteContext::matched(
                    method.clone(),
                    found.pattern,
                    found.params,
                    found.tag.cloned(),
                );
                (
                    middleware::chain(found.handler, &self.middlewares),
                    ctx,
                    Outcome::Matched,
                )
            }
            None => {
                tracing::debug!(request_id = %request_id, method = %method, path = %path, "No route matched");
                (
                    Arc::clone(&self.not_found),
                    RouteContext::unmatched(method.clone()),
                    Outcome::NotFound,
                )
            }
        };

        let result = AssertUnwindSafe(async move { handler.call(req, ctx).await })
            .catch_unwind()
            .await;

        let (response, outcome) = match result {
            Ok(response) => (response, outcome),
            Err(payload) => {
                let fault = HandlerPanic::from_payload(method.clone(), path.clone(), payload);
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    panic = %fault.message,
                    "Handler panicked"
                );
                metrics::record_panic(method.as_str());
                let response = match &self.panic_handler {
                    Some(panic_handler) => {
                        std::panic::catch_unwind(AssertUnwindSafe(|| panic_handler(fault)))
                            .unwrap_or_else(|_| {
                                tracing::error!(
                                    request_id = %request_id,
                                    path = %path,
                                    "Panic handler panicked"
                                );
                                response::internal_error()
                            })
                    }
                    None => response::internal_error(),
                };
                (response, Outcome::Panicked)
            }
        };

        metrics::record_request(method.as_str(), response.status().as_u16(), outcome, start);
        response
    }
}

impl<T> Default for Mux<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
