//! Middleware chain.
//!
//! # Data Flow
//! ```text
//! mux.use_middleware(a); mux.use_middleware(b);
//!
//! request → a → b → route handler → b → a → response
//! ```
//!
//! # Design Decisions
//! - A middleware wraps a handler into a new handler
//! - The chain is built per matched request; the not-found path skips it
//! - The first registered middleware is the outermost

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::http::handler::{BoxHandler, RouteContext};

/// Wraps a handler with extra behaviour.
pub trait Middleware<T = ()>: Send + Sync + 'static {
    fn wrap(&self, next: BoxHandler<T>) -> BoxHandler<T>;
}

/// The remainder of the chain, handed to `from_fn` middlewares.
pub struct Next<T = ()> {
    inner: BoxHandler<T>,
}

impl<T: 'static> Next<T> {
    /// Run the rest of the chain.
    pub async fn run(self, req: Request<Body>, ctx: RouteContext<T>) -> Response {
        self.inner.call(req, ctx).await
    }
}

/// Middleware built from an async function. See [`from_fn`].
pub struct FromFn<F, T> {
    f: Arc<F>,
    _tag: PhantomData<fn() -> T>,
}

/// Create a middleware from an async closure taking the request, its
/// route context and the rest of the chain.
///
/// ```ignore
/// mux.use_middleware(middleware::from_fn(|req, ctx, next: Next| async move {
///     let mut response = next.run(req, ctx).await;
///     response.headers_mut().insert("x-powered-by", HeaderValue::from_static("trie-router"));
///     response
/// }));
/// ```
pub fn from_fn<F, Fut, T>(f: F) -> FromFn<F, T>
where
    F: Fn(Request<Body>, RouteContext<T>, Next<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    FromFn {
        f: Arc::new(f),
        _tag: PhantomData,
    }
}

impl<F, Fut, T> Middleware<T> for FromFn<F, T>
where
    F: Fn(Request<Body>, RouteContext<T>, Next<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
    T: 'static,
{
    fn wrap(&self, next: BoxHandler<T>) -> BoxHandler<T> {
        let f = Arc::clone(&self.f);
        Arc::new(move |req: Request<Body>, ctx: RouteContext<T>| {
            f(
                req,
                ctx,
                Next {
                    inner: Arc::clone(&next),
                },
            )
        })
    }
}

/// Wrap `handler` so that `middlewares[0]` runs first.
pub(crate) fn chain<T: 'static>(handler: &BoxHandler<T>, middlewares: &[Arc<dyn Middleware<T>>]) -> BoxHandler<T> {
    middlewares
        .iter()
        .rev()
        .fold(Arc::clone(handler), |next, middleware| middleware.wrap(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Method};
    use axum::response::IntoResponse;

    fn tagging(name: &'static str) -> Arc<dyn Middleware> {
        Arc::new(from_fn(move |req, ctx, next: Next| async move {
            let mut response = next.run(req, ctx).await;
            let trail = response
                .headers()
                .get("x-trail")
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{name},{v}"))
                .unwrap_or_else(|| name.to_string());
            response
                .headers_mut()
                .insert("x-trail", HeaderValue::from_str(&trail).unwrap());
            response
        }))
    }

    #[tokio::test]
    async fn test_first_registered_runs_outermost() {
        let handler: BoxHandler = Arc::new(|_req: Request<Body>, _ctx: RouteContext| async { "ok" });
        let wrapped = chain(&handler, &[tagging("outer"), tagging("inner")]);

        let response = wrapped
            .call(Request::new(Body::empty()), RouteContext::unmatched(Method::GET))
            .await;
        // The inner middleware sees the response first.
        assert_eq!(response.headers()["x-trail"], "outer,inner");
    }

    #[tokio::test]
    async fn test_middleware_can_short_circuit() {
        let deny: Arc<dyn Middleware> = Arc::new(from_fn(|_req, _ctx, _next: Next| async {
            axum::http::StatusCode::FORBIDDEN.into_response()
        }));
        let handler: BoxHandler = Arc::new(|_req: Request<Body>, _ctx: RouteContext| async { "secret" });

        let response = chain(&handler, &[deny])
            .call(Request::new(Body::empty()), RouteContext::unmatched(Method::GET))
            .await;
        assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
    }
}
