//! Handler abstraction.
//!
//! Handlers receive the resolution result as an explicit argument instead of
//! digging it out of request extensions.

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};

use crate::routing::Params;

/// Shared, type-erased handler.
pub type BoxHandler<T = ()> = Arc<dyn Handler<T>>;

/// What the router resolved for one request.
#[derive(Debug, Clone)]
pub struct RouteContext<T = ()> {
    method: Method,
    pattern: Option<String>,
    params: Params,
    tag: Option<T>,
}

impl<T> RouteContext<T> {
    pub(crate) fn matched(method: Method, pattern: &str, params: Params, tag: Option<T>) -> Self {
        Self {
            method,
            pattern: Some(pattern.to_string()),
            params,
            tag,
        }
    }

    /// Context handed to the not-found handler.
    pub(crate) fn unmatched(method: Method) -> Self {
        Self {
            method,
            pattern: None,
            params: Params::new(),
            tag: None,
        }
    }

    /// Get a captured path parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The tag attached to the route at registration.
    pub fn tag(&self) -> Option<&T> {
        self.tag.as_ref()
    }

    /// The pattern that matched, `None` for unmatched requests.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

/// A request handler.
pub trait Handler<T = ()>: Send + Sync + 'static {
    fn call(&self, req: Request<Body>, ctx: RouteContext<T>) -> BoxFuture<'static, Response>;
}

impl<F, Fut, R, T> Handler<T> for F
where
    F: Fn(Request<Body>, RouteContext<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, req: Request<Body>, ctx: RouteContext<T>) -> BoxFuture<'static, Response> {
        let fut = self(req, ctx);
        async move { fut.await.into_response() }.boxed()
    }
}

/// Handler used for routes registered without business logic.
pub fn noop<T: 'static>() -> BoxHandler<T> {
    Arc::new(|_req: Request<Body>, _ctx: RouteContext<T>| async { StatusCode::OK })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closure_handler() {
        let handler: BoxHandler<&'static str> =
            Arc::new(|_req: Request<Body>, ctx: RouteContext<&'static str>| async move {
                format!("{}:{}", ctx.param("id").unwrap_or("-"), ctx.tag().unwrap_or(&"-"))
            });

        let params: Params = [("id", "7")].into_iter().collect();
        let ctx = RouteContext::matched(Method::GET, "/posts/:id", params, Some("show"));
        let response = handler.call(Request::new(Body::empty()), ctx).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"7:show");
    }

    #[tokio::test]
    async fn test_handler_future_runs_on_spawned_task() {
        let handler: BoxHandler = Arc::new(|_req: Request<Body>, ctx: RouteContext| async move {
            ctx.param("id").unwrap_or("-").to_string()
        });

        let params: Params = [("id", "42")].into_iter().collect();
        let ctx = RouteContext::matched(Method::GET, "/posts/:id", params, None);
        let response = tokio::spawn(handler.call(Request::new(Body::empty()), ctx))
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"42");
    }

    #[tokio::test]
    async fn test_noop_handler() {
        let response = noop::<()>()
            .call(Request::new(Body::empty()), RouteContext::unmatched(Method::GET))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_unmatched_context_is_empty() {
        let ctx: RouteContext = RouteContext::unmatched(Method::POST);
        assert!(ctx.params().is_empty());
        assert!(ctx.pattern().is_none());
        assert!(ctx.tag().is_none());
        assert_eq!(*ctx.method(), Method::POST);
    }
}
