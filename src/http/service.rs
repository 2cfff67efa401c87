//! Tower service over a frozen mux.
//!
//! # Design Decisions
//! - The mux is immutable once published; lookups need no locks
//! - `reload` swaps in a rebuilt mux with a single pointer publish
//! - In-flight requests finish on the snapshot they started with

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::{BoxFuture, FutureExt};
use tower::Service;

use crate::http::mux::Mux;

/// Cloneable handle serving requests from the current mux.
pub struct MuxService<T = ()> {
    current: Arc<ArcSwap<Mux<T>>>,
}

impl<T> MuxService<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(mux: Mux<T>) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(mux)),
        }
    }

    /// Publish a rebuilt mux. Clones of this service observe it too.
    pub fn reload(&self, mux: Mux<T>) {
        let routes = mux.routes().len();
        self.current.store(Arc::new(mux));
        tracing::info!(routes, "Routing table reloaded");
    }

    /// The mux currently serving requests.
    pub fn snapshot(&self) -> Arc<Mux<T>> {
        self.current.load_full()
    }

    pub async fn dispatch(&self, req: Request<Body>) -> Response {
        self.snapshot().dispatch(req).await
    }
}

impl<T> Clone for MuxService<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<T> From<Mux<T>> for MuxService<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn from(mux: Mux<T>) -> Self {
        Self::new(mux)
    }
}

impl<T> Service<Request<Body>> for MuxService<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mux = self.snapshot();
        async move { Ok(mux.dispatch(req).await) }.boxed()
    }
}
