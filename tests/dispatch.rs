//! End-to-end dispatch through the layered Axum router, in process.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use trie_router::http::{HttpServer, MuxService, X_REQUEST_ID};
use trie_router::ServerConfig;

mod common;

async fn request(method: Method, uri: &str) -> (StatusCode, String) {
    let router = HttpServer::new(ServerConfig::default(), MuxService::new(common::blog_mux()))
        .into_router();

    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key(X_REQUEST_ID));
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_static_routes() {
    assert_eq!(request(Method::GET, "/").await, (StatusCode::OK, "Hello World".into()));
    assert_eq!(
        request(Method::GET, "/posts").await,
        (StatusCode::OK, "GET: Get All Posts".into())
    );
    assert_eq!(
        request(Method::POST, "/posts").await,
        (StatusCode::OK, "POST: Create New Post".into())
    );
    assert_eq!(
        request(Method::GET, "/abc/efg").await,
        (StatusCode::OK, "GET: /abc/efg".into())
    );
}

#[tokio::test]
async fn test_param_routes_per_method() {
    assert_eq!(
        request(Method::GET, "/posts/123").await,
        (StatusCode::OK, "GET: Get Post With ID:123".into())
    );
    assert_eq!(
        request(Method::PATCH, "/posts/456").await,
        (StatusCode::OK, "PATCH: Update Post With ID:456".into())
    );
    assert_eq!(
        request(Method::PUT, "/posts/456").await,
        (StatusCode::OK, "PUT: Update Post With ID:456".into())
    );
    assert_eq!(
        request(Method::DELETE, "/posts/456").await,
        (StatusCode::OK, "DELETE: Delete Post With ID:456".into())
    );
}

#[tokio::test]
async fn test_wildcard_route() {
    assert_eq!(
        request(Method::GET, "/start/hello").await,
        (StatusCode::OK, "GET: action:/".into())
    );
    assert_eq!(
        request(Method::GET, "/start/hello/aaa").await,
        (StatusCode::OK, "GET: action:/aaa".into())
    );
    assert_eq!(
        request(Method::GET, "/start/hello/aaa/bbb").await,
        (StatusCode::OK, "GET: action:/aaa/bbb".into())
    );
}

#[tokio::test]
async fn test_query_string_is_ignored() {
    assert_eq!(
        request(Method::GET, "/posts/9?expand=true").await,
        (StatusCode::OK, "GET: Get Post With ID:9".into())
    );
}

#[tokio::test]
async fn test_not_found_and_panic() {
    assert_eq!(
        request(Method::GET, "/notFound").await,
        (StatusCode::NOT_FOUND, "Not Found\n".into())
    );
    assert_eq!(
        request(Method::GET, "/abc").await,
        (StatusCode::NOT_FOUND, "Not Found\n".into())
    );
    assert_eq!(
        request(Method::HEAD, "/posts/1").await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        request(Method::GET, "/error").await,
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error:Some Error Message\n".into()
        )
    );
}
