//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use tokio::net::TcpListener;

use trie_router::http::{HttpServer, Mux, MuxService, RouteContext};
use trie_router::{ServerConfig, Shutdown};

/// The route table from the blog example, with custom 404/500 bodies.
#[allow(dead_code)]
pub fn blog_mux() -> Mux {
    let mut mux: Mux = Mux::new();
    mux.set_not_found(|_req: Request<Body>, _ctx: RouteContext| async {
        (StatusCode::NOT_FOUND, "Not Found\n")
    });
    mux.set_panic_handler(|fault| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal Server Error:{}\n", fault.message),
        )
            .into_response()
    });

    mux.get("/", |_req, _ctx: RouteContext| async { "Hello World" })
        .unwrap();
    mux.get("/posts", |_req, _ctx: RouteContext| async { "GET: Get All Posts" })
        .unwrap();
    mux.get("/posts/:id", |_req, ctx: RouteContext| async move {
        format!("GET: Get Post With ID:{}", ctx.param("id").unwrap())
    })
    .unwrap();
    mux.get("/start/hello/*action", |_req, ctx: RouteContext| async move {
        format!("GET: action:{}", ctx.param("action").unwrap())
    })
    .unwrap();
    mux.post("/posts", |_req, _ctx: RouteContext| async { "POST: Create New Post" })
        .unwrap();
    mux.patch("/posts/:id", |_req, ctx: RouteContext| async move {
        format!("PATCH: Update Post With ID:{}", ctx.param("id").unwrap())
    })
    .unwrap();
    mux.put("/posts/:id", |_req, ctx: RouteContext| async move {
        format!("PUT: Update Post With ID:{}", ctx.param("id").unwrap())
    })
    .unwrap();
    mux.delete("/posts/:id", |_req, ctx: RouteContext| async move {
        format!("DELETE: Delete Post With ID:{}", ctx.param("id").unwrap())
    })
    .unwrap();
    mux.get("/error", |_req, _ctx: RouteContext| async {
        if true {
            panic!("Some Error Message");
        }
        "unreachable"
    })
    .unwrap();
    mux.get("/abc/efg", |_req, _ctx: RouteContext| async { "GET: /abc/efg" })
        .unwrap();

    mux
}

/// Serve `service` on an ephemeral port. Trigger the returned `Shutdown`
/// to stop it.
#[allow(dead_code)]
pub async fn start_server(service: MuxService) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(ServerConfig::default(), service);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}
