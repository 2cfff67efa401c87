//! Demo server for the trie router.
//!
//! Serves a small blog-style route table so the matching rules can be
//! poked at with curl:
//!
//! ```text
//! GET    /                        Hello World
//! GET    /posts                   list
//! POST   /posts                   create
//! GET    /posts/:id               show
//! PUT    /posts/:id               replace
//! PATCH  /posts/:id               update
//! DELETE /posts/:id               delete
//! GET    /start/hello/*action     wildcard capture
//! GET    /error                   panics, recovered as 500
//! ANY    /health                  no-op 200
//! GET    /routes                  registered routes as JSON
//! ```

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use clap::Parser;
use tokio::net::TcpListener;

use trie_router::config::{load_config, validate_config, ConfigError, ServerConfig};
use trie_router::http::{HttpServer, Mux, MuxService, RouteContext};
use trie_router::lifecycle::{signals, Shutdown};
use trie_router::observability::{logging, metrics};
use trie_router::routing::{RouteError, ANY};

#[derive(Parser)]
#[command(name = "trie-router")]
#[command(about = "Demo HTTP server for the trie router", long_about = None)]
struct Cli {
    /// Optional TOML file with server settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the log level.
    #[arg(long)]
    log_level: Option<String>,
}

fn load(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn build_mux() -> Result<Mux, RouteError> {
    let mut mux: Mux = Mux::new();

    mux.get("/", |_req, _ctx: RouteContext| async { "Hello World" })?
        .get("/posts", |_req, _ctx: RouteContext| async { "GET: Get All Posts" })?
        .post("/posts", |_req, _ctx: RouteContext| async { "POST: Create New Post" })?
        .get("/posts/:id", |_req, ctx: RouteContext| async move {
            format!("GET: Get Post With ID:{}", ctx.param("id").unwrap_or_default())
        })?
        .put("/posts/:id", |_req, ctx: RouteContext| async move {
            format!("PUT: Update Post With ID:{}", ctx.param("id").unwrap_or_default())
        })?
        .patch("/posts/:id", |_req, ctx: RouteContext| async move {
            format!("PATCH: Update Post With ID:{}", ctx.param("id").unwrap_or_default())
        })?
        .delete("/posts/:id", |_req, ctx: RouteContext| async move {
            format!("DELETE: Delete Post With ID:{}", ctx.param("id").unwrap_or_default())
        })?
        .get("/start/hello/*action", |_req, ctx: RouteContext| async move {
            format!("GET: action:{}", ctx.param("action").unwrap_or_default())
        })?
        .get("/error", |_req, _ctx: RouteContext| async {
            if true {
                panic!("Some Error Message");
            }
            "unreachable"
        })?
        .handle_noop(ANY, "/health", None)?;

    let listing = mux.routes();
    mux.get("/routes", move |_req, _ctx: RouteContext| {
        let listing = listing.clone();
        async move { Json(listing) }
    })?;

    mux.set_not_found(|req: Request<Body>, _ctx: RouteContext| async move {
        tracing::warn!(path = %req.uri().path(), "No route matched");
        (StatusCode::NOT_FOUND, "Not Found\n")
    });
    mux.set_panic_handler(|fault| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal Server Error:{}\n", fault.message),
        )
            .into_response()
    });

    Ok(mux)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init_logging(&config.observability)?;
    tracing::info!("trie-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let mux = build_mux()?;
    tracing::info!(routes = mux.routes().len(), "Routes registered");

    let server = HttpServer::new(config, MuxService::new(mux));
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
