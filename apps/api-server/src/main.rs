//! api-server: HTTP API for the sellers service.
//!
//! Exposes `GET /sellers/:id` and `POST /sellers` on top of the default
//! repository and the in-memory storage from the `domain` crate. Data lives
//! for the lifetime of the process.
//!
//! Run:
//! ```bash
//! # pretty logs (default); PORT optional (default 8080)
//! cargo run -p api-server
//!
//! # JSON logs, store pre-seeded with a demo seller
//! LOG_FORMAT=json SELLERS_SEED=1 cargo run -p api-server
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.

mod config;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use domain::adapters::memory_storage::{InMemoryStorage, InMemoryStorageConfig};
use domain::repository::DefaultSellerRepository;
use domain::{Seller, Sellers};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cfg);
    cfg.log_summary();

    let storage = build_storage(&cfg);
    let state = handlers::AppState {
        repo: Arc::new(DefaultSellerRepository::new(storage)),
    };
    let app = with_middleware(handlers::router(state), &cfg);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(%addr, err = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(%addr, "api-server listening");
    if let Err(e) = axum::serve(listener, app).await {
        error!(err = %e, "server error");
        std::process::exit(1);
    }
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(fmt::time::SystemTime)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }
}

fn demo_sellers() -> Sellers {
    let john = Seller {
        id: 1,
        first_name: "John".into(),
        last_name: "Doe".into(),
        email: "johndoe@gmail.com".into(),
    };
    [(john.id, john)].into_iter().collect()
}

// Construct the storage, optionally pre-seeded.
fn build_storage(cfg: &config::Config) -> InMemoryStorage {
    let sellers = cfg.seed_demo_seller.then(demo_sellers);
    if let Some(s) = &sellers {
        info!(count = s.len(), "seeding in-memory storage");
    }
    InMemoryStorage::new(Some(InMemoryStorageConfig { sellers }))
}

// Request id, tracing span per request, and CORS around the routes.
fn with_middleware(routes: Router, cfg: &config::Config) -> Router {
    let x_request_id = axum::http::HeaderName::from_static("x-request-id");

    let cors = if cfg.cors_allow_origin == HeaderValue::from_static("*") {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([cfg.cors_allow_origin.clone()]))
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    };

    routes
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(cors)
}
