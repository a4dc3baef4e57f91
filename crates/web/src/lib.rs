pub use crate::common::RouteResult;

use std::{
    env,
    net::SocketAddr,
    time::{Duration, Instant},
};

use axum::{extract::FromRef, routing::on, Router};
use tokio::net::TcpListener;
use tracks::{resolver::TrackInfoResolver, store::TrackStore};

use crate::common::{route_not_found, METHOD_FILTER_ALL};

pub mod api;
pub mod common;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub port: u16,
    /// Upper bound for downloading and reading a single flight log.
    pub fetch_timeout: Duration,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl WebConfig {
    /// Reads `PORT` and `TRACK_FETCH_TIMEOUT_SECS`. Unset variables fall back to
    /// the defaults, variables that are set but can't be parsed give `None`.
    pub fn from_env() -> Option<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var("PORT") {
            Some(port) => port.trim().parse().ok()?,
            None => DEFAULT_PORT,
        };
        let fetch_timeout_secs: u64 = match var("TRACK_FETCH_TIMEOUT_SECS") {
            Some(secs) => secs.trim().parse().ok()?,
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };
        Some(Self {
            port,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[derive(Clone, FromRef)]
pub struct WebState {
    pub store: TrackStore,
    pub resolver: TrackInfoResolver,
    pub started: Instant,
}

impl WebState {
    pub fn new(resolver: TrackInfoResolver) -> Self {
        Self {
            store: resolver.store().clone(),
            resolver,
            started: Instant::now(),
        }
    }
}

pub fn app(state: WebState) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

pub async fn start_web_server(config: &WebConfig, state: WebState) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.address()).await?;
    log::info!(
        "listening on {}, fetch timeout {}s",
        listener.local_addr()?,
        config.fetch_timeout.as_secs()
    );
    axum::serve(listener, app(state).into_make_service()).await?;

    Ok(())
}
