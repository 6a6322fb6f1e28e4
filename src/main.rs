use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use config::Config;
use ngrok::{prelude::TunnelBuilder, tunnel::UrlTunnel};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[macro_use]
extern crate lazy_static;

mod classifier;
mod config;
mod delivery;
mod error;
mod generation;
mod types;
mod webhook;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub http: reqwest::Client,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(webhook::health))
        .route(
            "/webhook",
            get(webhook::verify_webhook).post(webhook::post_webhook),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;
    let port = cfg.port;
    let dev = cfg.is_dev();
    let ngrok_authtoken = cfg.ngrok_authtoken.clone();

    let app = router(AppState {
        cfg: Arc::new(cfg),
        http: reqwest::Client::new(),
    });

    // Use ngrok in dev mode so Meta can reach a local machine
    if dev {
        let authtoken = ngrok_authtoken
            .ok_or_else(|| anyhow::anyhow!("NGROK_AUTHTOKEN is required when ENVIRONMENT=dev"))?;
        let tun = ngrok::Session::builder()
            .authtoken(authtoken)
            .connect()
            .await?
            // Start a tunnel with an HTTP edge
            .http_endpoint()
            .listen()
            .await?;
        tracing::info!("Ngrok tunnel started on URL: {}", tun.url());

        axum::Server::builder(tun)
            .serve(app.into_make_service())
            .await?;
    } else {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("Serving HTTP traffic on {addr}");
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await?;
    }

    Ok(())
}
