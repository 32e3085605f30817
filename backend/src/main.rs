//! Backend entry-point: wires the greeter, the callable deletion endpoint,
//! and the health probes.

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use reqwest::Url;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::{ServerConfig, create_server};

fn optional_url(var: &str) -> std::io::Result<Option<Url>> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| std::io::Error::other(format!("invalid {var}: {e}"))),
        Err(_) => Ok(None),
    }
}

fn config_from_env() -> std::io::Result<ServerConfig> {
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let mut config = ServerConfig::new(bind_addr);
    let directory = optional_url("DIRECTORY_BASE_URL")?;
    let identity = optional_url("IDENTITY_BASE_URL")?;
    match (directory, identity) {
        (Some(directory), Some(identity)) => {
            config = config.with_backends(directory, identity);
        }
        (None, None) => {}
        _ => {
            return Err(std::io::Error::other(
                "DIRECTORY_BASE_URL and IDENTITY_BASE_URL must be set together",
            ));
        }
    }
    if let Ok(message) = env::var("DELETE_CONFIRMATION_MESSAGE") {
        config = config.with_confirmation_message(message);
    }
    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = config_from_env()?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
