//! Preview server for the generated site

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Site;

/// Router serving the public directory
pub fn router(site: &Site) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(&site.public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Resolve the bind address; "localhost" binds the loopback interface
pub fn bind_addr(ip: &str, port: u16) -> Result<SocketAddr> {
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    format!("{}:{}", bind_ip, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", ip, port))
}

/// Start serving the public directory
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let addr = bind_addr(ip, port)?;
    let app = router(site);

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
