mod api;
mod middleware;

use tracing_subscriber::EnvFilter;

use crate::{api::build_app, middleware::RateLimitState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = safemap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let index = config.static_root.join("index.html");
    if !index.is_file() {
        anyhow::ensure!(
            !config.env.is_production(),
            "{} not found; set SAFEMAP_STATIC_ROOT",
            index.display()
        );
        tracing::warn!(path = %index.display(), "entry page missing, / will return 404");
    }

    let rate_limit = RateLimitState::per_minute(config.rate_limit_per_minute);
    let app = build_app(&config.static_root, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        static_root = %config.static_root.display(),
        "server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "ctrl-c",
        () = terminate => "terminate",
    };

    tracing::info!(signal, "shutting down, draining open connections");
}
