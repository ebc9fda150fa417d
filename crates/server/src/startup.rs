use std::future::Future;

use configs::ServerConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::{self, AppState};

/// Bind the configured address and serve until Ctrl+C.
pub async fn run(cfg: &ServerConfig) -> anyhow::Result<()> {
    run_until(cfg, shutdown_signal()).await
}

/// Bind the configured address and serve until `shutdown` resolves.
async fn run_until<F>(cfg: &ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind {addr}: {e}"))?;
    serve(listener, AppState::in_memory(), shutdown).await
}

/// Serve the item routes on an already-bound listener with the given state.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = routes::build_router(state);
    let local = listener.local_addr()?;
    info!(addr = %local, "server is running on http://{}", local);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // 无法监听信号时保持运行
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
