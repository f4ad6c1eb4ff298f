//! HTTP server loop

use axum::Router;
use tokio::net::TcpListener;

use crate::prelude::*;

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		warn!("Cannot listen for shutdown signal: {}", err);
		std::future::pending::<()>().await;
	}
	info!("Shutting down");
}

/// Serve `router` on the configured address until interrupted
pub async fn serve(app: App, router: Router) -> ClResult<()> {
	let listener = TcpListener::bind(app.opts.listen.as_ref()).await?;
	info!("Listening on HTTP {}", listener.local_addr()?);

	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

	Ok(())
}

// vim: ts=4
