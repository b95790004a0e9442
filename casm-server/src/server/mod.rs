mod handlers;
mod router;
mod state;

pub use router::create_router;
pub use state::{Admission, AppState};

use crate::Result;

/// Run the HTTP server
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config().server_addr();
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("CASM playground listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

