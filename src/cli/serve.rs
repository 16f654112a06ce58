use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::ProspectorConfig;
use crate::errors::ProspectorError;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, config: ProspectorConfig) -> Result<(), ProspectorError> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    info!(host = %host, port, "Starting dashboard server");

    let state = api::create_app_state(&config).await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ProspectorError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
