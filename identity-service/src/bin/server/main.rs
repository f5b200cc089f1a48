use std::sync::Arc;
use std::time::Duration;

use auth::SessionConfig;
use auth::SessionStore;
use auth::TokenIssuer;
use identity_service::config::Config;
use identity_service::domain::user::ports::AuthServicePort;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::inbound::http::router::SessionCookie;
use identity_service::outbound::directory::InMemoryUserDirectory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_algorithm = %config.token.algorithm,
        token_expiration_minutes = config.token.expiration_minutes,
        session_expiration_minutes = config.session.expiration_minutes,
        session_cookie = %config.session.cookie_name,
        cookie_secure = config.session.cookie_secure,
        users = config.users.len(),
        "Configuration loaded"
    );

    let directory = Arc::new(InMemoryUserDirectory::from_config(&config.users)?);
    tracing::info!(users = directory.len(), "User directory loaded");

    let token_issuer = Arc::new(TokenIssuer::new(
        config.token.secret.as_bytes(),
        &config.token.algorithm,
        chrono::Duration::minutes(config.token.expiration_minutes),
    )?);

    let session_store = Arc::new(SessionStore::new(SessionConfig {
        ttl: chrono::Duration::minutes(config.session.expiration_minutes),
        id_bytes: config.session.id_bytes,
    })?);

    let auth_service = Arc::new(AuthService::new(directory, token_issuer, session_store)?);

    let sweep_interval = Duration::from_secs(config.session.sweep_interval_seconds);
    let sweeper = {
        let auth_service = Arc::clone(&auth_service);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(sweep_interval);
            loop {
                interval.tick().await;
                let purged = auth_service.purge_expired_sessions();
                if purged > 0 {
                    tracing::debug!(purged, "Expired sessions purged");
                }
            }
        })
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        Arc::clone(&auth_service),
        SessionCookie {
            name: config.session.cookie_name.clone(),
            secure: config.session.cookie_secure,
        },
    );

    match axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        Ok(()) => tracing::info!("Server exited successfully"),
        Err(e) => tracing::error!(error = %e, "Server error"),
    };

    sweeper.abort();
    auth_service.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
