use std::sync::Arc;

use auth_service::config::Config;
use auth_service::domain::auth::service::AuthService;
use auth_service::domain::auth::token::TokenService;
use auth_service::domain::user::service::UserService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::PostgresAuthRepository;
use auth_service::outbound::repositories::PostgresUserRepository;
use auth_service::outbound::session::PostgresSessionStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        session_idle_seconds = config.session.idle_seconds,
        session_lifetime_seconds = config.session.lifetime_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let auth_repository = Arc::new(PostgresAuthRepository::new(pg_pool.clone()));
    let auth_service = Arc::new(AuthService::new(auth_repository));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let user_service = Arc::new(UserService::new(user_repository));

    let token_service = Arc::new(TokenService::new(config.auth.hmac_secret.as_bytes()));
    let session_store = Arc::new(PostgresSessionStore::new(pg_pool, &config.session));
    tracing::info!(backend = "postgresql", "Session storage initialized");

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, user_service, token_service, session_store);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
