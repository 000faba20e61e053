use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use qna_service::config::Config;
use qna_service::domain::test::models::Test;
use qna_service::domain::test::models::TestId;
use qna_service::domain::test::service::TestService;
use qna_service::domain::user::service::AuthService;
use qna_service::inbound::http::router::create_router;
use qna_service::inbound::http::router::HttpSettings;
use qna_service::outbound::cache::TtlCache;
use qna_service::outbound::events::KafkaAuditLogger;
use qna_service::outbound::repositories::PostgresRefreshSessionRepository;
use qna_service::outbound::repositories::PostgresTestRepository;
use qna_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qna_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "qna-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_strategy = ?config.token.strategy,
        cache_enabled = config.cache.enabled,
        audit_brokers = %config.audit.brokers,
        audit_topic = %config.audit.topic,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::new(config.password.secret.as_bytes())?;
    let token_manager = config.token.strategy.build(config.token.secret.as_bytes())?;
    let authenticator = Arc::new(Authenticator::new(
        password_hasher,
        token_manager,
        config.token.access_token_ttl(),
        config.token.refresh_token_ttl(),
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let session_repository = Arc::new(PostgresRefreshSessionRepository::new(pg_pool.clone()));
    let test_repository = Arc::new(PostgresTestRepository::new(pg_pool));
    let audit_logger = Arc::new(KafkaAuditLogger::new(&config.audit)?);

    let cache = config.cache.enabled.then(|| {
        tracing::info!(ttl_seconds = config.cache.ttl_seconds, "Test cache enabled");
        Arc::new(TtlCache::<TestId, Test>::new(config.cache.ttl()))
    });

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        session_repository,
        audit_logger,
        authenticator,
    ));
    let test_service = Arc::new(TestService::new(test_repository, cache));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        test_service,
        HttpSettings {
            secure_cookies: config.cookie.secure,
            request_timeout: config.server.request_timeout(),
        },
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
