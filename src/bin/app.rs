use adapter::{
    database::{connect_database_with, ConnectionPool},
    redis::RedisClient,
};
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use kernel::{
    model::{role::Role, user::event::CreateUser},
    repository::user::UserRepository,
};
use registry::{AppRegistry, AppRegistryImpl};
use shared::{
    config::{AppConfig, InitialAdminConfig},
    env::{which, Environment},
};
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{self, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_headers(cors::Any)
        .allow_methods(cors::Any)
        .allow_origin(cors::Any)
}

async fn bootstrap() -> Result<()> {
    let mut app_config = AppConfig::new()?;
    let port = app_config.server.port;
    let initial_admin = app_config.initial_admin.take();

    let pool = connect_database_with(&app_config.database);
    migrate(&pool).await?;
    let kv = Arc::new(RedisClient::new(&app_config.redis)?);
    kv.try_connect().await.context("Redis is not reachable")?;

    let registry: AppRegistry = Arc::new(AppRegistryImpl::new(pool, kv, app_config));
    if let Some(admin) = initial_admin {
        ensure_initial_admin(registry.user_repository().as_ref(), admin).await?;
    }

    let app = Router::new()
        .merge(v1::routes())
        .layer(cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,error.message = %e, "Unexpected error"
            )
        })
}

async fn migrate(pool: &ConnectionPool) -> Result<()> {
    pool.migrate()
        .await
        .context("Failed to apply database migrations")
}

/// Creates the first administrator unless its email is already taken.
async fn ensure_initial_admin(
    users: &dyn UserRepository,
    admin: InitialAdminConfig,
) -> Result<()> {
    if users.find_by_email(&admin.email).await?.is_some() {
        return Ok(());
    }

    let created = users
        .create(CreateUser {
            name: "Administrador".into(),
            email: Some(admin.email),
            role: Role::Admin,
            dni: None,
            password: Some(admin.password),
        })
        .await?;
    tracing::info!(user_id = %created.id, "initial administrator created");
    Ok(())
}
