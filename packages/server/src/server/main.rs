// Main entry point for the Company Hub server

use std::sync::Arc;

use anyhow::{Context, Result};
use company_hub::{
    domains::auth::{activities::seed_admin, JwtService, LoginThrottle},
    kernel::{scheduled_tasks::start_scheduler, ServerDeps},
    server::{build_app, AppOptions},
    Config,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,company_hub=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Company Hub");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    company_hub::MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let server_deps =
        ServerDeps::from_config(pool, &config).context("Failed to build server dependencies")?;

    if let Some(seed) = &config.admin_seed {
        seed_admin(seed, &server_deps)
            .await
            .context("Failed to seed admin user")?;
    }

    // Keep the handle alive for the lifetime of the server
    let _scheduler = start_scheduler(server_deps.clone())
        .await
        .context("Failed to start scheduler")?;

    let app = build_app(
        server_deps,
        JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()),
        Arc::new(LoginThrottle::new()),
        AppOptions::from_config(&config),
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Panel: http://localhost:{}/company-hub", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
