//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container and one migration run are shared by every test in
//! the binary. When Docker is not available the harness reports that once and
//! database tests return early.

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use company_hub::domains::auth::models::Session;
use company_hub::domains::auth::{JwtService, LoginThrottle, User};
use company_hub::kernel::{ServerDeps, TestDependencies};
use company_hub::server::{build_app, AppOptions};

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// `None` once startup failed, so later tests skip without retrying
static SHARED_INFRA: OnceCell<Option<SharedTestInfra>> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        company_hub::MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> Option<&'static Self> {
        SHARED_INFRA
            .get_or_init(|| async {
                match Self::init().await {
                    Ok(infra) => Some(infra),
                    Err(e) => {
                        eprintln!("Skipping database tests: {:#}", e);
                        None
                    }
                }
            })
            .await
            .as_ref()
    }
}

/// Per-test handle on the shared database plus mockable dependencies.
pub struct TestHarness {
    pub db_pool: PgPool,
    pub deps: TestDependencies,
    pub jwt: JwtService,
    pub throttle: Arc<LoginThrottle>,
}

impl TestHarness {
    /// `None` when Docker is unavailable
    pub async fn try_new() -> Option<Self> {
        Self::with_deps(TestDependencies::new()).await
    }

    pub async fn with_deps(deps: TestDependencies) -> Option<Self> {
        let infra = SharedTestInfra::get().await?;
        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .expect("Failed to connect to test database");

        Some(Self {
            db_pool,
            deps,
            jwt: JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string()),
            throttle: Arc::new(LoginThrottle::new()),
        })
    }

    pub fn server_deps(&self) -> ServerDeps {
        self.deps.server_deps(self.db_pool.clone())
    }

    /// Full router wired to the mocks, rate limiter off
    pub fn app(&self) -> Router {
        build_app(
            self.server_deps(),
            self.jwt.clone(),
            self.throttle.clone(),
            AppOptions::default(),
        )
    }

    /// Bearer token backed by a session row, as a real login would leave it
    pub async fn token_for(&self, user: &User) -> String {
        let issued = self
            .jwt
            .create_token(user.id.into_uuid(), &user.username, user.role)
            .expect("token");
        Session::create(&issued.jti, user.id, None, None, issued.expires_at, &self.db_pool)
            .await
            .expect("session");
        issued.token
    }
}

/// Unwraps the harness or returns from the test when Docker is missing
#[macro_export]
macro_rules! harness_or_skip {
    () => {
        match $crate::common::TestHarness::try_new().await {
            Some(harness) => harness,
            None => return,
        }
    };
    ($deps:expr) => {
        match $crate::common::TestHarness::with_deps($deps).await {
            Some(harness) => harness,
            None => return,
        }
    };
}
