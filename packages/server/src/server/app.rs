//! Application setup and server configuration.

use std::net::IpAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::{JwtService, LoginThrottle};
use crate::kernel::ServerDeps;
use crate::server::middleware::{extract_client_ip, jwt_auth_middleware, TrustedProxies};
use crate::server::routes::{api_router, health_handler};
use crate::server::shell::{shell_router, ShellConfig};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
    pub login_throttle: Arc<LoginThrottle>,
    pub shell: Arc<ShellConfig>,
}

/// Router knobs that come from configuration
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub allowed_origins: Vec<String>,
    /// Requests per second per client IP across `/api/v1`; `None` leaves it unlimited
    pub rate_limit_per_second: Option<u64>,
    pub trusted_proxies: Vec<IpAddr>,
    pub shell: ShellConfig,
}

impl AppOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            allowed_origins: config.allowed_origins.clone(),
            rate_limit_per_second: config.rate_limit_per_second,
            trusted_proxies: config.trusted_proxies.clone(),
            shell: ShellConfig {
                site_url: config.public_url.trim_end_matches('/').to_string(),
                enabled_modules: config.enabled_modules.clone(),
            },
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// One token comes back every `1000 / n` ms, i.e. `n` per second
fn replenish_period_ms(per_second: u64) -> u64 {
    (1000 / per_second).max(1)
}

/// Two seconds' worth of requests
fn burst_size(per_second: u64) -> u32 {
    u32::try_from(per_second.saturating_mul(2)).unwrap_or(u32::MAX)
}

/// Build the Axum application router
///
/// ```text
/// /health                 database + pool status
/// /api/v1/...             JSON REST API (bearer token)
/// /company-hub[/{page}]   SPA shell
/// /company-hub/assets/*   embedded SPA assets
/// ```
pub fn build_app(
    server_deps: ServerDeps,
    jwt_service: JwtService,
    login_throttle: Arc<LoginThrottle>,
    options: AppOptions,
) -> Router {
    let jwt_service = Arc::new(jwt_service);

    let app_state = AxumAppState {
        db_pool: server_deps.db_pool.clone(),
        server_deps: Arc::new(server_deps),
        jwt_service: jwt_service.clone(),
        login_throttle,
        shell: Arc::new(options.shell),
    };

    let mut api = api_router();

    // Per-IP request budget for the API, keyed on the socket peer
    if let Some(per_second) = options.rate_limit_per_second.filter(|n| *n > 0) {
        match GovernorConfigBuilder::default()
            .per_millisecond(replenish_period_ms(per_second))
            .burst_size(burst_size(per_second))
            .use_headers()
            .finish()
        {
            Some(config) => {
                api = api.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => tracing::warn!(per_second, "Invalid rate limit, limiter disabled"),
        }
    }

    let jwt_service_for_middleware = jwt_service;
    let trusted_proxies = Arc::new(TrustedProxies::new(options.trusted_proxies));

    Router::new()
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        .nest("/api/v1", api)
        .merge(shell_router())
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(middleware::from_fn(move |req, next| {
            extract_client_ip(trusted_proxies.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_is_expressed_as_a_period() {
        assert_eq!(replenish_period_ms(10), 100);
        assert_eq!(replenish_period_ms(1), 1000);
        assert_eq!(replenish_period_ms(5000), 1);
        assert_eq!(burst_size(10), 20);
    }
}
