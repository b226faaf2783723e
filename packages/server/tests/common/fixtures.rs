//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use company_hub::domains::auth::models::{CreateUser, User, UserRole};
use company_hub::domains::auth::password::hash_password;
use company_hub::domains::sites::models::{CreateSite, Site};
use sqlx::PgPool;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Create a user with a unique name and `TEST_PASSWORD`
pub async fn create_test_user(pool: &PgPool, role: UserRole) -> Result<User> {
    let suffix = Uuid::new_v4().simple().to_string();
    User::create(
        CreateUser {
            username: format!("user_{}", &suffix[..12]),
            email: format!("{}@example.com", &suffix[..12]),
            password_hash: hash_password(TEST_PASSWORD)?,
            role,
        },
        pool,
    )
    .await
}

pub async fn create_test_admin(pool: &PgPool) -> Result<User> {
    create_test_user(pool, UserRole::Admin).await
}

/// Active site with uptime alerts on
pub async fn create_test_site(pool: &PgPool, name: &str, url: &str) -> Result<Site> {
    Site::create(
        CreateSite {
            name: name.to_string(),
            primary_url: url.to_string(),
            uptime_alerts: true,
            ..Default::default()
        },
        pool,
    )
    .await
}
