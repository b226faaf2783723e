use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{Permission, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    Collaborator,
}

impl UserRole {
    pub fn can(&self, permission: Permission) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Collaborator => !permission.requires_admin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// Panel user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Look a user up by username or email, whichever the login form sent
    pub async fn find_by_login(login: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, Self>(
            "SELECT * FROM users WHERE username = $1 OR LOWER(email) = LOWER($1) LIMIT 1",
        )
        .bind(login)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    /// Active admins receive downtime alerts
    pub async fn find_active_admins(pool: &PgPool) -> Result<Vec<Self>> {
        let users = sqlx::query_as::<_, Self>(
            "SELECT * FROM users WHERE role = 'admin' AND status = 'active' ORDER BY created_at",
        )
        .fetch_all(pool)
        .await?;
        Ok(users)
    }

    pub async fn count_admins(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'admin'")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn create(input: CreateUser, pool: &PgPool) -> Result<Self> {
        let user = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, username, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}
