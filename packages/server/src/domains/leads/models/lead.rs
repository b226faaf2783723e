use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{LeadId, UserId};

/// Pipeline position: new -> contacted -> qualified -> converted | lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub assigned_to: Option<UserId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lead joined with the assignee's username
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeadWithAssignee {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub lead: Lead,
    pub assigned_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateLead {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub assigned_to: Option<UserId>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateLead {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<UserId>,
    pub notes: Option<String>,
}

impl Lead {
    pub async fn create(input: CreateLead, pool: &PgPool) -> Result<Self> {
        let lead = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO leads (id, name, email, phone, company, source, status, assigned_to, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(LeadId::new())
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.company)
        .bind(&input.source)
        .bind(input.status)
        .bind(input.assigned_to)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;
        Ok(lead)
    }

    pub async fn find_by_id(id: LeadId, pool: &PgPool) -> Result<Option<Self>> {
        let lead = sqlx::query_as::<_, Self>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(lead)
    }

    /// Newest first, optionally narrowed to one pipeline status
    pub async fn list_with_assignee(
        status: Option<LeadStatus>,
        pool: &PgPool,
    ) -> Result<Vec<LeadWithAssignee>> {
        let leads = sqlx::query_as::<_, LeadWithAssignee>(
            r#"
            SELECT l.*, u.username AS assigned_name
            FROM leads l
            LEFT JOIN users u ON u.id = l.assigned_to
            WHERE ($1::lead_status IS NULL OR l.status = $1)
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;
        Ok(leads)
    }

    pub async fn update(id: LeadId, input: UpdateLead, pool: &PgPool) -> Result<Option<Self>> {
        let lead = sqlx::query_as::<_, Self>(
            r#"
            UPDATE leads SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                company = COALESCE($5, company),
                source = COALESCE($6, source),
                status = COALESCE($7, status),
                assigned_to = COALESCE($8, assigned_to),
                notes = COALESCE($9, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.company)
        .bind(&input.source)
        .bind(input.status)
        .bind(input.assigned_to)
        .bind(&input.notes)
        .fetch_optional(pool)
        .await?;
        Ok(lead)
    }

    pub async fn delete(id: LeadId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_all(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Leads still in `new` that arrived within the last `days`
    pub async fn count_new_since(days: i32, pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM leads
            WHERE status = 'new' AND created_at >= NOW() - make_interval(days => $1)
            "#,
        )
        .bind(days)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
