use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{SiteId, UserId};

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "hosting_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HostingType {
    #[default]
    Shared,
    Vps,
    Dedicated,
    Cloud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "indexation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IndexationStatus {
    Indexed,
    NotIndexed,
    Partial,
    #[default]
    Unknown,
}

/// Operational status. Deletion is tracked separately in `deleted_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "site_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "ssl_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SslStatus {
    #[default]
    Valid,
    Invalid,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "dns_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DnsStatus {
    #[default]
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "uptime_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UptimeStatus {
    Up,
    Down,
    #[default]
    Unknown,
}

impl UptimeStatus {
    pub fn from_probe(is_up: bool) -> Self {
        if is_up {
            UptimeStatus::Up
        } else {
            UptimeStatus::Down
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// Managed site. Credential columns hold encrypted blobs, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Site {
    pub id: SiteId,

    // Identity
    pub name: String,
    pub primary_url: String,
    pub other_urls: Option<String>,
    pub category: Option<String>,
    pub cms: Option<String>,

    // Hosting
    pub server: Option<String>,
    pub hosting_provider: Option<String>,
    pub hosting_type: HostingType,

    // People
    pub responsible_user_id: Option<UserId>,
    pub team_members: Option<String>,
    pub external_providers: Option<String>,

    // Encrypted credentials
    pub ftp_credentials: Option<String>,
    pub ssh_credentials: Option<String>,
    pub db_credentials: Option<String>,

    // Tracking
    pub google_analytics_id: Option<String>,
    pub search_console_url: Option<String>,
    pub tag_manager_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub webhook_urls: Option<String>,

    // SEO
    pub main_keywords: Option<String>,
    pub backlinks_count: i32,
    pub last_audit_date: Option<NaiveDate>,
    pub indexation_status: IndexationStatus,

    // Money
    pub hosting_cost: Decimal,
    pub extra_costs: Decimal,
    pub estimated_revenue: Decimal,
    pub roi: Decimal,

    // Health
    pub status: SiteStatus,
    pub ssl_status: SslStatus,
    pub dns_status: DnsStatus,
    pub domain_expiry: Option<NaiveDate>,
    pub uptime_status: UptimeStatus,
    pub last_uptime_check: Option<DateTime<Utc>>,
    pub uptime_alerts: bool,
    pub internal_notes: Option<String>,

    // Timestamps
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Site joined with the responsible user's name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteWithResponsible {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub site: Site,
    pub responsible_name: Option<String>,
}

/// Input for creating a site (credentials already encrypted)
#[derive(Debug, Clone, Default)]
pub struct CreateSite {
    pub name: String,
    pub primary_url: String,
    pub other_urls: Option<String>,
    pub category: Option<String>,
    pub cms: Option<String>,
    pub server: Option<String>,
    pub hosting_provider: Option<String>,
    pub hosting_type: HostingType,
    pub responsible_user_id: Option<UserId>,
    pub team_members: Option<String>,
    pub external_providers: Option<String>,
    pub ftp_credentials: Option<String>,
    pub ssh_credentials: Option<String>,
    pub db_credentials: Option<String>,
    pub google_analytics_id: Option<String>,
    pub search_console_url: Option<String>,
    pub tag_manager_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub webhook_urls: Option<String>,
    pub main_keywords: Option<String>,
    pub backlinks_count: i32,
    pub last_audit_date: Option<NaiveDate>,
    pub indexation_status: IndexationStatus,
    pub hosting_cost: Decimal,
    pub extra_costs: Decimal,
    pub estimated_revenue: Decimal,
    pub roi: Decimal,
    pub status: SiteStatus,
    pub ssl_status: SslStatus,
    pub dns_status: DnsStatus,
    pub domain_expiry: Option<NaiveDate>,
    pub uptime_alerts: bool,
    pub internal_notes: Option<String>,
}

/// Input for updating a site; `None` keeps the stored value and `Some("")`
/// clears a nullable text column
#[derive(Debug, Clone, Default)]
pub struct UpdateSite {
    pub name: Option<String>,
    pub primary_url: Option<String>,
    pub other_urls: Option<String>,
    pub category: Option<String>,
    pub cms: Option<String>,
    pub server: Option<String>,
    pub hosting_provider: Option<String>,
    pub hosting_type: Option<HostingType>,
    pub responsible_user_id: Option<UserId>,
    pub team_members: Option<String>,
    pub external_providers: Option<String>,
    pub ftp_credentials: Option<String>,
    pub ssh_credentials: Option<String>,
    pub db_credentials: Option<String>,
    pub google_analytics_id: Option<String>,
    pub search_console_url: Option<String>,
    pub tag_manager_id: Option<String>,
    pub facebook_pixel_id: Option<String>,
    pub webhook_urls: Option<String>,
    pub main_keywords: Option<String>,
    pub backlinks_count: Option<i32>,
    pub last_audit_date: Option<NaiveDate>,
    pub indexation_status: Option<IndexationStatus>,
    pub hosting_cost: Option<Decimal>,
    pub extra_costs: Option<Decimal>,
    pub estimated_revenue: Option<Decimal>,
    pub roi: Option<Decimal>,
    pub status: Option<SiteStatus>,
    pub ssl_status: Option<SslStatus>,
    pub dns_status: Option<DnsStatus>,
    pub domain_expiry: Option<NaiveDate>,
    pub uptime_alerts: Option<bool>,
    pub internal_notes: Option<String>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Site {
    pub async fn create(input: CreateSite, pool: &PgPool) -> Result<Self> {
        let site = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO sites (
                id, name, primary_url, other_urls, category, cms, server,
                hosting_provider, hosting_type, responsible_user_id, team_members,
                external_providers, ftp_credentials, ssh_credentials, db_credentials,
                google_analytics_id, search_console_url, tag_manager_id, facebook_pixel_id,
                webhook_urls, main_keywords, backlinks_count, last_audit_date,
                indexation_status, hosting_cost, extra_costs, estimated_revenue, roi,
                status, ssl_status, dns_status, domain_expiry, uptime_alerts, internal_notes
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32,
                $33, $34
            )
            RETURNING *
            "#,
        )
        .bind(SiteId::new())
        .bind(&input.name)
        .bind(&input.primary_url)
        .bind(&input.other_urls)
        .bind(&input.category)
        .bind(&input.cms)
        .bind(&input.server)
        .bind(&input.hosting_provider)
        .bind(input.hosting_type)
        .bind(input.responsible_user_id)
        .bind(&input.team_members)
        .bind(&input.external_providers)
        .bind(&input.ftp_credentials)
        .bind(&input.ssh_credentials)
        .bind(&input.db_credentials)
        .bind(&input.google_analytics_id)
        .bind(&input.search_console_url)
        .bind(&input.tag_manager_id)
        .bind(&input.facebook_pixel_id)
        .bind(&input.webhook_urls)
        .bind(&input.main_keywords)
        .bind(input.backlinks_count)
        .bind(input.last_audit_date)
        .bind(input.indexation_status)
        .bind(input.hosting_cost)
        .bind(input.extra_costs)
        .bind(input.estimated_revenue)
        .bind(input.roi)
        .bind(input.status)
        .bind(input.ssl_status)
        .bind(input.dns_status)
        .bind(input.domain_expiry)
        .bind(input.uptime_alerts)
        .bind(&input.internal_notes)
        .fetch_one(pool)
        .await?;
        Ok(site)
    }

    /// Find a live (not soft-deleted) site
    pub async fn find_by_id(id: SiteId, pool: &PgPool) -> Result<Option<Self>> {
        let site = sqlx::query_as::<_, Self>(
            "SELECT * FROM sites WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(site)
    }

    /// Find a site even after it was soft-deleted (audit trail lookups)
    pub async fn find_by_id_including_deleted(id: SiteId, pool: &PgPool) -> Result<Option<Self>> {
        let site = sqlx::query_as::<_, Self>("SELECT * FROM sites WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(site)
    }

    pub async fn find_with_responsible(
        id: SiteId,
        pool: &PgPool,
    ) -> Result<Option<SiteWithResponsible>> {
        let site = sqlx::query_as::<_, SiteWithResponsible>(
            r#"
            SELECT s.*, u.username AS responsible_name
            FROM sites s
            LEFT JOIN users u ON u.id = s.responsible_user_id
            WHERE s.id = $1 AND s.deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(site)
    }

    /// All live sites, newest first
    pub async fn list_with_responsible(pool: &PgPool) -> Result<Vec<SiteWithResponsible>> {
        let sites = sqlx::query_as::<_, SiteWithResponsible>(
            r#"
            SELECT s.*, u.username AS responsible_name
            FROM sites s
            LEFT JOIN users u ON u.id = s.responsible_user_id
            WHERE s.deleted_at IS NULL
            ORDER BY s.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(sites)
    }

    /// Merge the supplied fields; empty strings become NULL. Returns `None` if the
    /// site is missing or deleted.
    pub async fn update(id: SiteId, input: UpdateSite, pool: &PgPool) -> Result<Option<Self>> {
        let site = sqlx::query_as::<_, Self>(
            r#"
            UPDATE sites SET
                name = COALESCE($2, name),
                primary_url = COALESCE($3, primary_url),
                other_urls = NULLIF(COALESCE($4, other_urls), ''),
                category = NULLIF(COALESCE($5, category), ''),
                cms = NULLIF(COALESCE($6, cms), ''),
                server = NULLIF(COALESCE($7, server), ''),
                hosting_provider = NULLIF(COALESCE($8, hosting_provider), ''),
                hosting_type = COALESCE($9, hosting_type),
                responsible_user_id = COALESCE($10, responsible_user_id),
                team_members = NULLIF(COALESCE($11, team_members), ''),
                external_providers = NULLIF(COALESCE($12, external_providers), ''),
                ftp_credentials = NULLIF(COALESCE($13, ftp_credentials), ''),
                ssh_credentials = NULLIF(COALESCE($14, ssh_credentials), ''),
                db_credentials = NULLIF(COALESCE($15, db_credentials), ''),
                google_analytics_id = NULLIF(COALESCE($16, google_analytics_id), ''),
                search_console_url = NULLIF(COALESCE($17, search_console_url), ''),
                tag_manager_id = NULLIF(COALESCE($18, tag_manager_id), ''),
                facebook_pixel_id = NULLIF(COALESCE($19, facebook_pixel_id), ''),
                webhook_urls = NULLIF(COALESCE($20, webhook_urls), ''),
                main_keywords = NULLIF(COALESCE($21, main_keywords), ''),
                backlinks_count = COALESCE($22, backlinks_count),
                last_audit_date = COALESCE($23, last_audit_date),
                indexation_status = COALESCE($24, indexation_status),
                hosting_cost = COALESCE($25, hosting_cost),
                extra_costs = COALESCE($26, extra_costs),
                estimated_revenue = COALESCE($27, estimated_revenue),
                roi = COALESCE($28, roi),
                status = COALESCE($29, status),
                ssl_status = COALESCE($30, ssl_status),
                dns_status = COALESCE($31, dns_status),
                domain_expiry = COALESCE($32, domain_expiry),
                uptime_alerts = COALESCE($33, uptime_alerts),
                internal_notes = NULLIF(COALESCE($34, internal_notes), ''),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.primary_url)
        .bind(&input.other_urls)
        .bind(&input.category)
        .bind(&input.cms)
        .bind(&input.server)
        .bind(&input.hosting_provider)
        .bind(input.hosting_type)
        .bind(input.responsible_user_id)
        .bind(&input.team_members)
        .bind(&input.external_providers)
        .bind(&input.ftp_credentials)
        .bind(&input.ssh_credentials)
        .bind(&input.db_credentials)
        .bind(&input.google_analytics_id)
        .bind(&input.search_console_url)
        .bind(&input.tag_manager_id)
        .bind(&input.facebook_pixel_id)
        .bind(&input.webhook_urls)
        .bind(&input.main_keywords)
        .bind(input.backlinks_count)
        .bind(input.last_audit_date)
        .bind(input.indexation_status)
        .bind(input.hosting_cost)
        .bind(input.extra_costs)
        .bind(input.estimated_revenue)
        .bind(input.roi)
        .bind(input.status)
        .bind(input.ssl_status)
        .bind(input.dns_status)
        .bind(input.domain_expiry)
        .bind(input.uptime_alerts)
        .bind(&input.internal_notes)
        .fetch_optional(pool)
        .await?;
        Ok(site)
    }

    /// Stamp `deleted_at`. False when the site is missing or already deleted.
    pub async fn soft_delete(id: SiteId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE sites SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sites the uptime sweep probes
    pub async fn find_for_uptime_sweep(pool: &PgPool) -> Result<Vec<Self>> {
        let sites = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM sites
            WHERE status = 'active' AND deleted_at IS NULL
            ORDER BY last_uptime_check ASC NULLS FIRST
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(sites)
    }

    pub async fn record_uptime(
        id: SiteId,
        status: UptimeStatus,
        checked_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query("UPDATE sites SET uptime_status = $2, last_uptime_check = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(checked_at)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn set_last_audit_date(id: SiteId, date: NaiveDate, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE sites SET last_audit_date = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(date)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn count_live(pool: &PgPool) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sites WHERE deleted_at IS NULL")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Active, live sites whose last probe failed
    pub async fn count_down(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM sites
            WHERE status = 'active' AND deleted_at IS NULL AND uptime_status = 'down'
            "#,
        )
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
