use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{FinancialRecordId, SiteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "financial_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FinancialType {
    #[default]
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FinancialRecord {
    pub id: FinancialRecordId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: FinancialType,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub site_id: Option<SiteId>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FinancialRecordWithSite {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: FinancialRecord,
    pub site_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateFinancialRecord {
    pub kind: FinancialType,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub site_id: Option<SiteId>,
    pub date: NaiveDate,
}

/// One row of the per-currency, per-type totals
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CurrencyTotal {
    pub currency: String,
    #[sqlx(rename = "type")]
    pub kind: FinancialType,
    pub total: Decimal,
}

impl FinancialRecord {
    pub async fn create(input: CreateFinancialRecord, pool: &PgPool) -> Result<Self> {
        let record = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO financial_records (
                id, type, category, description, amount, currency, site_id, date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(FinancialRecordId::new())
        .bind(input.kind)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.amount)
        .bind(&input.currency)
        .bind(input.site_id)
        .bind(input.date)
        .fetch_one(pool)
        .await?;
        Ok(record)
    }

    /// Most recent first, optionally narrowed to income or expense
    pub async fn list_with_site(
        kind: Option<FinancialType>,
        pool: &PgPool,
    ) -> Result<Vec<FinancialRecordWithSite>> {
        let records = sqlx::query_as::<_, FinancialRecordWithSite>(
            r#"
            SELECT f.*, s.name AS site_name
            FROM financial_records f
            LEFT JOIN sites s ON s.id = f.site_id
            WHERE ($1::financial_type IS NULL OR f.type = $1)
            ORDER BY f.date DESC, f.created_at DESC
            "#,
        )
        .bind(kind)
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    pub async fn delete(id: FinancialRecordId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM financial_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sum of amounts grouped by currency and type, optionally from a date on
    pub async fn totals(since: Option<NaiveDate>, pool: &PgPool) -> Result<Vec<CurrencyTotal>> {
        let rows = sqlx::query_as::<_, CurrencyTotal>(
            r#"
            SELECT currency, type, COALESCE(SUM(amount), 0) AS total
            FROM financial_records
            WHERE ($1::date IS NULL OR date >= $1)
            GROUP BY currency, type
            ORDER BY currency
            "#,
        )
        .bind(since)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
