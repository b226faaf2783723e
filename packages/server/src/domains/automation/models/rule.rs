use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

use crate::common::AutomationRuleId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AutomationRule {
    pub id: AutomationRuleId,
    pub name: String,
    pub trigger: String,
    pub action: String,
    pub conditions: Option<Value>,
    pub webhook_url: Option<String>,
    pub email_template: Option<String>,
    pub is_active: bool,
    pub execution_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateAutomationRule {
    pub name: String,
    pub trigger: String,
    pub action: String,
    pub conditions: Option<Value>,
    pub webhook_url: Option<String>,
    pub email_template: Option<String>,
    pub is_active: bool,
}

impl AutomationRule {
    pub async fn create(input: CreateAutomationRule, pool: &PgPool) -> Result<Self> {
        let rule = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO automation_rules
                (id, name, trigger, action, conditions, webhook_url, email_template, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(AutomationRuleId::new())
        .bind(&input.name)
        .bind(&input.trigger)
        .bind(&input.action)
        .bind(&input.conditions)
        .bind(&input.webhook_url)
        .bind(&input.email_template)
        .bind(input.is_active)
        .fetch_one(pool)
        .await?;
        Ok(rule)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let rules = sqlx::query_as::<_, Self>(
            "SELECT * FROM automation_rules ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rules)
    }

    pub async fn delete(id: AutomationRuleId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM automation_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
