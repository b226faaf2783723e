use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use tracing::info;

use crate::common::FinancialRecordId;
use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::financial::data::{
    summarize, CreateFinancialRequest, CurrencySummary, DEFAULT_CURRENCY,
};
use crate::domains::financial::models::{CreateFinancialRecord, FinancialRecord};
use crate::kernel::ServerDeps;

pub async fn create_record(
    input: CreateFinancialRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<FinancialRecord> {
    let record = FinancialRecord::create(
        CreateFinancialRecord {
            kind: input.kind,
            category: input.category,
            description: input.description,
            amount: input.amount,
            currency: input
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            site_id: input.site_id,
            date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
        },
        &deps.db_pool,
    )
    .await?;

    info!(record_id = %record.id, kind = ?record.kind, "Financial record created");
    log_activity(
        ctx,
        "financial_record_created",
        json!({ "record_id": record.id, "type": record.kind, "amount": record.amount }),
        &deps.db_pool,
    )
    .await;
    Ok(record)
}

pub async fn delete_record(
    id: FinancialRecordId,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<bool> {
    let deleted = FinancialRecord::delete(id, &deps.db_pool).await?;
    if deleted {
        log_activity(
            ctx,
            "financial_record_deleted",
            json!({ "record_id": id }),
            &deps.db_pool,
        )
        .await;
    }
    Ok(deleted)
}

pub async fn financial_summary(
    since: Option<NaiveDate>,
    deps: &ServerDeps,
) -> Result<Vec<CurrencySummary>> {
    let totals = FinancialRecord::totals(since, &deps.db_pool).await?;
    Ok(summarize(&totals))
}
