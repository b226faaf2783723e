use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::{FinancialRecordId, Permission};
use crate::domains::financial::activities::{create_record, delete_record, financial_summary};
use crate::domains::financial::data::{
    CreateFinancialRequest, CurrencySummary, FinancialFilter, SummaryQuery,
};
use crate::domains::financial::models::{FinancialRecord, FinancialRecordWithSite};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Actor, PathId, ValidJson};

pub async fn list_financial_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(filter): Query<FinancialFilter>,
) -> ApiResult<Json<Vec<FinancialRecordWithSite>>> {
    actor.require(Permission::ManageFinancial)?;
    Ok(Json(
        FinancialRecord::list_with_site(filter.kind, &state.db_pool).await?,
    ))
}

pub async fn create_financial_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    body: Result<ValidJson<CreateFinancialRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    actor.require(Permission::ManageFinancial)?;
    let ValidJson(req) = body?;

    let record = create_record(req, &actor.ctx, &state.server_deps).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "id": record.id })),
    ))
}

pub async fn delete_financial_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    PathId(id): PathId<FinancialRecordId>,
) -> ApiResult<Json<Value>> {
    actor.require(Permission::ManageFinancial)?;
    if !delete_record(id, &actor.ctx, &state.server_deps).await? {
        return Err(ApiError::WriteFailed("delete_failed"));
    }
    Ok(Json(json!({ "success": true })))
}

/// `GET /financial/summary`
pub async fn financial_summary_handler(
    Extension(state): Extension<AxumAppState>,
    actor: Actor,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<Vec<CurrencySummary>>> {
    actor.require(Permission::ManageFinancial)?;
    Ok(Json(financial_summary(query.since, &state.server_deps).await?))
}
