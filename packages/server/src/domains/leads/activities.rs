use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::common::LeadId;
use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::leads::data::{CreateLeadRequest, UpdateLeadRequest};
use crate::domains::leads::models::{CreateLead, Lead, UpdateLead};
use crate::kernel::ServerDeps;

pub async fn create_lead(
    input: CreateLeadRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Lead> {
    let lead = Lead::create(
        CreateLead {
            name: input.name,
            email: input.email,
            phone: input.phone,
            company: input.company,
            source: input.source,
            status: input.status.unwrap_or_default(),
            assigned_to: input.assigned_to,
            notes: input.notes,
        },
        &deps.db_pool,
    )
    .await?;

    info!(lead_id = %lead.id, "Lead created");
    log_activity(
        ctx,
        "lead_created",
        json!({ "lead_id": lead.id, "lead_name": lead.name }),
        &deps.db_pool,
    )
    .await;
    Ok(lead)
}

pub async fn update_lead(
    id: LeadId,
    input: UpdateLeadRequest,
    ctx: &ActivityContext,
    deps: &ServerDeps,
) -> Result<Option<Lead>> {
    let update = UpdateLead {
        name: input.name,
        email: input.email,
        phone: input.phone,
        company: input.company,
        source: input.source,
        status: input.status,
        assigned_to: input.assigned_to,
        notes: input.notes,
    };

    let lead = Lead::update(id, update, &deps.db_pool).await?;
    if let Some(lead) = &lead {
        log_activity(
            ctx,
            "lead_updated",
            json!({ "lead_id": lead.id, "status": lead.status }),
            &deps.db_pool,
        )
        .await;
    }
    Ok(lead)
}

pub async fn delete_lead(id: LeadId, ctx: &ActivityContext, deps: &ServerDeps) -> Result<bool> {
    let deleted = Lead::delete(id, &deps.db_pool).await?;
    if deleted {
        log_activity(ctx, "lead_deleted", json!({ "lead_id": id }), &deps.db_pool).await;
    }
    Ok(deleted)
}
