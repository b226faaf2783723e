//! Leads, tasks, backlinks, money, integrations and automation against Postgres.

mod common;

use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

use common::{create_test_admin, create_test_site};
use company_hub::domains::activity::{ActivityContext, ActivityLog};
use company_hub::domains::automation::activities::{create_rule, create_webhook, delete_rule};
use company_hub::domains::automation::{AutomationRule, AutomationWebhook};
use company_hub::domains::backlinks::activities::{
    check_backlink, create_backlink, run_backlink_sweep,
};
use company_hub::domains::backlinks::{Backlink, BacklinkStatus};
use company_hub::domains::financial::activities::{create_record, delete_record, financial_summary};
use company_hub::domains::financial::FinancialType;
use company_hub::domains::integrations::activities::{
    disconnect_integration, list_integrations, save_integration, test_integration,
};
use company_hub::domains::integrations::IntegrationStatus;
use company_hub::domains::leads::activities::{create_lead, delete_lead, update_lead};
use company_hub::domains::leads::{Lead, LeadStatus};
use company_hub::domains::tasks::activities::{create_task, update_task};
use company_hub::domains::tasks::models::Task;
use company_hub::domains::tasks::TaskStatus;
use company_hub::kernel::{MockLivenessChecker, TestDependencies};

fn actor_ctx(user_id: company_hub::common::UserId) -> ActivityContext {
    ActivityContext {
        user_id: Some(user_id),
        ip_address: Some("192.0.2.10".to_string()),
        user_agent: Some("workflow-tests".to_string()),
    }
}

#[tokio::test]
async fn lead_lifecycle_is_audited() {
    let harness = harness_or_skip!();
    let deps = harness.server_deps();
    let admin = create_test_admin(&harness.db_pool).await.unwrap();
    let ctx = actor_ctx(admin.id);

    let lead = create_lead(
        serde_json::from_value(json!({
            "name": "Maria Souza",
            "email": "maria@example.com",
            "assigned_to": admin.id,
        }))
        .unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(lead.status, LeadStatus::New);

    let updated = update_lead(
        lead.id,
        serde_json::from_value(json!({ "status": "qualified" })).unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, LeadStatus::Qualified);
    assert_eq!(updated.email.as_deref(), Some("maria@example.com"));

    assert!(delete_lead(lead.id, &ctx, &deps).await.unwrap());
    assert!(Lead::find_by_id(lead.id, &harness.db_pool)
        .await
        .unwrap()
        .is_none());

    let created = ActivityLog::find_by_action("lead_created", &harness.db_pool)
        .await
        .unwrap();
    let entry = created
        .iter()
        .find(|e| e.details["lead_id"] == lead.id.to_string().as_str())
        .expect("lead_created entry");
    assert_eq!(entry.user_id, Some(admin.id));
    assert_eq!(entry.ip_address.as_deref(), Some("192.0.2.10"));
}

#[tokio::test]
async fn updating_a_missing_lead_returns_none() {
    let harness = harness_or_skip!();
    let outcome = update_lead(
        company_hub::common::LeadId::new(),
        serde_json::from_value(json!({ "status": "lost" })).unwrap(),
        &ActivityContext::system(),
        &harness.server_deps(),
    )
    .await
    .unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn task_status_moves_forward() {
    let harness = harness_or_skip!();
    let deps = harness.server_deps();
    let ctx = ActivityContext::system();

    let task = create_task(
        serde_json::from_value(json!({ "title": "Renew SSL", "priority": "high" })).unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(task.status, TaskStatus::Todo);

    update_task(
        task.id,
        serde_json::from_value(json!({ "status": "done" })).unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap()
    .unwrap();

    let stored = Task::find_by_id(task.id, &harness.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, TaskStatus::Done);
    assert_eq!(stored.title, "Renew SSL");
}

#[tokio::test]
async fn broken_backlinks_are_marked_by_the_sweep() {
    let liveness = MockLivenessChecker::new(true).with_answer("https://gone.example/post", false);
    let harness = harness_or_skip!(TestDependencies::new().with_liveness(liveness));
    let deps = harness.server_deps();
    let ctx = ActivityContext::system();
    let site = create_test_site(&harness.db_pool, "Linked", "https://linked.example")
        .await
        .unwrap();

    let alive = create_backlink(
        serde_json::from_value(json!({
            "source_url": "https://blog.example/review",
            "target_url": "https://linked.example",
            "site_id": site.id,
        }))
        .unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap();
    let gone = create_backlink(
        serde_json::from_value(json!({
            "source_url": "https://gone.example/post",
            "target_url": "https://linked.example",
            "site_id": site.id,
        }))
        .unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap();

    let check = check_backlink(&alive, &deps).await.unwrap();
    assert!(check.is_active);
    assert_eq!(check.status, BacklinkStatus::Active);

    assert!(run_backlink_sweep(&deps).await.unwrap() >= 1);
    let gone = Backlink::find_by_id(gone.id, &harness.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(gone.status, BacklinkStatus::Broken);
    assert!(gone.last_checked.is_some());
}

#[tokio::test]
async fn financial_summary_groups_by_currency() {
    let harness = harness_or_skip!();
    let deps = harness.server_deps();
    let ctx = ActivityContext::system();

    let income = create_record(
        serde_json::from_value(json!({
            "type": "income",
            "category": "Ads",
            "description": "AdSense payout",
            "amount": "1500.50",
            "currency": "XTS",
        }))
        .unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(income.kind, FinancialType::Income);

    create_record(
        serde_json::from_value(json!({
            "type": "expense",
            "category": "Hosting",
            "description": "VPS",
            "amount": "200.25",
            "currency": "XTS",
        }))
        .unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap();

    let summary = financial_summary(None, &deps).await.unwrap();
    let xts = summary
        .iter()
        .find(|s| s.currency == "XTS")
        .expect("XTS totals");
    assert_eq!(xts.income, Decimal::from_str("1500.50").unwrap());
    assert_eq!(xts.expense, Decimal::from_str("200.25").unwrap());
    assert_eq!(xts.balance, Decimal::from_str("1300.25").unwrap());
    assert_eq!(xts.formatted_balance, "XTS 1,300.25");

    assert!(delete_record(income.id, &ctx, &deps).await.unwrap());
    let summary = financial_summary(None, &deps).await.unwrap();
    let xts = summary.iter().find(|s| s.currency == "XTS").unwrap();
    assert_eq!(xts.income, Decimal::ZERO);
    assert_eq!(xts.balance, Decimal::from_str("-200.25").unwrap());
}

#[tokio::test]
async fn integrations_merge_stored_state_over_defaults() {
    let liveness = MockLivenessChecker::new(false).with_answer("https://hooks.example/in", true);
    let harness = harness_or_skip!(TestDependencies::new().with_liveness(liveness));
    let deps = harness.server_deps();
    let ctx = ActivityContext::system();

    let before = list_integrations(&deps).await.unwrap();
    assert_eq!(before["webhooks"].status, IntegrationStatus::Inactive);
    assert_eq!(before["google_analytics"].status, IntegrationStatus::Disconnected);

    save_integration(
        "webhooks",
        json!({ "url": "https://hooks.example/in" }),
        &ctx,
        &deps,
    )
    .await
    .unwrap();

    let after = list_integrations(&deps).await.unwrap();
    assert_eq!(after["webhooks"].status, IntegrationStatus::Connected);
    assert!(after["webhooks"].updated_at.is_some());
    assert!(after.contains_key("google_search_console"));

    // Empty request config falls back to the stored one
    let result = test_integration("webhooks", serde_json::Value::Null, &deps)
        .await
        .unwrap();
    assert!(result.success);

    let result = test_integration("webhooks", json!({ "url": "https://dead.example" }), &deps)
        .await
        .unwrap();
    assert!(!result.success);

    disconnect_integration("webhooks", &ctx, &deps).await.unwrap();
    let reset = list_integrations(&deps).await.unwrap();
    assert_eq!(reset["webhooks"].status, IntegrationStatus::Disconnected);
    assert_eq!(reset["webhooks"].config, json!({}));

    let result = test_integration("google_analytics", json!({}), &deps)
        .await
        .unwrap();
    assert!(!result.success);
}

#[tokio::test]
async fn automation_rules_and_webhooks_are_stored() {
    let harness = harness_or_skip!();
    let deps = harness.server_deps();
    let ctx = ActivityContext::system();

    let rule = create_rule(
        serde_json::from_value(json!({
            "name": "Notify on new lead",
            "trigger": "lead_created",
            "action": "send_email",
            "conditions": { "source": "website" },
        }))
        .unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap();
    assert!(rule.is_active);

    let webhook = create_webhook(
        serde_json::from_value(json!({
            "name": "Zapier",
            "webhook_url": "https://hooks.zapier.example/abc",
            "trigger": "site_down",
        }))
        .unwrap(),
        &ctx,
        &deps,
    )
    .await
    .unwrap();

    let rules = AutomationRule::list(&harness.db_pool).await.unwrap();
    assert!(rules
        .iter()
        .any(|r| r.id == rule.id && r.conditions == Some(json!({ "source": "website" }))));
    let webhooks = AutomationWebhook::list(&harness.db_pool).await.unwrap();
    assert!(webhooks.iter().any(|w| w.id == webhook.id));

    assert!(delete_rule(rule.id, &ctx, &deps).await.unwrap());
    assert!(!delete_rule(rule.id, &ctx, &deps).await.unwrap());
}
