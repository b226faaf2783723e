// HTTP routes
pub mod auth;
pub mod automation;
pub mod backlinks;
pub mod dashboard;
pub mod financial;
pub mod health;
pub mod integrations;
pub mod leads;
pub mod notifications;
pub mod seo;
pub mod sites;
pub mod tasks;

pub use health::*;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

/// Everything under `/api/v1`
pub fn api_router() -> Router {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/me", get(auth::me_handler))
        .route("/dashboard/stats", get(dashboard::dashboard_stats_handler))
        // Sites
        .route(
            "/sites",
            get(sites::list_sites_handler).post(sites::create_site_handler),
        )
        .route(
            "/sites/:id",
            get(sites::get_site_handler)
                .put(sites::update_site_handler)
                .delete(sites::delete_site_handler),
        )
        .route("/sites/:id/check-uptime", post(sites::check_uptime_handler))
        // Leads
        .route(
            "/leads",
            get(leads::list_leads_handler).post(leads::create_lead_handler),
        )
        .route(
            "/leads/:id",
            put(leads::update_lead_handler).delete(leads::delete_lead_handler),
        )
        // Tasks
        .route(
            "/tasks",
            get(tasks::list_tasks_handler).post(tasks::create_task_handler),
        )
        .route(
            "/tasks/:id",
            put(tasks::update_task_handler).delete(tasks::delete_task_handler),
        )
        // Financial
        .route(
            "/financial",
            get(financial::list_financial_handler).post(financial::create_financial_handler),
        )
        .route("/financial/summary", get(financial::financial_summary_handler))
        .route("/financial/:id", delete(financial::delete_financial_handler))
        // Backlinks
        .route(
            "/backlinks",
            get(backlinks::list_backlinks_handler).post(backlinks::create_backlink_handler),
        )
        .route(
            "/backlinks/:id",
            put(backlinks::update_backlink_handler).delete(backlinks::delete_backlink_handler),
        )
        .route("/backlinks/:id/check", post(backlinks::check_backlink_handler))
        // SEO
        .route(
            "/seo/keywords",
            get(seo::list_keywords_handler).post(seo::create_keyword_handler),
        )
        .route(
            "/seo/keywords/:id",
            put(seo::update_keyword_handler).delete(seo::delete_keyword_handler),
        )
        .route(
            "/seo/rankings",
            get(seo::list_rankings_handler).post(seo::create_ranking_handler),
        )
        .route(
            "/seo/rankings/:id",
            put(seo::update_ranking_handler).delete(seo::delete_ranking_handler),
        )
        .route("/seo/audits", get(seo::list_audits_handler))
        .route("/seo/audits/:id", delete(seo::delete_audit_handler))
        .route("/seo/audit/:site_id", post(seo::run_audit_handler))
        // Automation
        .route(
            "/automation/rules",
            get(automation::list_rules_handler).post(automation::create_rule_handler),
        )
        .route("/automation/rules/:id", delete(automation::delete_rule_handler))
        .route(
            "/automation/webhooks",
            get(automation::list_webhooks_handler).post(automation::create_webhook_handler),
        )
        .route(
            "/automation/webhooks/:id",
            delete(automation::delete_webhook_handler),
        )
        // Integrations
        .route("/integrations", get(integrations::list_integrations_handler))
        .route(
            "/integrations/:kind",
            post(integrations::save_integration_handler)
                .delete(integrations::delete_integration_handler),
        )
        .route(
            "/integrations/:kind/test",
            post(integrations::test_integration_handler),
        )
        // Notifications and audit trail
        .route("/notifications", get(notifications::list_notifications_handler))
        .route(
            "/notifications/:id/read",
            post(notifications::mark_notification_read_handler),
        )
        .route("/activity", get(notifications::list_activity_handler))
}
