//! Sites: encrypted credentials, soft delete and uptime alerts.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{create_test_admin, create_test_site, create_test_user};
use company_hub::common::sanitize::Sanitize;
use company_hub::common::CredentialCodec;
use company_hub::domains::activity::{ActivityContext, ActivityLog, Notification};
use company_hub::domains::auth::UserRole;
use company_hub::domains::sites::activities::{
    check_site, create_site, delete_site, get_site, list_sites, update_site,
};
use company_hub::domains::sites::models::Site;
use company_hub::domains::sites::{CreateSiteRequest, UpdateSiteRequest, UptimeStatus};
use company_hub::kernel::test_dependencies::TEST_ENCRYPTION_KEY;
use company_hub::kernel::{MockLivenessChecker, TestDependencies};

#[tokio::test]
async fn credentials_are_encrypted_at_rest() {
    let harness = harness_or_skip!();
    let deps = harness.server_deps();

    let site = create_site(
        CreateSiteRequest {
            name: "Encrypted".to_string(),
            primary_url: "https://encrypted.example".to_string(),
            ftp_credentials: Some(json!("deploy:hunter2")),
            ssh_credentials: Some(json!({ "user": "root", "port": 22 })),
            ..Default::default()
        },
        &ActivityContext::system(),
        &deps,
    )
    .await
    .unwrap();

    let stored = Site::find_by_id(site.id, &harness.db_pool)
        .await
        .unwrap()
        .unwrap();
    let ftp_blob = stored.ftp_credentials.unwrap();
    assert!(!ftp_blob.contains("hunter2"));
    assert_eq!(
        CredentialCodec::new(TEST_ENCRYPTION_KEY).decrypt(&ftp_blob).unwrap(),
        "deploy:hunter2"
    );
    assert!(stored.db_credentials.is_none());

    let view = get_site(site.id, &deps).await.unwrap().unwrap();
    assert_eq!(view.ftp_credentials, "deploy:hunter2");
    let ssh: Value = serde_json::from_str(&view.ssh_credentials).unwrap();
    assert_eq!(ssh["user"], "root");
    assert_eq!(view.db_credentials, "");
}

#[tokio::test]
async fn update_clears_blank_fields_and_keeps_omitted_ones() {
    let harness = harness_or_skip!();
    let deps = harness.server_deps();
    let ctx = ActivityContext::system();

    let site = create_site(
        CreateSiteRequest {
            name: "Clearable".to_string(),
            primary_url: "https://clearable.example".to_string(),
            cms: Some("WordPress".to_string()),
            server: Some("web-01".to_string()),
            ftp_credentials: Some(json!("deploy:hunter2")),
            ssh_credentials: Some(json!("root:swordfish")),
            ..Default::default()
        },
        &ctx,
        &deps,
    )
    .await
    .unwrap();

    let mut update: UpdateSiteRequest = serde_json::from_value(json!({
        "cms": "",
        "ftp_credentials": ""
    }))
    .unwrap();
    update.sanitize();
    update_site(site.id, update, &ctx, &deps).await.unwrap().unwrap();

    let stored = Site::find_by_id(site.id, &harness.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.cms.is_none());
    assert!(stored.ftp_credentials.is_none());
    assert_eq!(stored.server.as_deref(), Some("web-01"));

    let view = get_site(site.id, &deps).await.unwrap().unwrap();
    assert_eq!(view.ftp_credentials, "");
    assert_eq!(view.ssh_credentials, "root:swordfish");
}

#[tokio::test]
async fn undecryptable_credentials_read_back_empty() {
    let harness = harness_or_skip!();
    let site = create_test_site(&harness.db_pool, "Garbled", "https://garbled.example")
        .await
        .unwrap();
    sqlx::query("UPDATE sites SET ftp_credentials = 'not-a-ciphertext' WHERE id = $1")
        .bind(site.id)
        .execute(&harness.db_pool)
        .await
        .unwrap();

    let view = get_site(site.id, &harness.server_deps())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.ftp_credentials, "");
}

#[tokio::test]
async fn deleted_sites_leave_the_list_but_keep_their_row() {
    let harness = harness_or_skip!();
    let deps = harness.server_deps();
    let site = create_test_site(&harness.db_pool, "Retired", "https://retired.example")
        .await
        .unwrap();

    assert!(delete_site(site.id, &ActivityContext::system(), &deps)
        .await
        .unwrap());

    let listed = list_sites(&deps).await.unwrap();
    assert!(listed.iter().all(|s| s.id != site.id.to_string()));
    assert!(get_site(site.id, &deps).await.unwrap().is_none());

    let row = Site::find_by_id_including_deleted(site.id, &harness.db_pool)
        .await
        .unwrap()
        .expect("row survives soft delete");
    assert!(row.deleted_at.is_some());

    // Second delete finds nothing live
    assert!(!delete_site(site.id, &ActivityContext::system(), &deps)
        .await
        .unwrap());
}

#[tokio::test]
async fn going_down_alerts_every_active_admin_once() {
    let liveness = MockLivenessChecker::new(true).with_answer("https://flaky.example", false);
    let harness = harness_or_skip!(TestDependencies::new().with_liveness(liveness));
    let deps = harness.server_deps();

    let admin = create_test_admin(&harness.db_pool).await.unwrap();
    let collaborator = create_test_user(&harness.db_pool, UserRole::Collaborator)
        .await
        .unwrap();
    let site = create_test_site(&harness.db_pool, "Flaky", "https://flaky.example")
        .await
        .unwrap();

    let check = check_site(&site, &deps).await.unwrap();
    assert!(!check.is_up);
    assert!(check.alerted);
    assert_eq!(check.status, UptimeStatus::Down);

    // Other tests share the database, so count only this site's alerts
    let flaky_alerts = |user_id| {
        let pool = harness.db_pool.clone();
        async move {
            Notification::find_for_user(user_id, 50, &pool)
                .await
                .unwrap()
                .into_iter()
                .filter(|n| n.message.contains("https://flaky.example"))
                .count()
        }
    };
    assert_eq!(flaky_alerts(admin.id).await, 1);
    assert_eq!(flaky_alerts(collaborator.id).await, 0);

    let mails = harness.deps.mailer.sent();
    assert_eq!(
        mails
            .iter()
            .filter(|m| m.to == admin.email && m.html.contains("Flaky"))
            .count(),
        1
    );
    assert!(mails.iter().all(|m| m.to != collaborator.email));

    // Already down: record the probe, no second alert
    let site = Site::find_by_id(site.id, &harness.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(site.uptime_status, UptimeStatus::Down);
    assert!(site.last_uptime_check.is_some());
    let again = check_site(&site, &deps).await.unwrap();
    assert!(!again.alerted);
    assert_eq!(flaky_alerts(admin.id).await, 1);
}

#[tokio::test]
async fn recovery_marks_the_site_up_without_alerting() {
    let liveness = MockLivenessChecker::new(true).with_answer("https://bouncy.example", false);
    let harness = harness_or_skip!(TestDependencies::new().with_liveness(liveness));
    let deps = harness.server_deps();
    let site = create_test_site(&harness.db_pool, "Bouncy", "https://bouncy.example")
        .await
        .unwrap();

    check_site(&site, &deps).await.unwrap();
    harness.deps.liveness.set_answer("https://bouncy.example", true);

    let site = Site::find_by_id(site.id, &harness.db_pool)
        .await
        .unwrap()
        .unwrap();
    let check = check_site(&site, &deps).await.unwrap();
    assert!(check.is_up);
    assert!(!check.alerted);
    assert_eq!(harness.deps.liveness.calls().len(), 2);
}

#[tokio::test]
async fn sites_api_round_trip() {
    let harness = harness_or_skip!();
    let admin = create_test_admin(&harness.db_pool).await.unwrap();
    let token = harness.token_for(&admin).await;
    let app = harness.app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/sites")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "<b>Api</b> Site",
                        "primary_url": "https://api-site.example",
                        "hosting_cost": "19.90",
                        "db_credentials": "db:secret"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap())
            .unwrap();
    assert_eq!(created["success"], true);
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/sites/{}", id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let site: Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap())
            .unwrap();
    assert_eq!(site["name"], "Api Site");
    assert_eq!(site["db_credentials"], "db:secret");
    assert_eq!(site["responsible_name"], Value::Null);

    let logged = ActivityLog::find_by_action("site_created", &harness.db_pool)
        .await
        .unwrap();
    assert!(logged
        .iter()
        .any(|entry| entry.user_id == Some(admin.id) && entry.details["site_id"] == id.as_str()));
}

#[tokio::test]
async fn update_of_missing_site_is_not_found() {
    let harness = harness_or_skip!();
    let admin = create_test_admin(&harness.db_pool).await.unwrap();
    let token = harness.token_for(&admin).await;

    let response = harness
        .app()
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri(format!("/api/v1/sites/{}", uuid::Uuid::new_v4()))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "cms": "WordPress" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value =
        serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap())
            .unwrap();
    assert_eq!(body["code"], "site_not_found");
}
