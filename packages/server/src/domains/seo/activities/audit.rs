//! On-demand SEO audit of a site's home page.

use anyhow::Result;
use chrono::Utc;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::domains::activity::{log_activity, ActivityContext};
use crate::domains::seo::models::{AuditStatus, SeoAudit};
use crate::domains::sites::models::Site;
use crate::kernel::ServerDeps;

const MAX_TITLE_LEN: usize = 60;
const MAX_DESCRIPTION_LEN: usize = 160;
const SLOW_RESPONSE_MS: u64 = 3000;

/// What an audit found on the page; stored as the audit's JSON result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub url: String,
    pub http_status: u16,
    pub response_time_ms: u64,
    pub uses_https: bool,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: usize,
    pub images_without_alt: usize,
    pub issues: Vec<String>,
}

pub fn analyze_page(status: u16, elapsed_ms: u64, final_url: &str, html: &str) -> AuditReport {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title");
    let meta_description = Selector::parse(r#"meta[name="description"]"#)
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(|c| c.trim().to_string())
        })
        .filter(|c| !c.is_empty());
    let h1_count = count(&document, "h1");
    let images_without_alt = count(&document, "img:not([alt])");
    let uses_https = url::Url::parse(final_url)
        .map(|u| u.scheme() == "https")
        .unwrap_or(false);

    let mut issues = Vec::new();
    if status >= 400 {
        issues.push(format!("Page answered with HTTP {}", status));
    }
    if !uses_https {
        issues.push("Page is not served over HTTPS".to_string());
    }
    match &title {
        None => issues.push("Missing <title>".to_string()),
        Some(t) if t.chars().count() > MAX_TITLE_LEN => {
            issues.push(format!("Title is longer than {} characters", MAX_TITLE_LEN))
        }
        _ => {}
    }
    match &meta_description {
        None => issues.push("Missing meta description".to_string()),
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LEN => issues.push(format!(
            "Meta description is longer than {} characters",
            MAX_DESCRIPTION_LEN
        )),
        _ => {}
    }
    match h1_count {
        0 => issues.push("No <h1> heading".to_string()),
        1 => {}
        n => issues.push(format!("{} <h1> headings, expected one", n)),
    }
    if images_without_alt > 0 {
        issues.push(format!("{} images without alt text", images_without_alt));
    }
    if elapsed_ms > SLOW_RESPONSE_MS {
        issues.push(format!("Slow response ({} ms)", elapsed_ms));
    }

    AuditReport {
        url: final_url.to_string(),
        http_status: status,
        response_time_ms: elapsed_ms,
        uses_https,
        title,
        meta_description,
        h1_count,
        images_without_alt,
        issues,
    }
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn count(document: &Html, selector: &str) -> usize {
    Selector::parse(selector)
        .map(|sel| document.select(&sel).count())
        .unwrap_or(0)
}

/// Fetch the site's primary URL and record the audit. A fetch failure
/// still produces a `failed` audit row rather than an error.
pub async fn run_audit(site: &Site, ctx: &ActivityContext, deps: &ServerDeps) -> Result<SeoAudit> {
    let audit = SeoAudit::start(site.id, &deps.db_pool).await?;
    info!(site_id = %site.id, audit_id = %audit.id, "SEO audit started");

    let finished = match deps.page_fetcher.fetch_page(&site.primary_url).await {
        Ok(page) => {
            let report = analyze_page(page.status, page.elapsed_ms, &page.final_url, &page.body);
            SeoAudit::finish(
                audit.id,
                AuditStatus::Completed,
                serde_json::to_value(&report)?,
                &deps.db_pool,
            )
            .await?
        }
        Err(e) => {
            warn!(site_id = %site.id, error = %e, "SEO audit fetch failed");
            SeoAudit::finish(
                audit.id,
                AuditStatus::Failed,
                json!({ "url": site.primary_url, "error": e.to_string() }),
                &deps.db_pool,
            )
            .await?
        }
    };

    Site::set_last_audit_date(site.id, Utc::now().date_naive(), &deps.db_pool).await?;
    log_activity(
        ctx,
        "seo_audit_run",
        json!({ "site_id": site.id, "audit_id": audit.id, "status": finished.status }),
        &deps.db_pool,
    )
    .await;

    Ok(finished)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_PAGE: &str = r#"
        <html><head>
          <title>Acme Store</title>
          <meta name="description" content="Tools and supplies">
        </head><body><h1>Welcome</h1><img src="a.png" alt="logo"></body></html>
    "#;

    #[test]
    fn clean_page_has_no_issues() {
        let report = analyze_page(200, 120, "https://acme.example/", GOOD_PAGE);
        assert_eq!(report.title.as_deref(), Some("Acme Store"));
        assert_eq!(report.meta_description.as_deref(), Some("Tools and supplies"));
        assert_eq!(report.h1_count, 1);
        assert!(report.uses_https);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn flags_missing_metadata() {
        let html = "<html><body><h1>a</h1><h1>b</h1><img src='x.png'></body></html>";
        let report = analyze_page(200, 4500, "http://acme.example/", html);

        assert!(report.title.is_none());
        assert!(!report.uses_https);
        assert_eq!(report.images_without_alt, 1);
        assert_eq!(report.issues.len(), 6);
    }

    #[test]
    fn flags_error_status() {
        let report = analyze_page(503, 10, "https://acme.example/", GOOD_PAGE);
        assert!(report.issues.iter().any(|i| i.contains("503")));
    }
}
