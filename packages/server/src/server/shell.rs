//! HTML shell that boots the single-page app.

use axum::{
    extract::{Extension, Path},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::server::app::AxumAppState;
use crate::server::static_files::serve_asset;

pub const SHELL_BASE: &str = "/company-hub";

/// Pages the SPA knows how to render, with their titles
const PAGES: &[(&str, &str)] = &[
    ("dashboard", "Dashboard"),
    ("login", "Login"),
    ("sites", "Sites"),
    ("leads", "Leads"),
    ("tasks", "Tasks"),
    ("financial", "Financial"),
    ("settings", "Settings"),
    ("accounts", "Accounts"),
    ("analytics", "Analytics"),
    ("backlinks", "Backlinks"),
    ("seo", "SEO"),
    ("automation", "Automation"),
];

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self' 'unsafe-inline'; \
     style-src 'self' 'unsafe-inline'; img-src 'self' data: https:; font-src 'self' data:; \
     connect-src 'self'";

/// Deployment details embedded into every shell page
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    pub site_url: String,
    pub enabled_modules: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BootData<'a> {
    current_page: &'a str,
    enabled_modules: &'a [String],
    site_url: &'a str,
    api_url: String,
    assets_url: String,
}

pub fn shell_router() -> Router {
    Router::new()
        .route(SHELL_BASE, get(shell_index_handler))
        .route("/company-hub/assets/*path", get(serve_asset))
        .route("/company-hub/:page", get(shell_page_handler))
}

pub fn page_title(page: &str) -> Option<&'static str> {
    PAGES.iter().find(|(p, _)| *p == page).map(|(_, title)| *title)
}

async fn shell_index_handler(Extension(state): Extension<AxumAppState>) -> Response {
    render_page(&state.shell, "dashboard")
}

async fn shell_page_handler(
    Extension(state): Extension<AxumAppState>,
    Path(page): Path<String>,
) -> Response {
    render_page(&state.shell, &page)
}

pub fn render_page(config: &ShellConfig, page: &str) -> Response {
    let Some(title) = page_title(page) else {
        return (StatusCode::NOT_FOUND, Html("<h1>Page not found</h1>")).into_response();
    };

    let boot = BootData {
        current_page: page,
        enabled_modules: &config.enabled_modules,
        site_url: &config.site_url,
        api_url: format!("{}/api/v1/", config.site_url),
        assets_url: format!("{}{}/assets/", config.site_url, SHELL_BASE),
    };

    let html = render_html(page, title, &boot);
    let mut response = Html(html).into_response();
    let headers = response.headers_mut();
    for (name, value) in [
        (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
        (HeaderName::from_static("x-robots-tag"), "noindex, nofollow"),
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
        (header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY),
    ] {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}

fn render_html(page: &str, title: &str, boot: &BootData<'_>) -> String {
    // `</` would end the inline script early
    let boot_json = serde_json::to_string(boot)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="robots" content="noindex, nofollow">
  <title>{title} - Company Hub</title>
  <link rel="stylesheet" href="{assets}main.css">
  <script>window.companyHub = {boot_json};</script>
</head>
<body class="company-hub-app company-hub-page-{page}">
  <div id="company-hub-root">
    <div class="company-hub-loading">
      <div class="loading-spinner"></div>
      <p>Loading...</p>
    </div>
  </div>
  <script type="module" src="{assets}main.js"></script>
</body>
</html>
"#,
        title = title,
        assets = boot.assets_url,
        boot_json = boot_json,
        page = page,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ShellConfig {
        ShellConfig {
            site_url: "https://hub.example.com".to_string(),
            enabled_modules: vec!["dashboard".to_string(), "sites".to_string()],
        }
    }

    #[test]
    fn known_pages_have_titles() {
        assert_eq!(page_title("financial"), Some("Financial"));
        assert_eq!(page_title("automation"), Some("Automation"));
        assert_eq!(page_title("wp-admin"), None);
    }

    #[test]
    fn unknown_page_is_404() {
        let response = render_page(&config(), "../etc/passwd");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn page_sets_no_cache_and_security_headers() {
        let response = render_page(&config(), "sites");
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["x-robots-tag"], "noindex, nofollow");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert!(headers["cache-control"].to_str().unwrap().contains("no-store"));
    }

    #[test]
    fn boot_data_is_embedded_and_escaped() {
        let mut cfg = config();
        cfg.site_url = "https://hub.example.com/</script>".to_string();
        let boot = BootData {
            current_page: "leads",
            enabled_modules: &cfg.enabled_modules,
            site_url: &cfg.site_url,
            api_url: "x".into(),
            assets_url: "y/".into(),
        };
        let html = render_html("leads", "Leads", &boot);
        assert!(html.contains(r#""currentPage":"leads""#));
        assert!(html.contains(r#""enabledModules":["dashboard","sites"]"#));
        assert!(!html.contains("/</script>\""));
        assert!(html.contains(r#"<\/script>"#));
    }
}
