use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

// Embed the SPA build at compile time. The bundle is produced by the
// frontend build into packages/server/assets/dist.
#[derive(RustEmbed)]
#[folder = "assets/dist"]
pub struct HubAssets;

/// `GET /company-hub/assets/*path`
pub async fn serve_asset(Path(path): Path<String>) -> Response {
    serve_embedded::<HubAssets>(&path)
}

fn serve_embedded<E: RustEmbed>(path: &str) -> Response {
    let path = path.trim_start_matches('/');
    match E::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [
                    (header::CONTENT_TYPE, mime.as_ref().to_string()),
                    (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
                ],
                content.data,
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}
