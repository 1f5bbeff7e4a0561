//! Embedded static files for the upload page.

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::server::state::AppState;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Placeholder in `index.html` replaced by the sample column options.
const COLUMN_OPTIONS_SLOT: &str = "{{column_options}}";

/// GET / - the upload form.
pub async fn index_handler(State(state): State<AppState>) -> Response {
    match Assets::get("index.html") {
        Some(content) => {
            let template = String::from_utf8_lossy(&content.data);
            Html(render_index(&template, &state.config.sample_columns)).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Serve embedded static files.
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

fn render_index(template: &str, columns: &[String]) -> String {
    let options: String = columns
        .iter()
        .map(|c| {
            let c = escape_html(c);
            format!("<option value=\"{c}\">{c}</option>\n")
        })
        .collect();
    template.replace(COLUMN_OPTIONS_SLOT, &options)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_fills_options() {
        let html = render_index(
            "<select>{{column_options}}</select>",
            &["Amount".to_string(), "a<b".to_string()],
        );
        assert!(html.contains("<option value=\"Amount\">Amount</option>"));
        assert!(html.contains("a&lt;b"));
        assert!(!html.contains(COLUMN_OPTIONS_SLOT));
    }

    #[test]
    fn test_index_template_is_embedded() {
        let content = Assets::get("index.html").unwrap();
        let text = String::from_utf8_lossy(&content.data);
        assert!(text.contains(COLUMN_OPTIONS_SLOT));
    }
}
