//! Embedded form page.
//!
//! Serves a self-contained HTML page: a textarea for Backlog input, a convert
//! button posting to the form endpoint, and a copy-to-clipboard action for
//! the Markdown result. No persistence, no external assets.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

/// Page template, embedded at compile time.
const PAGE: &str = include_str!("../assets/index.html");

/// Handle GET /.
pub(crate) async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(PAGE.replace("{{version}}", &state.version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_version_slot() {
        assert!(PAGE.contains("{{version}}"));
    }

    #[test]
    fn test_page_posts_to_form_endpoint() {
        assert!(PAGE.contains("/convert"));
        assert!(PAGE.contains("name=\"body\""));
    }
}
