//! Application state.
//!
//! Shared state for all request handlers.

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Enable verbose output (log conversion details).
    pub(crate) verbose: bool,
    /// Application version (shown on the form page).
    pub(crate) version: String,
}
