mod paragraph;
mod words;

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/words", get(words::list_words).post(words::add_word))
        .route("/words/active", get(words::active_words_with_sentences))
        .route("/words/:word", get(words::get_word).delete(words::remove_word))
        .route("/paragraph", post(paragraph::generate_paragraph))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any body that does not bind (bad JSON, wrong content type, missing field)
/// is a plain 400.
fn invalid_body(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::BadRequest("Invalid request".to_string())
}
