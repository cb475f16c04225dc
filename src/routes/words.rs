use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::ai::{prompts, response};
use crate::error::{AppError, Result};
use crate::models::{NewWord, Word, WordSentences};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddWordRequest {
    word: String,
    #[serde(default)]
    meanings: Vec<String>,
    #[serde(default)]
    pronunciation: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

#[instrument(skip_all)]
pub async fn add_word(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddWordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Word>)> {
    let Json(req) = payload.map_err(super::invalid_body)?;
    if req.word.trim().is_empty() {
        return Err(AppError::BadRequest("Word is required".to_string()));
    }

    let word = state
        .repository()
        .add_word(NewWord {
            word: req.word,
            meanings: req.meanings,
            pronunciation: req.pronunciation,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(word)))
}

#[instrument(skip_all, fields(word = %word))]
pub async fn get_word(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> Result<Json<Word>> {
    let word = state.repository().get_word_by_text(&word).await?;
    Ok(Json(word))
}

pub async fn list_words(State(state): State<AppState>) -> Result<Json<Vec<Word>>> {
    let words = state.repository().list_active_words().await?;
    Ok(Json(words))
}

#[instrument(skip_all, fields(id = %id))]
pub async fn remove_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid word ID".to_string()))?;

    state.repository().deactivate_word(id).await?;

    Ok(Json(MessageResponse {
        message: "Word removed successfully",
    }))
}

/// Generates one example sentence per meaning for every active word.
#[instrument(skip_all)]
pub async fn active_words_with_sentences(
    State(state): State<AppState>,
) -> Result<Json<Vec<WordSentences>>> {
    let llm = state.llm()?;
    let words = state.repository().list_active_words().await?;
    if words.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let prompt = prompts::sentence_prompt(&words);
    let raw = llm.complete(&prompt).await?;
    let replies = response::parse_sentences(&raw)?;

    let requested = words.len();
    let merged = response::merge_sentences(words, replies);
    tracing::info!(
        model = llm.model_version(),
        requested,
        returned = merged.len(),
        "Generated example sentences"
    );

    Ok(Json(merged))
}
