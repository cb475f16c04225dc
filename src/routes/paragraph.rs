use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::ai::{prompts, response};
use crate::error::Result;
use crate::models::GeneratedParagraph;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateParagraphRequest {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    para_date: Option<DateTime<Utc>>,
}

#[instrument(skip_all)]
pub async fn generate_paragraph(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateParagraphRequest>, JsonRejection>,
) -> Result<Json<GeneratedParagraph>> {
    let Json(req) = payload.map_err(super::invalid_body)?;
    let llm = state.llm()?;

    let words: Vec<String> = state
        .repository()
        .list_active_words()
        .await?
        .into_iter()
        .map(|w| w.word)
        .collect();

    let prompt = prompts::paragraph_prompt(&req.topic, &words);
    let raw = llm.complete(&prompt).await?;
    let paragraph = response::parse_paragraph(&raw)?;

    tracing::info!(
        model = llm.model_version(),
        topic = %req.topic,
        para_date = ?req.para_date,
        vocabulary = words.len(),
        tough_words = paragraph.words.len(),
        "Generated paragraph"
    );

    Ok(Json(paragraph))
}
