use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{GeneratedParagraph, SentenceReply, Word, WordSentences};

/// The whole completion must be the JSON document. Wrapped or truncated
/// replies are rejected outright.
fn parse_completion<T: DeserializeOwned>(raw: &str, kind: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::warn!(kind, error = %e, "Completion is not in the expected JSON shape");
        tracing::debug!(kind, raw, "Rejected completion text");
        AppError::MalformedCompletion(e)
    })
}

pub fn parse_paragraph(raw: &str) -> Result<GeneratedParagraph> {
    parse_completion(raw, "paragraph")
}

pub fn parse_sentences(raw: &str) -> Result<Vec<SentenceReply>> {
    parse_completion(raw, "sentences")
}

/// Pairs each word with the sentences generated for its id, keeping the order
/// of `words`. Words without a reply entry are left out. If the reply repeats
/// an id, the last entry wins.
pub fn merge_sentences(words: Vec<Word>, replies: Vec<SentenceReply>) -> Vec<WordSentences> {
    let mut by_id: HashMap<i64, Vec<String>> = replies
        .into_iter()
        .map(|reply| (reply.word_id, reply.sentences))
        .collect();

    words
        .into_iter()
        .filter_map(|word| {
            let sentences = by_id.remove(&word.id)?;
            Some(WordSentences {
                word: vec![word],
                sentences,
            })
        })
        .collect()
}
