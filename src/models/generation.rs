use serde::{Deserialize, Deserializer, Serialize};

use super::Word;

/// A word echoed back by the model alongside a generated paragraph. These are
/// the model's own copies, not rows from the word table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub pronunciation: String,
    pub meanings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedParagraph {
    pub paragraph: String,
    pub words: Vec<WordEntry>,
}

/// One element of the sentence-generation reply array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SentenceReply {
    #[serde(rename = "word", deserialize_with = "word_id")]
    pub word_id: i64,
    pub sentences: Vec<String>,
}

/// A stored word paired with the sentences generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSentences {
    pub word: Vec<Word>,
    pub sentences: Vec<String>,
}

/// Ids go out as decimal text; accept them back either as that text or as a
/// bare JSON number.
fn word_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid word id: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_id_accepts_text_and_number() {
        let from_text: SentenceReply =
            serde_json::from_str(r#"{"word": " 12 ", "sentences": []}"#).unwrap();
        let from_number: SentenceReply =
            serde_json::from_str(r#"{"word": 12, "sentences": []}"#).unwrap();

        assert_eq!(from_text.word_id, 12);
        assert_eq!(from_number.word_id, 12);
    }

    #[test]
    fn word_id_rejects_word_text() {
        let result = serde_json::from_str::<SentenceReply>(
            r#"{"word": "ephemeral", "sentences": ["a"]}"#,
        );
        assert!(result.is_err());
    }
}
