use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a stored word. Removing a word only moves it to `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordStatus {
    Active,
    #[default]
    Inactive,
}

impl WordStatus {
    pub fn is_active(self) -> bool {
        matches!(self, WordStatus::Active)
    }

    pub fn from_flag(active: bool) -> Self {
        if active {
            WordStatus::Active
        } else {
            WordStatus::Inactive
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub word: String,
    pub meanings: Vec<String>,
    pub pronunciation: String,
    #[serde(rename = "is_active", with = "status_flag")]
    pub status: WordStatus,
    pub created_at: DateTime<Utc>,
}

impl Word {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[derive(Debug, Clone)]
pub struct NewWord {
    pub word: String,
    pub meanings: Vec<String>,
    pub pronunciation: String,
}

// Clients see the status as the `is_active` boolean.
mod status_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::WordStatus;

    pub fn serialize<S>(status: &WordStatus, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(status.is_active())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<WordStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(WordStatus::from_flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_status_as_is_active_flag() {
        let word = Word {
            id: 7,
            word: "ephemeral".to_string(),
            meanings: vec!["short-lived".to_string()],
            pronunciation: "ih-FEM-er-uhl".to_string(),
            status: WordStatus::Active,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&word).unwrap();

        assert_eq!(value["is_active"], serde_json::Value::Bool(true));
        assert!(value.get("status").is_none());

        let back: Word = serde_json::from_value(value).unwrap();
        assert_eq!(back, word);
    }

    #[test]
    fn default_status_is_inactive() {
        assert_eq!(WordStatus::default(), WordStatus::Inactive);
        assert!(!WordStatus::from_flag(false).is_active());
    }
}
