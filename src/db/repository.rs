use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::{NewWord, Word, WordStatus};

use super::schema::SCHEMA;

const WORD_COLUMNS: &str = "id, word, meanings, pronunciation, is_active, created_at";

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path).await?;
        Self::init(conn).await
    }

    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    // Word operations

    /// Inserts a new active word. Word text is unique across active and
    /// inactive rows alike.
    pub async fn add_word(&self, new_word: NewWord) -> Result<Word> {
        let meanings_json = serde_json::to_string(&new_word.meanings)?;
        let created_at = Utc::now().to_rfc3339();
        let text = new_word.word.clone();

        let inserted = self
            .conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO words (word, meanings, pronunciation, is_active, created_at)
                       VALUES (?1, ?2, ?3, 1, ?4)"#,
                    params![new_word.word, meanings_json, new_word.pronunciation, created_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await;

        let id = match inserted {
            Ok(id) => id,
            Err(err) if is_unique_violation(&err) => {
                tracing::warn!(word = %text, "Rejected duplicate word");
                return Err(AppError::Conflict(text));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(id, word = %text, "Word added");
        self.get_word_by_id(id).await
    }

    /// Exact, case-sensitive lookup.
    pub async fn get_word_by_text(&self, text: &str) -> Result<Word> {
        let needle = text.to_string();
        let word = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {WORD_COLUMNS} FROM words WHERE word = ?1"
                ))?;
                let word = stmt.query_row(params![needle], word_from_row).optional()?;
                Ok(word)
            })
            .await?;
        word.ok_or_else(|| AppError::NotFound(format!("word {text:?}")))
    }

    pub async fn get_word_by_id(&self, id: i64) -> Result<Word> {
        let word = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {WORD_COLUMNS} FROM words WHERE id = ?1"
                ))?;
                let word = stmt.query_row(params![id], word_from_row).optional()?;
                Ok(word)
            })
            .await?;
        word.ok_or_else(|| AppError::NotFound(format!("word id {id}")))
    }

    /// Active words in insertion order.
    pub async fn list_active_words(&self) -> Result<Vec<Word>> {
        let words = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {WORD_COLUMNS} FROM words WHERE is_active = 1 ORDER BY id"
                ))?;
                let words = stmt
                    .query_map([], word_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(words)
            })
            .await?;
        Ok(words)
    }

    /// Soft delete. Deactivating an already inactive word succeeds.
    pub async fn deactivate_word(&self, id: i64) -> Result<()> {
        let updated = self
            .conn
            .call(move |conn| {
                let updated = conn.execute(
                    "UPDATE words SET is_active = 0 WHERE id = ?1",
                    params![id],
                )?;
                Ok(updated)
            })
            .await?;

        if updated == 0 {
            return Err(AppError::NotFound(format!("word id {id}")));
        }
        tracing::info!(id, "Word deactivated");
        Ok(())
    }
}

fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
    matches!(
        err,
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(failure, _))
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339 first (e.g., "2026-01-11T12:34:56+00:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Try SQLite datetime format (e.g., "2026-01-11 12:34:56")
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

fn word_from_row(row: &Row<'_>) -> rusqlite::Result<Word> {
    let meanings_raw: String = row.get(2)?;
    let meanings = serde_json::from_str(&meanings_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let created_raw: String = row.get(5)?;
    let created_at = parse_datetime(&created_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Text,
            format!("invalid timestamp {created_raw:?}").into(),
        )
    })?;

    Ok(Word {
        id: row.get(0)?,
        word: row.get(1)?,
        meanings,
        pronunciation: row.get(3)?,
        status: WordStatus::from_flag(row.get::<_, i64>(4)? != 0),
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_word(text: &str) -> NewWord {
        NewWord {
            word: text.to_string(),
            meanings: vec!["first meaning".to_string(), "second meaning".to_string()],
            pronunciation: format!("{text}-pron"),
        }
    }

    #[tokio::test]
    async fn add_word_returns_active_record() {
        let repo = Repository::open_in_memory().await.unwrap();
        let before = Utc::now();

        let word = repo.add_word(new_word("ephemeral")).await.unwrap();

        assert!(word.id > 0);
        assert_eq!(word.status, WordStatus::Active);
        assert_eq!(word.meanings, vec!["first meaning", "second meaning"]);
        assert!(word.created_at >= before - chrono::Duration::seconds(1));
        assert!(word.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn duplicate_word_is_a_conflict_and_keeps_original() {
        let repo = Repository::open_in_memory().await.unwrap();
        let original = repo.add_word(new_word("ephemeral")).await.unwrap();

        let mut duplicate = new_word("ephemeral");
        duplicate.pronunciation = "different".to_string();
        let err = repo.add_word(duplicate).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref w) if w == "ephemeral"));
        let stored = repo.get_word_by_text("ephemeral").await.unwrap();
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn duplicate_of_inactive_word_is_still_a_conflict() {
        let repo = Repository::open_in_memory().await.unwrap();
        let word = repo.add_word(new_word("laconic")).await.unwrap();
        repo.deactivate_word(word.id).await.unwrap();

        let err = repo.add_word(new_word("laconic")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn lookup_by_text_is_case_sensitive() {
        let repo = Repository::open_in_memory().await.unwrap();
        repo.add_word(new_word("Quixotic")).await.unwrap();

        assert!(repo.get_word_by_text("Quixotic").await.is_ok());
        let err = repo.get_word_by_text("quixotic").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn lookup_by_missing_id_is_not_found() {
        let repo = Repository::open_in_memory().await.unwrap();
        let err = repo.get_word_by_id(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn deactivate_is_idempotent() {
        let repo = Repository::open_in_memory().await.unwrap();
        let word = repo.add_word(new_word("sonder")).await.unwrap();

        repo.deactivate_word(word.id).await.unwrap();
        repo.deactivate_word(word.id).await.unwrap();

        let stored = repo.get_word_by_id(word.id).await.unwrap();
        assert_eq!(stored.status, WordStatus::Inactive);
    }

    #[tokio::test]
    async fn deactivate_missing_id_is_not_found() {
        let repo = Repository::open_in_memory().await.unwrap();
        let err = repo.deactivate_word(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_active_skips_inactive_words() {
        let repo = Repository::open_in_memory().await.unwrap();
        let a = repo.add_word(new_word("alpha")).await.unwrap();
        let b = repo.add_word(new_word("beta")).await.unwrap();
        let c = repo.add_word(new_word("gamma")).await.unwrap();
        repo.deactivate_word(b.id).await.unwrap();

        let active = repo.list_active_words().await.unwrap();

        let ids: Vec<i64> = active.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
        assert!(active.iter().all(Word::is_active));
    }

    #[tokio::test]
    async fn words_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("words.db");
        let path = path.to_string_lossy().to_string();

        {
            let repo = Repository::new(&path).await.unwrap();
            repo.add_word(new_word("petrichor")).await.unwrap();
        }

        let repo = Repository::new(&path).await.unwrap();
        let word = repo.get_word_by_text("petrichor").await.unwrap();
        assert!(word.is_active());
    }

    #[test]
    fn parses_both_timestamp_formats() {
        assert!(parse_datetime("2026-01-11T12:34:56.123456+00:00").is_some());
        assert!(parse_datetime("2026-01-11 12:34:56").is_some());
        assert!(parse_datetime("yesterday").is_none());
    }
}
