use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

use crate::srs::{ProgressSnapshot, SrsError, Stage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VocabularyItem {
    pub id: i64,
    pub word: String,
    pub kana: String,
    pub english: String,
    pub jlpt_level: String,
    pub part_of_speech: String,
    pub example: String,
    pub deck_id: Option<i64>,
}

/// A vocabulary item that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVocabulary {
    pub word: String,
    pub kana: String,
    pub english: String,
    pub jlpt_level: String,
    pub part_of_speech: String,
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Stored progress for one vocabulary item.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub vocabulary_id: i64,
    pub snapshot: ProgressSnapshot,
    /// Set once the item has left the lowest stage.
    pub ever_promoted: bool,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for ProgressRecord {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        let vocabulary_id: i64 = row.try_get("vocabulary_id")?;
        let label: String = row.try_get("srs_stage")?;
        let correct_count: i64 = row.try_get("correct_count")?;
        let last_review: Option<DateTime<Utc>> = row.try_get("last_review_date")?;
        let next_review: DateTime<Utc> = row.try_get("next_review_date")?;
        let ever_promoted: bool = row.try_get("ever_promoted")?;

        // Unknown labels fail the decode. Read-only callers use `Stage::parse_or_lowest`.
        let stage: Stage = label.parse().map_err(|e: SrsError| sqlx::Error::ColumnDecode {
            index: "srs_stage".to_string(),
            source: Box::new(e),
        })?;

        Ok(ProgressRecord {
            vocabulary_id,
            snapshot: ProgressSnapshot {
                stage,
                correct_count: correct_count.max(0) as u32,
                last_review,
                next_review,
            },
            ever_promoted,
        })
    }
}
