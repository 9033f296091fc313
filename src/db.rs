use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{
        SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
        SqliteSynchronous,
    },
    ConnectOptions, FromRow, Pool, Row, Sqlite,
};
use std::str::FromStr;
use std::time::Duration;

use crate::data::builtin_vocabulary;
use crate::models::{Deck, NewVocabulary, ProgressRecord, VocabularyItem};
use crate::srs::{ProgressSnapshot, Stage};
use crate::stats::{AggregateStats, LearnerId, Tally};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS decks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT NOT NULL DEFAULT '',
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vocabulary (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        word TEXT NOT NULL,
        kana TEXT NOT NULL,
        english TEXT NOT NULL,
        jlpt_level TEXT NOT NULL,
        part_of_speech TEXT NOT NULL,
        example TEXT NOT NULL DEFAULT '',
        deck_id INTEGER REFERENCES decks(id),
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_vocabulary_jlpt_level ON vocabulary (jlpt_level)",
    "CREATE INDEX IF NOT EXISTS idx_vocabulary_deck_id ON vocabulary (deck_id)",
    // No foreign key on vocabulary_id: progress only refers to the item.
    r#"
    CREATE TABLE IF NOT EXISTS user_progress (
        vocabulary_id INTEGER PRIMARY KEY,
        srs_stage TEXT NOT NULL DEFAULT 'Child',
        correct_count INTEGER NOT NULL DEFAULT 0,
        last_review_date DATETIME,
        next_review_date DATETIME NOT NULL,
        ever_promoted BOOLEAN NOT NULL DEFAULT 0,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_progress_next_review ON user_progress (next_review_date)",
    r#"
    CREATE TABLE IF NOT EXISTS user_stats (
        learner_id TEXT PRIMARY KEY,
        level INTEGER NOT NULL DEFAULT 1,
        words_learned INTEGER NOT NULL DEFAULT 0,
        lessons_completed INTEGER NOT NULL DEFAULT 0,
        daily_streak INTEGER NOT NULL DEFAULT 0,
        total_reviews_jp_to_en INTEGER NOT NULL DEFAULT 0,
        correct_reviews_jp_to_en INTEGER NOT NULL DEFAULT 0,
        total_reviews_en_to_jp INTEGER NOT NULL DEFAULT 0,
        correct_reviews_en_to_jp INTEGER NOT NULL DEFAULT 0,
        last_activity_date DATETIME,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
    "#,
];

/// Which unstarted items a lesson batch is drawn from.
#[derive(Debug, Clone, PartialEq)]
pub enum LessonFilter {
    All,
    JlptLevel(String),
    Deck(i64),
}

impl LessonFilter {
    fn binds(&self) -> (Option<String>, Option<i64>) {
        match self {
            LessonFilter::All => (None, None),
            LessonFilter::JlptLevel(level) => (Some(level.clone()), None),
            LessonFilter::Deck(id) => (None, Some(*id)),
        }
    }
}

#[derive(Clone)]
pub struct Db {
    pool: Pool<Sqlite>,
}

impl Db {
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let in_memory = url.contains(":memory:");
        let mut options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .synchronous(SqliteSynchronous::Normal)
            .log_statements(log::LevelFilter::Trace);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // Every connection to ":memory:" opens its own database, so keep one
        // connection alive for the lifetime of the pool.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };
        let pool = pool_options.connect_with(options).await?;

        let db = Db { pool };
        db.migrate().await?;
        db.seed_database_if_empty().await?;

        Ok(db)
    }

    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::connect("sqlite::memory:", 1).await
    }

    async fn migrate(&self) -> sqlx::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn seed_database_if_empty(&self) -> sqlx::Result<()> {
        if self.count_vocabulary().await? > 0 {
            return Ok(());
        }

        let seed = builtin_vocabulary();
        let mut tx = self.pool.begin().await?;
        for item in &seed {
            insert_vocabulary(&mut tx, item, None).await?;
        }
        tx.commit().await?;

        log::info!("seeded {} built-in vocabulary items", seed.len());
        Ok(())
    }

    // ----- vocabulary -----

    pub async fn count_vocabulary(&self) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT count(*) FROM vocabulary")
            .fetch_one(&self.pool)
            .await
    }

    pub async fn vocabulary_by_id(&self, id: i64) -> sqlx::Result<Option<VocabularyItem>> {
        sqlx::query_as::<_, VocabularyItem>("SELECT * FROM vocabulary WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Items in request order; unknown ids are skipped.
    pub async fn vocabulary_by_ids(&self, ids: &[i64]) -> sqlx::Result<Vec<VocabularyItem>> {
        let mut items = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(item) = self.vocabulary_by_id(id).await? {
                items.push(item);
            }
        }
        Ok(items)
    }

    /// Substring match on word, reading or meaning. An empty query lists
    /// the first `limit` items.
    pub async fn search_vocabulary(
        &self,
        query: &str,
        limit: u32,
    ) -> sqlx::Result<Vec<VocabularyItem>> {
        sqlx::query_as::<_, VocabularyItem>(
            r#"
            SELECT * FROM vocabulary
            WHERE ?1 = ''
                OR instr(word, ?1) > 0
                OR instr(kana, ?1) > 0
                OR instr(lower(english), lower(?1)) > 0
            ORDER BY id
            LIMIT ?2
            "#,
        )
        .bind(query)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn unstarted_vocabulary(
        &self,
        filter: &LessonFilter,
        limit: u32,
    ) -> sqlx::Result<Vec<VocabularyItem>> {
        let (level, deck) = filter.binds();
        sqlx::query_as::<_, VocabularyItem>(
            r#"
            SELECT * FROM vocabulary v
            WHERE NOT EXISTS (SELECT 1 FROM user_progress p WHERE p.vocabulary_id = v.id)
                AND (?1 IS NULL OR v.jlpt_level = ?1)
                AND (?2 IS NULL OR v.deck_id = ?2)
            ORDER BY v.id
            LIMIT ?3
            "#,
        )
        .bind(level)
        .bind(deck)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count_unstarted(&self, filter: &LessonFilter) -> sqlx::Result<i64> {
        let (level, deck) = filter.binds();
        sqlx::query_scalar(
            r#"
            SELECT count(*) FROM vocabulary v
            WHERE NOT EXISTS (SELECT 1 FROM user_progress p WHERE p.vocabulary_id = v.id)
                AND (?1 IS NULL OR v.jlpt_level = ?1)
                AND (?2 IS NULL OR v.deck_id = ?2)
            "#,
        )
        .bind(level)
        .bind(deck)
        .fetch_one(&self.pool)
        .await
    }

    // ----- decks -----

    pub async fn decks(&self) -> sqlx::Result<Vec<Deck>> {
        sqlx::query_as::<_, Deck>("SELECT id, name, description FROM decks ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn deck_by_name(&self, name: &str) -> sqlx::Result<Option<Deck>> {
        sqlx::query_as::<_, Deck>("SELECT id, name, description FROM decks WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn deck_vocabulary(&self, deck_id: i64) -> sqlx::Result<Vec<VocabularyItem>> {
        sqlx::query_as::<_, VocabularyItem>(
            "SELECT * FROM vocabulary WHERE deck_id = ? ORDER BY id",
        )
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create_deck(
        &self,
        name: &str,
        description: &str,
        items: &[NewVocabulary],
    ) -> sqlx::Result<Deck> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query("INSERT INTO decks (name, description) VALUES (?, ?)")
            .bind(name)
            .bind(description)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        for item in items {
            insert_vocabulary(&mut tx, item, Some(id)).await?;
        }
        tx.commit().await?;

        log::info!("created deck '{}' with {} items", name, items.len());
        Ok(Deck {
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    // ----- progress -----

    pub async fn progress_for(&self, vocabulary_id: i64) -> sqlx::Result<Option<ProgressRecord>> {
        sqlx::query_as::<_, ProgressRecord>("SELECT * FROM user_progress WHERE vocabulary_id = ?")
            .bind(vocabulary_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Non-terminal progress joined with its item, soonest review first.
    pub async fn active_reviews(&self) -> sqlx::Result<Vec<(ProgressRecord, VocabularyItem)>> {
        let rows: Vec<SqliteRow> = sqlx::query(
            r#"
            SELECT v.*, p.vocabulary_id, p.srs_stage, p.correct_count,
                   p.last_review_date, p.next_review_date, p.ever_promoted
            FROM user_progress p
            JOIN vocabulary v ON v.id = p.vocabulary_id
            WHERE p.srs_stage != 'Burned'
            ORDER BY p.next_review_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> sqlx::Result<_> {
                Ok((ProgressRecord::from_row(row)?, VocabularyItem::from_row(row)?))
            })
            .collect()
    }

    /// Schedules of every non-terminal record, for read-only summaries.
    /// Unknown stage labels are read as the lowest stage.
    pub async fn review_schedule(&self) -> sqlx::Result<Vec<ProgressSnapshot>> {
        let rows = sqlx::query(
            r#"
            SELECT srs_stage, correct_count, last_review_date, next_review_date
            FROM user_progress
            WHERE srs_stage != 'Burned'
            ORDER BY next_review_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> sqlx::Result<ProgressSnapshot> {
                let label: String = row.try_get("srs_stage")?;
                Ok(ProgressSnapshot {
                    stage: Stage::parse_or_lowest(&label),
                    correct_count: row.try_get::<i64, _>("correct_count")?.max(0) as u32,
                    last_review: row.try_get("last_review_date")?,
                    next_review: row.try_get("next_review_date")?,
                })
            })
            .collect()
    }

    pub async fn stage_counts(&self) -> sqlx::Result<Vec<(String, i64)>> {
        let rows = sqlx::query(
            "SELECT srs_stage, count(*) AS n FROM user_progress GROUP BY srs_stage",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> sqlx::Result<(String, i64)> {
                Ok((row.try_get("srs_stage")?, row.try_get("n")?))
            })
            .collect()
    }

    /// Creates progress for items that exist and have not been started yet.
    /// Returns how many records were created, with the learner's updated stats.
    pub async fn start_progress(
        &self,
        learner: &LearnerId,
        ids: &[i64],
        start: &ProgressSnapshot,
        now: DateTime<Utc>,
    ) -> sqlx::Result<(u32, AggregateStats)> {
        let mut tx = self.pool.begin().await?;

        let mut created = 0u32;
        for &id in ids {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO user_progress
                    (vocabulary_id, srs_stage, correct_count,
                     last_review_date, next_review_date, ever_promoted)
                SELECT ?1, ?2, ?3, ?4, ?5, 0
                WHERE EXISTS (SELECT 1 FROM vocabulary WHERE id = ?1)
                "#,
            )
            .bind(id)
            .bind(start.stage.as_str())
            .bind(i64::from(start.correct_count))
            .bind(start.last_review)
            .bind(start.next_review)
            .execute(&mut *tx)
            .await?;
            created += result.rows_affected() as u32;
        }

        let mut stats = load_stats(&mut tx, learner).await?;
        if created > 0 {
            stats.record_lessons(created, now);
            save_stats(&mut tx, learner, &stats).await?;
        }
        tx.commit().await?;

        Ok((created, stats))
    }

    /// Read-modify-write of one progress record and the learner's stats in a
    /// single transaction. `None` when the item has no progress yet.
    pub async fn update_progress<F>(
        &self,
        learner: &LearnerId,
        vocabulary_id: i64,
        update: F,
    ) -> sqlx::Result<Option<(ProgressRecord, AggregateStats)>>
    where
        F: FnOnce(&ProgressRecord, &mut AggregateStats) -> ProgressRecord,
    {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, ProgressRecord>(
            "SELECT * FROM user_progress WHERE vocabulary_id = ?",
        )
        .bind(vocabulary_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(current) = current else {
            return Ok(None);
        };

        let mut stats = load_stats(&mut tx, learner).await?;
        let next = update(&current, &mut stats);

        sqlx::query(
            r#"
            UPDATE user_progress
            SET srs_stage = ?, correct_count = ?, last_review_date = ?, next_review_date = ?,
                ever_promoted = ?, updated_at = CURRENT_TIMESTAMP
            WHERE vocabulary_id = ?
            "#,
        )
        .bind(next.snapshot.stage.as_str())
        .bind(i64::from(next.snapshot.correct_count))
        .bind(next.snapshot.last_review)
        .bind(next.snapshot.next_review)
        .bind(next.ever_promoted)
        .bind(vocabulary_id)
        .execute(&mut *tx)
        .await?;

        save_stats(&mut tx, learner, &stats).await?;
        tx.commit().await?;

        Ok(Some((next, stats)))
    }

    // ----- stats -----

    pub async fn stats(&self, learner: &LearnerId) -> sqlx::Result<AggregateStats> {
        let mut conn = self.pool.acquire().await?;
        load_stats(&mut conn, learner).await
    }

    /// Drops every progress record and zeroes the learner's stats.
    pub async fn reset(&self, learner: &LearnerId) -> sqlx::Result<u64> {
        let mut tx = self.pool.begin().await?;
        let removed = sqlx::query("DELETE FROM user_progress")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let mut stats = load_stats(&mut tx, learner).await?;
        stats.reset();
        save_stats(&mut tx, learner, &stats).await?;
        tx.commit().await?;

        log::info!("reset: removed {} progress records for learner '{}'", removed, learner);
        Ok(removed)
    }

    #[cfg(test)]
    pub(crate) async fn overwrite_stage_label(
        &self,
        vocabulary_id: i64,
        label: &str,
    ) -> sqlx::Result<()> {
        sqlx::query(
            "UPDATE user_progress SET srs_stage = ?, correct_count = 3 WHERE vocabulary_id = ?",
        )
        .bind(label)
        .bind(vocabulary_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

async fn insert_vocabulary(
    conn: &mut SqliteConnection,
    item: &NewVocabulary,
    deck_id: Option<i64>,
) -> sqlx::Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO vocabulary (word, kana, english, jlpt_level, part_of_speech, example, deck_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.word)
    .bind(&item.kana)
    .bind(&item.english)
    .bind(&item.jlpt_level)
    .bind(&item.part_of_speech)
    .bind(&item.example)
    .bind(deck_id)
    .execute(conn)
    .await?;
    Ok(result.last_insert_rowid())
}

async fn load_stats(
    conn: &mut SqliteConnection,
    learner: &LearnerId,
) -> sqlx::Result<AggregateStats> {
    let row = sqlx::query("SELECT * FROM user_stats WHERE learner_id = ?")
        .bind(learner.as_str())
        .fetch_optional(&mut *conn)
        .await?;

    let Some(row) = row else {
        return Ok(AggregateStats::default());
    };

    let count = |col: &str| -> sqlx::Result<u32> { Ok(row.try_get::<i64, _>(col)?.max(0) as u32) };
    Ok(AggregateStats {
        level: count("level")?.max(1),
        words_learned: count("words_learned")?,
        lessons_completed: count("lessons_completed")?,
        daily_streak: count("daily_streak")?,
        jp_to_en: Tally {
            total: count("total_reviews_jp_to_en")?,
            correct: count("correct_reviews_jp_to_en")?,
        },
        en_to_jp: Tally {
            total: count("total_reviews_en_to_jp")?,
            correct: count("correct_reviews_en_to_jp")?,
        },
        last_activity: row.try_get("last_activity_date")?,
    })
}

async fn save_stats(
    conn: &mut SqliteConnection,
    learner: &LearnerId,
    stats: &AggregateStats,
) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO user_stats (
            learner_id, level, words_learned, lessons_completed, daily_streak,
            total_reviews_jp_to_en, correct_reviews_jp_to_en,
            total_reviews_en_to_jp, correct_reviews_en_to_jp,
            last_activity_date, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, CURRENT_TIMESTAMP)
        ON CONFLICT (learner_id) DO UPDATE SET
            level = ?2, words_learned = ?3, lessons_completed = ?4, daily_streak = ?5,
            total_reviews_jp_to_en = ?6, correct_reviews_jp_to_en = ?7,
            total_reviews_en_to_jp = ?8, correct_reviews_en_to_jp = ?9,
            last_activity_date = ?10, updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(learner.as_str())
    .bind(i64::from(stats.level))
    .bind(i64::from(stats.words_learned))
    .bind(i64::from(stats.lessons_completed))
    .bind(i64::from(stats.daily_streak))
    .bind(i64::from(stats.jp_to_en.total))
    .bind(i64::from(stats.jp_to_en.correct))
    .bind(i64::from(stats.en_to_jp.total))
    .bind(i64::from(stats.en_to_jp.correct))
    .bind(stats.last_activity)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
