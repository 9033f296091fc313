use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::db::{Db, LessonFilter};
use crate::error::{AppError, AppResult};
use crate::import::parse_deck_csv;
use crate::level::LevelPolicy;
use crate::models::{Deck, ProgressRecord, VocabularyItem};
use crate::quiz::{self, QuizQuestion};
use crate::srs::{SrsScheduler, Stage, StageInfo, StageTable};
use crate::stats::{AggregateStats, LearnerId, QuestionType};

const SEARCH_LIMIT: u32 = 100;
const MAX_LESSON_BATCH: u32 = 100;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub level: u32,
    pub words_learned: u32,
    pub lessons_completed: u32,
    pub daily_streak: u32,
    pub accuracy_jp_to_en: f64,
    pub accuracy_en_to_jp: f64,
    pub stage_counts: BTreeMap<String, i64>,
    pub reviews_due: usize,
    pub lessons_available: i64,
    pub next_review_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct Lessons {
    pub lessons: Vec<VocabularyItem>,
    pub total_available: i64,
}

#[derive(Debug, Serialize)]
pub struct LessonsCompleted {
    pub started: u32,
    pub lessons_completed: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewItem {
    pub id: i64,
    pub word: String,
    pub kana: String,
    pub english: String,
    pub srs_stage: Stage,
    pub question_type: QuestionType,
}

#[derive(Debug, Serialize)]
pub struct ReviewResult {
    pub vocabulary_id: i64,
    pub srs_stage: Stage,
    pub correct_count: u32,
    pub next_review_date: DateTime<Utc>,
    pub level: u32,
    pub words_learned: u32,
}

#[derive(Debug, Serialize)]
pub struct WordDetail {
    #[serde(flatten)]
    pub item: VocabularyItem,
    pub srs_stage: Option<Stage>,
    pub last_review_date: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct DeckView {
    #[serde(flatten)]
    pub deck: Deck,
    pub vocabulary: Vec<VocabularyItem>,
}

#[derive(Debug, Serialize)]
pub struct DeckUploaded {
    pub deck_id: i64,
    pub deck_name: String,
    pub words_imported: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Settings {
    pub max_lessons_per_day: u32,
    pub promote_threshold: u32,
    pub theme: &'static str,
    pub level: u32,
    pub total_words_learned: u32,
}

#[derive(Debug, Serialize)]
pub struct AnswerChecked {
    pub correct: bool,
    pub correct_answer: String,
}

/// The learning service: storage plus the scheduling and level policies.
pub struct App {
    pub db: Db,
    pub srs: SrsScheduler,
    pub levels: LevelPolicy,
    pub learner: LearnerId,
    pub max_lessons_per_day: u32,
}

impl App {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db = Db::connect(&config.database_url, config.db_max_connections).await?;
        Ok(Self::with_db(db, config))
    }

    pub fn with_db(db: Db, config: &Config) -> Self {
        Self {
            db,
            srs: SrsScheduler::new(StageTable::default(), config.promote_threshold),
            levels: LevelPolicy::default(),
            learner: LearnerId::new(config.learner_id.clone()),
            max_lessons_per_day: config.max_lessons_per_day,
        }
    }

    pub async fn stats(&self) -> AppResult<AggregateStats> {
        Ok(self.db.stats(&self.learner).await?)
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> AppResult<Dashboard> {
        let stats = self.stats().await?;

        let mut stage_counts: BTreeMap<String, i64> = Stage::ALL
            .iter()
            .map(|s| (s.as_str().to_lowercase(), 0))
            .collect();
        for (label, n) in self.db.stage_counts().await? {
            let stage = Stage::parse_or_lowest(&label);
            *stage_counts.entry(stage.as_str().to_lowercase()).or_default() += n;
        }

        let schedule = self.db.review_schedule().await?;
        let reviews_due = schedule.iter().filter(|s| self.srs.is_due(s, now)).count();
        let next_review_time = schedule.iter().map(|s| s.next_review).min();

        let unstarted = self.db.count_unstarted(&LessonFilter::All).await?;

        Ok(Dashboard {
            level: stats.level,
            words_learned: stats.words_learned,
            lessons_completed: stats.lessons_completed,
            daily_streak: stats.daily_streak,
            accuracy_jp_to_en: stats.tally(QuestionType::JpToEn).accuracy(),
            accuracy_en_to_jp: stats.tally(QuestionType::EnToJp).accuracy(),
            stage_counts,
            reviews_due,
            lessons_available: unstarted.min(i64::from(self.max_lessons_per_day)),
            next_review_time,
        })
    }

    pub fn stage_info(&self) -> Vec<StageInfo> {
        self.srs.table().describe()
    }

    async fn lesson_filter(&self, source: &str) -> AppResult<LessonFilter> {
        match source {
            "" | "All" => Ok(LessonFilter::All),
            "N5" | "N4" | "N3" | "N2" | "N1" => Ok(LessonFilter::JlptLevel(source.to_string())),
            name => match self.db.deck_by_name(name).await? {
                Some(deck) => Ok(LessonFilter::Deck(deck.id)),
                None => Err(AppError::NotFound(format!("no deck named '{}'", name))),
            },
        }
    }

    pub async fn lessons(&self, source: &str, limit: u32) -> AppResult<Lessons> {
        let filter = self.lesson_filter(source).await?;
        let limit = limit.min(MAX_LESSON_BATCH);
        Ok(Lessons {
            lessons: self.db.unstarted_vocabulary(&filter, limit).await?,
            total_available: self.db.count_unstarted(&filter).await?,
        })
    }

    pub async fn complete_lessons(
        &self,
        ids: &[i64],
        now: DateTime<Utc>,
    ) -> AppResult<LessonsCompleted> {
        let start = self.srs.start(now);
        let (started, stats) = self.db.start_progress(&self.learner, ids, &start, now).await?;
        log::info!("started {} of {} requested lessons", started, ids.len());
        Ok(LessonsCompleted {
            started,
            lessons_completed: stats.lessons_completed,
        })
    }

    /// Items due at `now`, interleaved, each with a random question direction.
    pub async fn due_reviews(&self, now: DateTime<Utc>) -> AppResult<Vec<ReviewItem>> {
        let due: Vec<ReviewItem> = self
            .db
            .active_reviews()
            .await?
            .into_iter()
            .filter(|(record, _)| self.srs.is_due(&record.snapshot, now))
            .map(|(record, item)| ReviewItem {
                id: item.id,
                word: item.word,
                kana: item.kana,
                english: item.english,
                srs_stage: record.snapshot.stage,
                question_type: QuestionType::JpToEn,
            })
            .collect();
        Ok(interleave(due))
    }

    pub async fn submit_review(
        &self,
        vocabulary_id: i64,
        correct: bool,
        question_type: QuestionType,
        now: DateTime<Utc>,
    ) -> AppResult<ReviewResult> {
        let srs = &self.srs;
        let levels = &self.levels;

        let (record, stats) = self
            .db
            .update_progress(&self.learner, vocabulary_id, |current, stats| {
                let snapshot = srs.apply_review(&current.snapshot, correct, now);
                let newly_learned = !current.ever_promoted && snapshot.stage > Stage::LOWEST;
                stats.record_review(question_type, correct, newly_learned, now, levels);
                ProgressRecord {
                    vocabulary_id: current.vocabulary_id,
                    snapshot,
                    ever_promoted: current.ever_promoted || newly_learned,
                }
            })
            .await?
            .ok_or_else(|| AppError::NotFound("Progress not found".to_string()))?;

        log::debug!(
            "review of {}: correct={} -> {} ({}), next at {}",
            vocabulary_id,
            correct,
            record.snapshot.stage,
            record.snapshot.correct_count,
            record.snapshot.next_review
        );

        Ok(ReviewResult {
            vocabulary_id,
            srs_stage: record.snapshot.stage,
            correct_count: record.snapshot.correct_count,
            next_review_date: record.snapshot.next_review,
            level: stats.level,
            words_learned: stats.words_learned,
        })
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<VocabularyItem>> {
        Ok(self.db.search_vocabulary(query.trim(), SEARCH_LIMIT).await?)
    }

    pub async fn word_detail(&self, id: i64) -> AppResult<WordDetail> {
        let item = self
            .db
            .vocabulary_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Word not found".to_string()))?;
        let progress = self.db.progress_for(id).await?;

        Ok(WordDetail {
            item,
            srs_stage: progress.as_ref().map(|p| p.snapshot.stage),
            last_review_date: progress.as_ref().and_then(|p| p.snapshot.last_review),
            next_review_date: progress.as_ref().map(|p| p.snapshot.next_review),
        })
    }

    pub async fn decks(&self) -> AppResult<Vec<DeckView>> {
        let mut views = Vec::new();
        for deck in self.db.decks().await? {
            let vocabulary = self.db.deck_vocabulary(deck.id).await?;
            views.push(DeckView { deck, vocabulary });
        }
        Ok(views)
    }

    pub async fn upload_deck(&self, deck_name: &str, csv: &str) -> AppResult<DeckUploaded> {
        let name = deck_name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("deck_name is required".to_string()));
        }
        if self.db.deck_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(format!("a deck named '{}' already exists", name)));
        }

        let items = parse_deck_csv(csv)?;
        let deck = self.db.create_deck(name, "", &items).await?;

        Ok(DeckUploaded {
            deck_id: deck.id,
            message: format!("Successfully uploaded {} words to deck '{}'", items.len(), deck.name),
            deck_name: deck.name,
            words_imported: items.len(),
        })
    }

    pub async fn settings(&self) -> AppResult<Settings> {
        let stats = self.stats().await?;
        Ok(Settings {
            max_lessons_per_day: self.max_lessons_per_day,
            promote_threshold: self.srs.promote_threshold(),
            theme: "light",
            level: stats.level,
            total_words_learned: stats.words_learned,
        })
    }

    pub async fn reset(&self) -> AppResult<u64> {
        Ok(self.db.reset(&self.learner).await?)
    }

    pub async fn start_quiz(&self, ids: &[i64]) -> AppResult<Vec<QuizQuestion>> {
        let items = self.db.vocabulary_by_ids(ids).await?;
        Ok(quiz::build_questions(&items))
    }

    pub async fn check_answer(
        &self,
        vocabulary_id: i64,
        question_type: QuestionType,
        answer: &str,
    ) -> AppResult<AnswerChecked> {
        let item = self
            .db
            .vocabulary_by_id(vocabulary_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vocabulary not found".to_string()))?;

        Ok(AnswerChecked {
            correct: quiz::check_answer(&item, question_type, answer),
            correct_answer: quiz::expected_answer(&item, question_type).to_string(),
        })
    }
}

// Interleaved practice: shuffle the batch and mix question directions.
fn interleave(mut items: Vec<ReviewItem>) -> Vec<ReviewItem> {
    let mut rng = rand::thread_rng();
    items.shuffle(&mut rng);
    for item in &mut items {
        item.question_type = if rng.gen_bool(0.5) {
            QuestionType::JpToEn
        } else {
            QuestionType::EnToJp
        };
    }
    items
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
