use super::*;
use crate::srs::SrsError;
use chrono::{Duration, TimeZone};

async fn test_app() -> App {
    let db = Db::in_memory().await.unwrap();
    App::with_db(db, &Config::default())
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap()
}

async fn answer(
    app: &App,
    id: i64,
    correct: bool,
    times: usize,
    now: DateTime<Utc>,
) -> ReviewResult {
    let mut last = None;
    for _ in 0..times {
        last = Some(app.submit_review(id, correct, QuestionType::JpToEn, now).await.unwrap());
    }
    last.unwrap()
}

#[tokio::test]
async fn test_seeded_lessons() {
    let app = test_app().await;

    assert_eq!(app.lessons("N5", 100).await.unwrap().total_available, 54);
    assert_eq!(app.lessons("N4", 100).await.unwrap().total_available, 30);

    let all = app.lessons("All", 15).await.unwrap();
    assert_eq!(all.total_available, 84);
    assert_eq!(all.lessons.len(), 15);

    let err = app.lessons("No Such Deck", 15).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_complete_lessons_creates_child_records() {
    let app = test_app().await;

    let done = app.complete_lessons(&[1, 2, 3, 999, 1], t0()).await.unwrap();
    assert_eq!(done.started, 3);
    assert_eq!(done.lessons_completed, 3);

    let record = app.db.progress_for(2).await.unwrap().unwrap();
    assert_eq!(record.snapshot.stage, Stage::Child);
    assert_eq!(record.snapshot.correct_count, 0);
    assert_eq!(record.snapshot.last_review, Some(t0()));
    assert_eq!(record.snapshot.next_review, t0() + Duration::hours(4));

    let dash = app.dashboard(t0()).await.unwrap();
    assert_eq!(dash.stage_counts["child"], 3);
    assert_eq!(dash.stage_counts["burned"], 0);
    assert_eq!(dash.reviews_due, 0);
    assert_eq!(dash.lessons_available, 15);
    assert_eq!(dash.next_review_time, Some(t0() + Duration::hours(4)));
    assert_eq!(dash.daily_streak, 1);

    // Repeating a lesson does not restart it.
    let again = app.complete_lessons(&[1], t0()).await.unwrap();
    assert_eq!(again.started, 0);
}

#[tokio::test]
async fn test_due_reviews_follow_schedule() {
    let app = test_app().await;
    app.complete_lessons(&[4, 5], t0()).await.unwrap();

    assert!(app.due_reviews(t0() + Duration::hours(3)).await.unwrap().is_empty());

    let due = app.due_reviews(t0() + Duration::hours(4)).await.unwrap();
    let mut ids: Vec<i64> = due.iter().map(|r| r.id).collect();
    ids.sort();
    assert_eq!(ids, vec![4, 5]);
    assert!(due.iter().all(|r| r.srs_stage == Stage::Child));
}

#[tokio::test]
async fn test_promotion_and_demotion_update_words_learned() {
    let app = test_app().await;
    app.complete_lessons(&[1], t0()).await.unwrap();
    let now = t0() + Duration::hours(4);

    let promoted = answer(&app, 1, true, 5, now).await;
    assert_eq!(promoted.srs_stage, Stage::Student);
    assert_eq!(promoted.correct_count, 0);
    assert_eq!(promoted.next_review_date, now + Duration::hours(8));
    assert_eq!(promoted.words_learned, 1);

    let demoted = answer(&app, 1, false, 1, now).await;
    assert_eq!(demoted.srs_stage, Stage::Child);
    assert_eq!(demoted.words_learned, 1);

    // Leaving the lowest stage a second time does not count the word twice.
    let again = answer(&app, 1, true, 5, now).await;
    assert_eq!(again.srs_stage, Stage::Student);
    assert_eq!(again.words_learned, 1);
    assert_eq!(again.level, 1);
}

#[tokio::test]
async fn test_burned_items_leave_the_queue() {
    let app = test_app().await;
    app.complete_lessons(&[6], t0()).await.unwrap();
    let now = t0() + Duration::days(1);

    let burned = answer(&app, 6, true, 20, now).await;
    assert_eq!(burned.srs_stage, Stage::Burned);
    assert_eq!(burned.next_review_date, now + Duration::days(3650));

    assert!(app.due_reviews(now + Duration::days(365 * 20)).await.unwrap().is_empty());
    let dash = app.dashboard(now + Duration::days(365 * 20)).await.unwrap();
    assert_eq!(dash.stage_counts["burned"], 1);
    assert_eq!(dash.reviews_due, 0);
    assert_eq!(dash.next_review_time, None);
}

#[tokio::test]
async fn test_review_without_progress_is_not_found() {
    let app = test_app().await;
    let err = app.submit_review(8, true, QuestionType::EnToJp, t0()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_accuracy_per_direction() {
    let app = test_app().await;
    app.complete_lessons(&[9], t0()).await.unwrap();
    app.submit_review(9, true, QuestionType::JpToEn, t0()).await.unwrap();
    app.submit_review(9, false, QuestionType::EnToJp, t0()).await.unwrap();
    app.submit_review(9, true, QuestionType::EnToJp, t0()).await.unwrap();

    let dash = app.dashboard(t0()).await.unwrap();
    assert_eq!(dash.accuracy_jp_to_en, 100.0);
    assert_eq!(dash.accuracy_en_to_jp, 50.0);
}

#[tokio::test]
async fn test_dictionary() {
    let app = test_app().await;

    let hits = app.search("dog").await.unwrap();
    assert!(hits.iter().any(|v| v.word == "犬"));
    assert_eq!(app.search("").await.unwrap().len(), 84);
    assert!(app.search("あし").await.unwrap().iter().any(|v| v.word == "足"));
    assert!(app.search("zzzz").await.unwrap().is_empty());

    let detail = app.word_detail(8).await.unwrap();
    assert_eq!(detail.item.word, "足");
    assert_eq!(detail.srs_stage, None);

    app.complete_lessons(&[8], t0()).await.unwrap();
    let detail = app.word_detail(8).await.unwrap();
    assert_eq!(detail.srs_stage, Some(Stage::Child));
    assert_eq!(detail.last_review_date, Some(t0()));

    assert!(matches!(app.word_detail(9999).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_deck_upload() {
    let app = test_app().await;

    let uploaded = app
        .upload_deck("Animals", "word,meaning\n猫,cat\n鳥,bird\n")
        .await
        .unwrap();
    assert_eq!(uploaded.words_imported, 2);

    let decks = app.decks().await.unwrap();
    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0].deck.name, "Animals");
    assert_eq!(decks[0].vocabulary.len(), 2);
    assert!(decks[0].vocabulary.iter().all(|v| v.jlpt_level == "Custom"));

    let lessons = app.lessons("Animals", 15).await.unwrap();
    assert_eq!(lessons.total_available, 2);

    let dup = app.upload_deck("Animals", "word,meaning\n犬,dog\n").await.unwrap_err();
    assert!(matches!(dup, AppError::Conflict(_)));
    let unnamed = app.upload_deck("  ", "word,meaning\n犬,dog\n").await.unwrap_err();
    assert!(matches!(unnamed, AppError::BadRequest(_)));
    let empty = app.upload_deck("Empty", "word,meaning\n").await.unwrap_err();
    assert!(matches!(empty, AppError::Import(_)));
    assert_eq!(app.decks().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reset_clears_progress_and_stats() {
    let app = test_app().await;
    app.complete_lessons(&[1, 2], t0()).await.unwrap();
    answer(&app, 1, true, 5, t0()).await;

    assert_eq!(app.reset().await.unwrap(), 2);

    let stats = app.stats().await.unwrap();
    assert_eq!(stats, AggregateStats::default());
    assert!(app.db.progress_for(1).await.unwrap().is_none());
    assert_eq!(app.lessons("All", 15).await.unwrap().total_available, 84);

    let settings = app.settings().await.unwrap();
    assert_eq!(settings.level, 1);
    assert_eq!(settings.total_words_learned, 0);
    assert_eq!(settings.max_lessons_per_day, 15);
}

#[tokio::test]
async fn test_quiz() {
    let app = test_app().await;

    let questions = app.start_quiz(&[8, 999]).await.unwrap();
    assert_eq!(questions.len(), 2);

    let checked = app.check_answer(8, QuestionType::JpToEn, "Leg").await.unwrap();
    assert!(checked.correct);
    assert_eq!(checked.correct_answer, "foot, leg");

    let checked = app.check_answer(8, QuestionType::EnToJp, "て").await.unwrap();
    assert!(!checked.correct);
    assert_eq!(checked.correct_answer, "足");

    assert!(matches!(
        app.check_answer(999, QuestionType::JpToEn, "x").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_zero_limit_returns_no_lessons() {
    let app = test_app().await;
    let none = app.lessons("N5", 0).await.unwrap();
    assert!(none.lessons.is_empty());
    assert_eq!(none.total_available, 54);
}

#[tokio::test]
async fn test_unknown_stored_stage_is_surfaced() {
    let app = test_app().await;
    app.complete_lessons(&[1, 2], t0()).await.unwrap();
    app.db.overwrite_stage_label(1, "Guru").await.unwrap();

    let err = app.submit_review(1, true, QuestionType::JpToEn, t0()).await.unwrap_err();
    assert!(matches!(&err, AppError::Stage(SrsError::UnknownStage(label)) if label == "Guru"));
    assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(matches!(app.word_detail(1).await, Err(AppError::Stage(_))));

    // The failed review wrote nothing back.
    let counts = app.db.stage_counts().await.unwrap();
    assert!(counts.contains(&("Guru".to_string(), 1)));
    assert_eq!(app.stats().await.unwrap().jp_to_en.total, 0);

    // Read-only summaries still count the row, as the lowest stage.
    let dash = app.dashboard(t0()).await.unwrap();
    assert_eq!(dash.stage_counts["child"], 2);
    assert_eq!(dash.stage_counts.len(), 5);

    // Other records review normally.
    let ok = app.submit_review(2, true, QuestionType::JpToEn, t0()).await.unwrap();
    assert_eq!(ok.correct_count, 1);
}
