use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::app::App;
use crate::error::AppResult;
use crate::stats::QuestionType;

#[derive(Clone)]
pub struct ApiState {
    pub app: Arc<Mutex<App>>,
}

impl ApiState {
    pub fn new(app: App) -> Self {
        Self {
            app: Arc::new(Mutex::new(app)),
        }
    }
}

pub fn app_router(state: ApiState, cors_origin: Option<&str>) -> anyhow::Result<Router> {
    let cors = match cors_origin {
        None => CorsLayer::permissive(),
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{}'", origin))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any)
        }
    };

    Ok(Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/stages", get(get_stages))
        .route("/api/lessons", get(get_lessons))
        .route("/api/lessons/complete", post(complete_lessons))
        .route("/api/reviews", get(get_reviews))
        .route("/api/reviews/submit", post(submit_review))
        .route("/api/dictionary", get(search_dictionary))
        .route("/api/dictionary/:id", get(get_word_detail))
        .route("/api/decks", get(get_decks))
        .route("/api/decks/upload", post(upload_deck))
        .route("/api/settings", get(get_settings))
        .route("/api/settings/reset", post(reset_all_data))
        .route("/api/quiz/start", post(start_quiz))
        .route("/api/quiz/check", post(check_quiz_answer))
        .layer(cors)
        .with_state(state))
}

async fn get_dashboard(State(state): State<ApiState>) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(app.dashboard(Utc::now()).await?))
}

async fn get_stages(State(state): State<ApiState>) -> impl IntoResponse {
    let app = state.app.lock().await;
    Json(app.stage_info())
}

#[derive(Deserialize)]
struct LessonsQuery {
    #[serde(default = "default_source")]
    source: String,
    #[serde(default = "default_lesson_limit")]
    limit: u32,
}

fn default_source() -> String {
    "N5".to_string()
}

fn default_lesson_limit() -> u32 {
    15
}

async fn get_lessons(
    State(state): State<ApiState>,
    Query(query): Query<LessonsQuery>,
) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(app.lessons(&query.source, query.limit).await?))
}

#[derive(Deserialize)]
struct VocabularyIds {
    vocabulary_ids: Vec<i64>,
}

async fn complete_lessons(
    State(state): State<ApiState>,
    Json(payload): Json<VocabularyIds>,
) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    let done = app.complete_lessons(&payload.vocabulary_ids, Utc::now()).await?;
    Ok(Json(json!({
        "message": "Lessons completed successfully",
        "started": done.started,
        "lessons_completed": done.lessons_completed,
    })))
}

async fn get_reviews(State(state): State<ApiState>) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(app.due_reviews(Utc::now()).await?))
}

#[derive(Deserialize)]
struct SubmitReviewRequest {
    vocabulary_id: i64,
    correct: bool,
    question_type: QuestionType,
}

async fn submit_review(
    State(state): State<ApiState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    let result = app
        .submit_review(payload.vocabulary_id, payload.correct, payload.question_type, Utc::now())
        .await?;
    Ok(Json(result))
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn search_dictionary(
    State(state): State<ApiState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(app.search(&query.q).await?))
}

async fn get_word_detail(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(app.word_detail(id).await?))
}

async fn get_decks(State(state): State<ApiState>) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(app.decks().await?))
}

#[derive(Deserialize)]
struct UploadQuery {
    #[serde(default)]
    deck_name: String,
}

/// The request body is the CSV file itself.
async fn upload_deck(
    State(state): State<ApiState>,
    Query(query): Query<UploadQuery>,
    body: String,
) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(app.upload_deck(&query.deck_name, &body).await?))
}

async fn get_settings(State(state): State<ApiState>) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(app.settings().await?))
}

async fn reset_all_data(State(state): State<ApiState>) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    app.reset().await?;
    Ok(Json(json!({ "message": "All data reset successfully" })))
}

async fn start_quiz(
    State(state): State<ApiState>,
    Json(payload): Json<VocabularyIds>,
) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    let questions = app.start_quiz(&payload.vocabulary_ids).await?;
    Ok(Json(json!({ "questions": questions })))
}

#[derive(Deserialize)]
struct CheckAnswerRequest {
    vocabulary_id: i64,
    user_answer: String,
    question_type: QuestionType,
}

async fn check_quiz_answer(
    State(state): State<ApiState>,
    Json(payload): Json<CheckAnswerRequest>,
) -> AppResult<impl IntoResponse> {
    let app = state.app.lock().await;
    Ok(Json(
        app.check_answer(payload.vocabulary_id, payload.question_type, &payload.user_answer)
            .await?,
    ))
}
