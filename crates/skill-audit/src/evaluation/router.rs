use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::report::{BatchSummary, Issue, SkillScore};
use super::rubric::Category;
use super::EvaluationEngine;
use crate::document::SkillDocument;

/// Single evaluation with its ranked, actionable issues.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub summary: String,
    pub score: SkillScore,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub documents: Vec<SkillDocument>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub summary: BatchSummary,
    pub scores: Vec<SkillScore>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RubricView {
    pub categories: Vec<Category>,
    pub total_weight: f64,
}

/// Router builder exposing the evaluation engine over HTTP.
pub fn evaluation_router(engine: Arc<EvaluationEngine>) -> Router {
    Router::new()
        .route("/api/v1/skills/score", post(score_handler))
        .route("/api/v1/skills/score/batch", post(batch_handler))
        .route("/api/v1/rubric", get(rubric_handler))
        .with_state(engine)
}

pub(crate) async fn score_handler(
    State(engine): State<Arc<EvaluationEngine>>,
    Json(document): Json<SkillDocument>,
) -> Json<ScoreResponse> {
    let score = engine.score(&document);
    Json(ScoreResponse {
        summary: score.summary(),
        issues: score.issues(),
        score,
    })
}

pub(crate) async fn batch_handler(
    State(engine): State<Arc<EvaluationEngine>>,
    Json(request): Json<BatchRequest>,
) -> Json<BatchResponse> {
    let scores = engine.score_batch(&request.documents);
    let summary = BatchSummary::from_scores(&scores);
    info!(
        evaluated = summary.evaluated,
        passing = summary.passing,
        mean_percentage = summary.mean_percentage,
        "skill batch evaluated"
    );
    Json(BatchResponse { summary, scores })
}

pub(crate) async fn rubric_handler(State(engine): State<Arc<EvaluationEngine>>) -> Json<RubricView> {
    let rubric = engine.rubric();
    Json(RubricView {
        categories: rubric.categories().to_vec(),
        total_weight: rubric.total_weight(),
    })
}
