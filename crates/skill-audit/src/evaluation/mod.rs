//! Weighted rubric evaluation of skill descriptors.
//!
//! Scoring is a pure, synchronous computation over an in-memory document: no I/O, no
//! shared mutable state, and identical input yields identical scores. The evaluation
//! timestamp is the only time-dependent field and never feeds into scoring.

mod checklist;
mod grade;
pub mod paths;
mod report;
mod router;
mod rubric;
mod scorers;
mod text;

#[cfg(test)]
mod tests;

pub use grade::LetterGrade;
pub use report::{BatchSummary, CategoryScore, DocumentRef, Finding, FindingKind, Issue, SkillScore};
pub use router::{evaluation_router, BatchRequest, BatchResponse, ScoreResponse};
pub use rubric::{Category, CategoryId, Rubric, RubricError, MAX_CATEGORY_SCORE, WEIGHT_TOLERANCE};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::document::SkillDocument;
use text::Subject;

/// Stateless evaluator that applies a validated rubric to skill documents.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    rubric: Rubric,
}

impl EvaluationEngine {
    pub fn new(rubric: Rubric) -> Self {
        Self { rubric }
    }

    pub fn standard() -> Result<Self, RubricError> {
        Ok(Self::new(Rubric::standard()?))
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn score(&self, document: &SkillDocument) -> SkillScore {
        self.score_at(document, Utc::now())
    }

    /// Score with an explicit timestamp; the result depends only on the inputs.
    pub fn score_at(&self, document: &SkillDocument, evaluated_at: DateTime<Utc>) -> SkillScore {
        let subject = Subject::new(document);

        let categories = self
            .rubric
            .categories()
            .iter()
            .map(|category| {
                let (raw_score, findings) = scorers::score_category(category.id, &subject);
                CategoryScore::new(*category, raw_score, findings)
            })
            .collect();

        let score = SkillScore::aggregate(DocumentRef::from(document), categories, evaluated_at);
        debug!(
            skill = %score.document.name,
            total = score.total_score,
            grade = %score.letter_grade,
            "skill evaluated"
        );
        score
    }

    /// Score every document with one shared evaluation instant.
    pub fn score_batch(&self, documents: &[SkillDocument]) -> Vec<SkillScore> {
        let evaluated_at = Utc::now();
        documents
            .iter()
            .map(|document| self.score_at(document, evaluated_at))
            .collect()
    }
}
