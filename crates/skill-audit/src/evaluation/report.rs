use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::grade::LetterGrade;
use super::rubric::{Category, CategoryId, MAX_CATEGORY_SCORE};
use crate::document::SkillDocument;

/// Outcome class of a single sub-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Pass,
    Fail,
    Warning,
    Info,
}

impl FindingKind {
    pub fn is_issue(self) -> bool {
        matches!(self, FindingKind::Fail | FindingKind::Warning)
    }
}

/// Reported outcome of one sub-check, with the points it earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub check: &'static str,
    pub message: String,
    pub points: f64,
    pub max_points: f64,
}

impl Finding {
    pub fn lost_points(&self) -> f64 {
        (self.max_points - self.points).max(0.0)
    }
}

/// Raw and weighted result for one rubric category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
    pub percentage: f64,
    pub weighted_score: f64,
    pub findings: Vec<Finding>,
}

impl CategoryScore {
    /// Clamp the summed sub-check points into `[0, max_score]` and derive the rest.
    pub fn new(category: Category, raw_score: f64, findings: Vec<Finding>) -> Self {
        let score = if raw_score.is_finite() {
            raw_score.clamp(0.0, category.max_score)
        } else {
            0.0
        };

        Self {
            category,
            score,
            percentage: score / category.max_score * 100.0,
            weighted_score: score * category.weight,
            findings,
        }
    }

    pub fn lost_points(&self) -> f64 {
        self.category.max_score - self.score
    }

    pub fn issues(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| finding.kind.is_issue())
    }
}

/// Identifying metadata of the evaluated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub name: String,
    pub description: String,
    pub has_descriptor: bool,
    pub file_count: usize,
}

impl From<&SkillDocument> for DocumentRef {
    fn from(document: &SkillDocument) -> Self {
        Self {
            name: document.name.clone(),
            description: document.description.clone(),
            has_descriptor: document.has_descriptor(),
            file_count: document.structure.file_count,
        }
    }
}

/// One actionable problem, ranked by how much weighted score it cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub category: CategoryId,
    pub kind: FindingKind,
    pub check: &'static str,
    pub message: String,
    pub lost_weighted_points: f64,
}

/// Immutable result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillScore {
    pub document: DocumentRef,
    pub categories: Vec<CategoryScore>,
    pub total_score: f64,
    pub max_total_score: f64,
    pub percentage: f64,
    pub letter_grade: LetterGrade,
    pub evaluated_at: DateTime<Utc>,
}

impl SkillScore {
    pub(crate) fn aggregate(
        document: DocumentRef,
        categories: Vec<CategoryScore>,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        let total_score: f64 = categories
            .iter()
            .map(|category| category.weighted_score)
            .sum();
        let total_score = total_score.clamp(0.0, MAX_CATEGORY_SCORE);
        let percentage = total_score / MAX_CATEGORY_SCORE * 100.0;

        Self {
            document,
            categories,
            total_score,
            max_total_score: MAX_CATEGORY_SCORE,
            percentage,
            letter_grade: LetterGrade::from_percentage(percentage),
            evaluated_at,
        }
    }

    pub fn category(&self, id: CategoryId) -> Option<&CategoryScore> {
        self.categories
            .iter()
            .find(|category| category.category.id == id)
    }

    /// Fail and warning findings, most costly first; ties keep rubric order.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .categories
            .iter()
            .flat_map(|category| {
                category.issues().map(move |finding| Issue {
                    category: category.category.id,
                    kind: finding.kind,
                    check: finding.check,
                    message: finding.message.clone(),
                    lost_weighted_points: finding.lost_points() * category.category.weight,
                })
            })
            .collect();

        issues.sort_by(|a, b| b.lost_weighted_points.total_cmp(&a.lost_weighted_points));
        issues
    }

    pub fn summary(&self) -> String {
        let name = if self.document.name.is_empty() {
            "unnamed skill"
        } else {
            self.document.name.as_str()
        };
        let issue_count = self
            .categories
            .iter()
            .map(|category| category.issues().count())
            .sum::<usize>();

        format!(
            "{}: {} ({:.1}%, {:.2}/{:.0}) with {} issue(s)",
            name,
            self.letter_grade,
            self.percentage,
            self.total_score,
            self.max_total_score,
            issue_count
        )
    }
}

/// Roll-up over a batch of evaluations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub evaluated: usize,
    pub passing: usize,
    pub mean_percentage: f64,
    pub grades: BTreeMap<LetterGrade, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_category: Option<CategoryId>,
}

impl BatchSummary {
    pub fn from_scores(scores: &[SkillScore]) -> Self {
        let evaluated = scores.len();
        let passing = scores
            .iter()
            .filter(|score| score.letter_grade.is_passing())
            .count();

        let mut grades = BTreeMap::new();
        for score in scores {
            *grades.entry(score.letter_grade).or_insert(0) += 1;
        }

        let mean_percentage = if evaluated == 0 {
            0.0
        } else {
            scores.iter().map(|score| score.percentage).sum::<f64>() / evaluated as f64
        };

        let mut per_category: BTreeMap<CategoryId, f64> = BTreeMap::new();
        for category in scores.iter().flat_map(|score| score.categories.iter()) {
            *per_category.entry(category.category.id).or_insert(0.0) += category.percentage;
        }
        let weakest_category = per_category
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);

        Self {
            evaluated,
            passing,
            mean_percentage,
            grades,
            weakest_category,
        }
    }
}
