//! Deterministic quality scoring for agent skill descriptors.
//!
//! Callers hand the engine an already materialized [`SkillDocument`] and get back an
//! immutable [`SkillScore`]: eight weighted category scores with per-check findings,
//! a 0-10 total, a percentage and a letter grade.

pub mod config;
pub mod document;
pub mod error;
pub mod evaluation;
pub mod telemetry;

pub use document::{SkillDocument, StructureSummary};
pub use evaluation::{
    BatchSummary, Category, CategoryId, CategoryScore, EvaluationEngine, Finding, FindingKind,
    LetterGrade, Rubric, RubricError, SkillScore,
};
