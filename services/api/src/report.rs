use crate::infra::{build_engine, load_document};
use clap::Args;
use skill_audit::config::AppConfig;
use skill_audit::error::AppError;
use skill_audit::evaluation::{Issue, ScoreResponse};
use skill_audit::{FindingKind, Rubric, SkillScore};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Issues listed in the text report; `--json` always carries all of them.
const MAX_LISTED_ISSUES: usize = 10;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON skill document (`name`, `description`, `content`, `files`)
    pub(crate) path: PathBuf,
    /// Print the full score as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config)?;
    let document = load_document(&args.path)?;

    let score = engine.score(&document);
    let issues = score.issues();

    if args.json {
        let response = ScoreResponse {
            summary: score.summary(),
            score,
            issues,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_score(&score, &issues));
    }

    Ok(())
}

pub(crate) fn run_rubric() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config)?;
    print!("{}", render_rubric(engine.rubric()));
    Ok(())
}

pub(crate) fn render_score(score: &SkillScore, issues: &[Issue]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", score.summary());
    let _ = writeln!(out, "\nCategories");
    for category in &score.categories {
        let _ = writeln!(
            out,
            "- {:<15} {:>4.1}/{:<4} weight {:.2} -> {:.2}",
            category.category.name,
            category.score,
            category.category.max_score,
            category.category.weight,
            category.weighted_score
        );
    }

    if issues.is_empty() {
        let _ = writeln!(out, "\nNo issues found");
        return out;
    }

    let _ = writeln!(out, "\nTop issues");
    for issue in issues.iter().take(MAX_LISTED_ISSUES) {
        let marker = match issue.kind {
            FindingKind::Fail => "fail",
            _ => "warn",
        };
        let _ = writeln!(
            out,
            "  [{marker}] {}/{}: {} (-{:.2})",
            issue.category, issue.check, issue.message, issue.lost_weighted_points
        );
    }
    if issues.len() > MAX_LISTED_ISSUES {
        let _ = writeln!(out, "  ... {} more", issues.len() - MAX_LISTED_ISSUES);
    }

    out
}

pub(crate) fn render_rubric(rubric: &Rubric) -> String {
    let mut out = String::from("Skill quality rubric\n");
    for category in rubric.categories() {
        let _ = writeln!(
            out,
            "- {:<15} {:>5.1}%  {}",
            category.id.key(),
            category.weight * 100.0,
            category.description
        );
    }
    let _ = writeln!(out, "Total weight {:.3}", rubric.total_weight());
    out
}
