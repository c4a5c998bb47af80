use chrono::{TimeZone, Utc};
use skill_audit::evaluation::paths::{classify_paths, hardcoded_paths, PathVerdict};
use skill_audit::{CategoryId, EvaluationEngine, FindingKind, LetterGrade, SkillDocument};

fn engine() -> EvaluationEngine {
    EvaluationEngine::standard().expect("standard rubric is valid")
}

fn skill(content: &str) -> SkillDocument {
    SkillDocument::new(
        "build-cleanup",
        "Removes stale build artifacts from the workspace.",
        content,
        vec!["SKILL.md".to_string()],
    )
}

#[test]
fn confirmation_language_lifts_safety_score() {
    let engine = engine();
    let unguarded = skill("# Build cleanup\n\nRemove stale artifacts with `rm -rf build/`.");
    let guarded = skill(
        "# Build cleanup\n\nRemove stale artifacts with `rm -rf build/`.\nAsk the user to confirm before deleting.",
    );

    let safety = |document: &SkillDocument| {
        engine
            .score(document)
            .category(CategoryId::Safety)
            .map(|category| category.score)
            .expect("safety scored")
    };

    assert!(safety(&unguarded) < safety(&guarded));
    assert_eq!(safety(&guarded), 7.0);
}

#[test]
fn documents_deserialize_from_the_wire_format() {
    let document: SkillDocument = serde_json::from_str(
        r##"{
            "name": "build-cleanup",
            "description": "Removes stale build artifacts.",
            "content": "# Build cleanup\n\nRun `cargo clean`.",
            "files": ["SKILL.md", "scripts/clean.sh", "debug.log"]
        }"##,
    )
    .expect("document parses");

    let score = engine().score_at(
        &document,
        Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp"),
    );

    assert_eq!(score.document.file_count, 3);
    let structure = score.category(CategoryId::Structure).expect("structure scored");
    let organization = structure
        .findings
        .iter()
        .find(|finding| finding.check == "organization")
        .expect("organization finding");
    assert_eq!(organization.kind, FindingKind::Warning);
    assert_eq!(organization.points, 0.5);
}

#[test]
fn serialized_score_uses_wire_names() {
    let score = engine().score(&SkillDocument::missing("orphan", Vec::new()));

    let payload = serde_json::to_value(&score).expect("score serializes");

    assert_eq!(payload["letter_grade"], serde_json::json!("F"));
    assert_eq!(
        payload["categories"][4]["category"]["id"],
        serde_json::json!("error_handling")
    );
    assert!(payload["evaluated_at"].is_string());
    assert_eq!(score.letter_grade, LetterGrade::F);
}

#[test]
fn classifier_keeps_real_paths_and_drops_url_fragments() {
    let text = "\
Read the config from /etc/app/config.yaml and cache into ~/.cache or /var/tmp/cache.
On Windows use C:\\ProgramData\\app\\state.json.
Docs: https://example.com/docs/setup and //cdn.example.net/assets/app.js.
Call /api/v1/status and /v2/users for health.
Project-relative scripts/run.sh and ./bin/tool are fine.";

    let found = hardcoded_paths(text);

    assert_eq!(
        found,
        vec![
            "/etc/app/config.yaml".to_string(),
            "/var/tmp/cache".to_string(),
            "C:\\ProgramData\\app\\state.json".to_string(),
        ]
    );

    let discarded: Vec<PathVerdict> = classify_paths(text)
        .into_iter()
        .filter(|classified| classified.verdict != PathVerdict::Hardcoded)
        .map(|classified| classified.verdict)
        .collect();
    assert!(discarded.contains(&PathVerdict::ProtocolRelative));
    assert!(discarded.contains(&PathVerdict::ApiRoute));
}
