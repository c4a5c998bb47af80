use metrics_exporter_prometheus::PrometheusHandle;
use skill_audit::config::AppConfig;
use skill_audit::error::AppError;
use skill_audit::{EvaluationEngine, Rubric, SkillDocument};
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Standard rubric with the configured weight overrides; an invalid table is fatal.
pub(crate) fn build_engine(config: &AppConfig) -> Result<EvaluationEngine, AppError> {
    let rubric = Rubric::standard()?.with_weight_overrides(&config.rubric.weight_overrides)?;
    Ok(EvaluationEngine::new(rubric))
}

pub(crate) fn load_document(path: &Path) -> Result<SkillDocument, AppError> {
    let raw = fs::read_to_string(path)?;
    parse_document(&raw)
}

pub(crate) fn parse_document(raw: &str) -> Result<SkillDocument, AppError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_audit::config::{
        AppEnvironment, RubricConfig, ServerConfig, TelemetryConfig,
    };
    use std::collections::BTreeMap;

    fn config(weight_overrides: BTreeMap<String, f64>) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            rubric: RubricConfig { weight_overrides },
        }
    }

    #[test]
    fn engine_uses_standard_weights_without_overrides() {
        let engine = build_engine(&config(BTreeMap::new())).expect("engine builds");

        assert!((engine.rubric().total_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overrides_that_break_the_weight_sum_are_fatal() {
        let mut overrides = BTreeMap::new();
        overrides.insert("safety".to_string(), 0.5);

        let err = build_engine(&config(overrides)).expect_err("sum no longer one");

        assert!(matches!(err, AppError::Rubric(_)));
    }

    #[test]
    fn documents_parse_from_json() {
        let document = parse_document(r#"{"name":"orphan","files":["notes.txt"]}"#)
            .expect("document parses");

        assert!(!document.has_descriptor());
        assert_eq!(document.structure.file_count, 1);
        assert!(matches!(
            parse_document("[1, 2]"),
            Err(AppError::Document(_))
        ));
    }

    #[test]
    fn missing_document_file_is_an_io_error() {
        let err = load_document(Path::new("does/not/exist.json")).expect_err("no such file");

        assert!(matches!(err, AppError::Io(_)));
    }
}
