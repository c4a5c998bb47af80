use crate::evaluation::checklist::{Check, Rule};

const FAILURE_TERMS: &[&str] = &[
    "error",
    "fail",
    "exception",
    "crash",
    "abort",
    "non-zero exit",
];
const FALLBACK_TERMS: &[&str] = &[
    "fallback",
    "fall back",
    "retry",
    "retries",
    "alternative",
    "otherwise",
    "instead",
    "if that fails",
    "recover",
    "graceful",
];
const VALIDATION_TERMS: &[&str] = &[
    "validate",
    "validation",
    "verify",
    "check the",
    "check that",
    "exit code",
    "exit status",
    "status code",
    "confirm that",
    "ensure",
    "assert",
];
const EDGE_CASE_TERMS: &[&str] = &[
    "edge case",
    "corner case",
    "empty",
    "missing",
    "boundary",
    "if no ",
    "unexpected",
    "invalid",
    "malformed",
];

pub(super) static CHECKS: &[Check] = &[
    Check {
        label: "failure_modes",
        points: 3.0,
        rule: Rule::Present {
            groups: &[FAILURE_TERMS],
            found: "Failure modes are described",
            missing: "Failure modes are never mentioned",
        },
    },
    Check {
        label: "fallbacks",
        points: 3.0,
        rule: Rule::Present {
            groups: &[FALLBACK_TERMS],
            found: "Fallback or retry path is described",
            missing: "No fallback, retry or alternative path",
        },
    },
    Check {
        label: "validation",
        points: 2.0,
        rule: Rule::Present {
            groups: &[VALIDATION_TERMS],
            found: "Results are validated, failures are not silent",
            missing: "No validation or status checks, failures may go unnoticed",
        },
    },
    Check {
        label: "edge_cases",
        points: 2.0,
        rule: Rule::Present {
            groups: &[EDGE_CASE_TERMS],
            found: "Edge cases are covered",
            missing: "Edge cases are not discussed",
        },
    },
];
