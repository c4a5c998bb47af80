use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::evaluation::checklist::{Check, Outcome, Rule};
use crate::evaluation::text::Subject;

const SINGLE_PURPOSE_WORDS: usize = 30;
const BROAD_PURPOSE_WORDS: usize = 60;
const MIN_SHARED_TOKEN_LEN: usize = 3;

const CONJUNCTIONS: &[&str] = &[
    " and also ",
    " as well as ",
    "; ",
    " additionally",
    " plus ",
    " along with ",
];
const TRIGGER_TERMS: &[&str] = &[
    "use when",
    "use this skill",
    "when the user",
    "when you need",
    "when asked",
    "trigger",
    "invoke",
    "activate",
    "applies when",
];
const NEGATIVE_ROUTING_TERMS: &[&str] = &[
    "do not use",
    "don't use",
    "not for",
    "instead use",
    "use instead",
    "not intended for",
    "not suitable for",
    "not designed for",
    "avoid using",
];
const USE_WHEN_TERMS: &[&str] = &["use when", "use this skill when", "use it when"];
const IO_TERMS: &[&str] = &["input", "output", "returns", "accepts", "produces"];
const CONFLICT_TERMS: &[&str] = &[
    "override",
    "replace the",
    "replaces",
    "conflict",
    "supersede",
    "take precedence",
    "takes precedence",
    "ignore previous",
    "ignore other",
    "ignore all",
];

pub(super) static CHECKS: &[Check] = &[
    Check {
        label: "single_responsibility",
        points: 2.0,
        rule: Rule::Custom(single_responsibility),
    },
    Check {
        label: "name_alignment",
        points: 1.5,
        rule: Rule::Custom(name_alignment),
    },
    Check {
        label: "trigger_specificity",
        points: 1.5,
        rule: Rule::Present {
            groups: &[TRIGGER_TERMS],
            found: "Trigger conditions are specific",
            missing: "No explicit trigger conditions",
        },
    },
    Check {
        label: "negative_routing",
        points: 2.0,
        rule: Rule::Present {
            groups: &[NEGATIVE_ROUTING_TERMS],
            found: "Gives a counter-example of when not to use the skill",
            missing: "No negative routing example (e.g. 'do not use for ...')",
        },
    },
    Check {
        label: "routing_signal",
        points: 1.5,
        rule: Rule::Custom(routing_signal),
    },
    Check {
        label: "conflict_avoidance",
        points: 1.5,
        rule: Rule::Absent {
            terms: CONFLICT_TERMS,
            clear: "Does not try to override other skills",
            found: "Language suggests overriding or conflicting with other skills",
        },
    },
];

fn tool_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"`[A-Za-z][\w.-]*`").expect("tool token pattern compiles"))
}

fn tokens(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_SHARED_TOKEN_LEN)
        .map(str::to_lowercase)
        .collect()
}

fn single_responsibility(subject: &Subject<'_>) -> Outcome {
    if !subject.document.has_descriptor() {
        return Outcome::no_descriptor();
    }

    let description = subject.document.description.trim();
    let words = description.split_whitespace().count();
    if words == 0 {
        return Outcome::fail("No description to establish a single purpose");
    }

    let padded = format!(" {} ", description.to_lowercase());
    let conjunction = CONJUNCTIONS.iter().find(|term| padded.contains(*term));

    match conjunction {
        None if words <= SINGLE_PURPOSE_WORDS => {
            Outcome::pass(format!("Focused description ({words} words)"))
        }
        _ if words <= BROAD_PURPOSE_WORDS => Outcome::partial(
            0.5,
            format!("Description may cover several purposes ({words} words)"),
        ),
        _ => Outcome::fail(format!("Description is too broad ({words} words)")),
    }
}

fn name_alignment(subject: &Subject<'_>) -> Outcome {
    if !subject.document.has_descriptor() {
        return Outcome::no_descriptor();
    }

    let description = subject.document.description.trim();
    if description.is_empty() {
        return Outcome::fail("No description to align with the name");
    }

    let name_tokens = tokens(&subject.document.name);
    let description_tokens = tokens(description);
    if name_tokens
        .iter()
        .any(|token| description_tokens.contains(token))
    {
        Outcome::pass("Name and description share vocabulary")
    } else {
        Outcome::pass("Description present")
    }
}

fn routing_signal(subject: &Subject<'_>) -> Outcome {
    if subject.has_any(USE_WHEN_TERMS) {
        return Outcome::pass("Explicit 'use when' routing phrase");
    }

    let tool_token = tool_token_pattern().is_match(subject.original);
    let io_vocabulary = subject.has_any(IO_TERMS);
    if tool_token && io_vocabulary {
        Outcome::pass("Named tool with stated inputs and outputs")
    } else {
        Outcome::fail("Weak routing signal: no 'use when' phrase or named tool with inputs/outputs")
    }
}
