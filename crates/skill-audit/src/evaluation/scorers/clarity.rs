use std::sync::OnceLock;

use regex::Regex;

use crate::evaluation::checklist::{Check, Outcome, Rule};
use crate::evaluation::text::Subject;

const STEP_TERMS: &[&str] = &["step ", "steps:", "first,", "first ", "then "];
const COMMAND_TERMS: &[&str] = &["```", "`", "$ ", "run ", "execute", "command"];
const HEDGE_WORDS: &[&str] = &[
    "maybe",
    "might",
    "perhaps",
    "possibly",
    "probably",
    "somehow",
    "something",
    "various",
    "etc",
    "as needed",
    "if appropriate",
    "if necessary",
    "and so on",
    "whatever",
];
const SEQUENCE_TERMS: &[&str] = &[
    "first",
    "then",
    "next",
    "finally",
    "afterwards",
    "after that",
    "once ",
];
const TRIGGER_TERMS: &[&str] = &[
    "when ",
    "whenever",
    "if the user",
    "trigger",
    "invoke",
    "use this",
];
const COMPLETION_TERMS: &[&str] = &[
    "success",
    "complete",
    "done",
    "finished",
    "expected result",
    "you should see",
    "verify that",
];

pub(super) static CHECKS: &[Check] = &[
    Check {
        label: "specificity",
        points: 3.0,
        rule: Rule::Custom(specificity),
    },
    Check {
        label: "ambiguity",
        points: 3.0,
        rule: Rule::Tiered {
            terms: HEDGE_WORDS,
            few_credit: 0.5,
            many_credit: 0.25,
            clean: "No hedging language",
            few: "Some hedging language",
            many: "Frequent hedging language",
        },
    },
    Check {
        label: "ordering",
        points: 2.0,
        rule: Rule::Custom(ordering),
    },
    Check {
        label: "actionability",
        points: 2.0,
        rule: Rule::Present {
            groups: &[TRIGGER_TERMS, COMPLETION_TERMS],
            found: "States when to act and what completion looks like",
            missing: "Missing trigger conditions or success criteria",
        },
    },
];

fn numbered_step_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?mi)^\s*(?:\d+[.)]\s|step\s+\d+)").expect("numbered step pattern compiles")
    })
}

fn has_numbered_steps(subject: &Subject<'_>) -> bool {
    numbered_step_pattern().is_match(subject.original)
}

fn specificity(subject: &Subject<'_>) -> Outcome {
    let steps = has_numbered_steps(subject) || subject.has_any(STEP_TERMS);
    let commands = subject.has_any(COMMAND_TERMS);

    match (steps, commands) {
        (true, true) => Outcome::pass("Concrete steps with commands"),
        (true, false) => Outcome::partial(0.5, "Steps are listed but no commands are shown"),
        (false, true) => Outcome::partial(0.5, "Commands are shown without step structure"),
        (false, false) => Outcome::fail("No concrete steps or commands"),
    }
}

fn ordering(subject: &Subject<'_>) -> Outcome {
    if has_numbered_steps(subject) {
        Outcome::pass("Numbered steps define the order")
    } else if let Some(term) = subject.first_match(SEQUENCE_TERMS) {
        Outcome::pass(format!("Sequence is signalled ('{}')", term.trim()))
    } else {
        Outcome::fail("No numbered steps or sequencing words")
    }
}
