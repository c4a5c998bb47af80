//! Declarative weighted checklists shared by every category scorer.

use super::report::{Finding, FindingKind};
use super::text::Subject;

pub(crate) type Terms = &'static [&'static str];

/// Hedge counts up to this many land in the middle tier.
pub(crate) const FEW_HEDGES: usize = 2;

/// One atomic sub-check worth `points` raw points.
pub(crate) struct Check {
    pub label: &'static str,
    pub points: f64,
    pub rule: Rule,
}

pub(crate) enum Rule {
    /// Every group must have a matching term. Binary.
    Present {
        groups: &'static [Terms],
        found: &'static str,
        missing: &'static str,
    },
    /// None of the terms may appear. A hit is reported as a warning with no credit.
    Absent {
        terms: Terms,
        clear: &'static str,
        found: &'static str,
    },
    /// A risk signal (all groups matching) is only acceptable next to a safeguard.
    /// No risk at all earns full credit as an `info` finding.
    Gated {
        risk: &'static [Terms],
        safeguards: Terms,
        guarded_credit: f64,
        clear: &'static str,
        guarded: &'static str,
        unguarded: &'static str,
    },
    /// Count whole-word hits: none, a few, or many.
    Tiered {
        terms: Terms,
        few_credit: f64,
        many_credit: f64,
        clean: &'static str,
        few: &'static str,
        many: &'static str,
    },
    Custom(fn(&Subject<'_>) -> Outcome),
}

/// Result of a sub-check before it is priced in points.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Outcome {
    pub kind: FindingKind,
    pub credit: f64,
    pub message: String,
}

impl Outcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Pass,
            credit: 1.0,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Fail,
            credit: 0.0,
            message: message.into(),
        }
    }

    pub fn partial(credit: f64, message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Warning,
            credit,
            message: message.into(),
        }
    }

    /// Full credit because the requirement does not apply.
    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self {
            kind: FindingKind::Info,
            credit: 1.0,
            message: message.into(),
        }
    }

    /// No credit: a skill without a descriptor has no text to judge.
    pub fn no_descriptor() -> Self {
        Self::fail(NO_DESCRIPTOR)
    }
}

const NO_DESCRIPTOR: &str = "No descriptor to evaluate";

impl Rule {
    /// Text rules never pass vacuously on a missing descriptor. Custom checks decide for
    /// themselves, since some of them only look at the file tree.
    fn apply(&self, subject: &Subject<'_>) -> Outcome {
        if !subject.document.has_descriptor() && !matches!(self, Rule::Custom(_)) {
            return Outcome::no_descriptor();
        }

        match self {
            Rule::Present {
                groups,
                found,
                missing,
            } => {
                if subject.has_all(groups) {
                    Outcome::pass(*found)
                } else {
                    Outcome::fail(*missing)
                }
            }
            Rule::Absent {
                terms,
                clear,
                found,
            } => match subject.first_match(terms) {
                None => Outcome::pass(*clear),
                Some(term) => Outcome::partial(0.0, format!("{found} (found '{term}')")),
            },
            Rule::Gated {
                risk,
                safeguards,
                guarded_credit,
                clear,
                guarded,
                unguarded,
            } => {
                if !subject.has_all(risk) {
                    return Outcome::not_applicable(*clear);
                }
                let trigger = risk
                    .first()
                    .and_then(|group| subject.first_match(group))
                    .unwrap_or_default();
                if subject.has_any(safeguards) {
                    if *guarded_credit >= 1.0 {
                        Outcome::pass(*guarded)
                    } else {
                        Outcome::partial(*guarded_credit, format!("{guarded} (found '{trigger}')"))
                    }
                } else {
                    Outcome::fail(format!("{unguarded} (found '{trigger}')"))
                }
            }
            Rule::Tiered {
                terms,
                few_credit,
                many_credit,
                clean,
                few,
                many,
            } => match subject.count_words(terms) {
                0 => Outcome::pass(*clean),
                count if count <= FEW_HEDGES => {
                    Outcome::partial(*few_credit, format!("{few} ({count} found)"))
                }
                count => Outcome::partial(*many_credit, format!("{many} ({count} found)")),
            },
            Rule::Custom(check) => check(subject),
        }
    }
}

/// Evaluate every check in order and sum the earned points.
pub(crate) fn evaluate(checks: &[Check], subject: &Subject<'_>) -> (f64, Vec<Finding>) {
    let mut total = 0.0;
    let mut findings = Vec::with_capacity(checks.len());

    for check in checks {
        let outcome = check.rule.apply(subject);
        let points = check.points * outcome.credit.clamp(0.0, 1.0);
        total += points;
        findings.push(Finding {
            kind: outcome.kind,
            check: check.label,
            message: outcome.message,
            points,
            max_points: check.points,
        });
    }

    (total, findings)
}

/// Continuous sub-score accumulator, clamped to a cap and settled on a 0.5 grid.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PartialCredit {
    total: f64,
    cap: f64,
}

impl PartialCredit {
    pub fn new(cap: f64) -> Self {
        Self { total: 0.0, cap }
    }

    pub fn add_if(&mut self, condition: bool, amount: f64) {
        if condition {
            self.total += amount;
        }
    }

    pub fn settle(&self) -> f64 {
        round_to_half(self.total.clamp(0.0, self.cap))
    }

    /// Settled value as a fraction of the cap.
    pub fn credit(&self) -> f64 {
        if self.cap <= 0.0 {
            0.0
        } else {
            self.settle() / self.cap
        }
    }
}

pub(crate) fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SkillDocument;

    const GATED: Rule = Rule::Gated {
        risk: &[&["drop table"]],
        safeguards: &["confirm"],
        guarded_credit: 0.5,
        clear: "no destructive sql",
        guarded: "destructive sql is confirmed",
        unguarded: "destructive sql without confirmation",
    };

    fn outcome(rule: &Rule, text: &str) -> Outcome {
        let document = SkillDocument::new("n", "d", text, Vec::new());
        rule.apply(&Subject::new(&document))
    }

    #[test]
    fn gated_rule_has_three_tiers() {
        let clear = outcome(&GATED, "select * from users");
        assert_eq!(clear.kind, FindingKind::Info);
        assert_eq!(clear.credit, 1.0);

        let guarded = outcome(&GATED, "DROP TABLE users after you confirm");
        assert_eq!(guarded.kind, FindingKind::Warning);
        assert_eq!(guarded.credit, 0.5);

        let unguarded = outcome(&GATED, "DROP TABLE users");
        assert_eq!(unguarded.kind, FindingKind::Fail);
        assert_eq!(unguarded.credit, 0.0);
        assert!(unguarded.message.contains("drop table"));
    }

    #[test]
    fn missing_descriptor_earns_nothing_from_text_rules() {
        let document = SkillDocument::missing("orphan", Vec::new());
        let subject = Subject::new(&document);
        let absent = Rule::Absent {
            terms: &["override"],
            clear: "clear",
            found: "found",
        };

        for rule in [&GATED, &absent] {
            let outcome = rule.apply(&subject);
            assert_eq!(outcome.kind, FindingKind::Fail);
            assert_eq!(outcome.credit, 0.0);
            assert_eq!(outcome.message, NO_DESCRIPTOR);
        }
    }

    #[test]
    fn tiered_rule_maps_counts() {
        let rule = Rule::Tiered {
            terms: &["maybe"],
            few_credit: 0.5,
            many_credit: 0.25,
            clean: "clean",
            few: "few",
            many: "many",
        };

        assert_eq!(outcome(&rule, "do it").credit, 1.0);
        assert_eq!(outcome(&rule, "maybe do it, maybe not").credit, 0.5);
        assert_eq!(outcome(&rule, "maybe maybe maybe").credit, 0.25);
    }

    #[test]
    fn evaluate_keeps_declaration_order() {
        let checks = [
            Check {
                label: "first",
                points: 4.0,
                rule: Rule::Present {
                    groups: &[&["alpha"]],
                    found: "alpha found",
                    missing: "alpha missing",
                },
            },
            Check {
                label: "second",
                points: 6.0,
                rule: GATED,
            },
        ];
        let document = SkillDocument::new("n", "d", "alpha; drop table x", Vec::new());

        let (total, findings) = evaluate(&checks, &Subject::new(&document));

        assert_eq!(total, 4.0);
        let labels: Vec<&str> = findings.iter().map(|f| f.check).collect();
        assert_eq!(labels, vec!["first", "second"]);
        assert_eq!(findings[1].lost_points(), 6.0);
    }

    #[test]
    fn partial_credit_rounds_to_half_points() {
        let mut credit = PartialCredit::new(1.0);
        credit.add_if(true, 0.4);
        credit.add_if(false, 0.3);
        credit.add_if(true, 0.3);
        assert_eq!(credit.settle(), 0.5);

        let mut capped = PartialCredit::new(1.0);
        capped.add_if(true, 0.9);
        capped.add_if(true, 0.9);
        assert_eq!(capped.settle(), 1.0);
        assert_eq!(round_to_half(0.74), 0.5);
        assert_eq!(round_to_half(0.75), 1.0);
    }
}
