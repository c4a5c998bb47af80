use crate::evaluation::checklist::{Check, Outcome, Rule};
use crate::evaluation::text::Subject;

const EXAMPLE_TERMS: &[&str] = &["example", "usage", "e.g.", "for instance", "```"];
const IO_TERMS: &[&str] = &[
    "input",
    "output",
    "returns",
    "parameters",
    "arguments",
    "produces",
    "accepts",
];
const LIMITATION_TERMS: &[&str] = &[
    "limitation",
    "caveat",
    "known issue",
    "does not support",
    "doesn't support",
    "not supported",
    "unsupported",
    "note:",
    "warning",
    "constraint",
];
const TROUBLESHOOTING_TERMS: &[&str] = &[
    "troubleshoot",
    "common issues",
    "common problems",
    "faq",
    "if you see",
    "debug",
    "diagnos",
];
const TEMPLATE_TERMS: &[&str] = &[
    "template",
    "expected output",
    "sample output",
    "example output",
    "output format",
    "format:",
];
const STRUCTURED_LANGUAGES: &[&str] = &["json", "yaml", "yml", "xml", "toml"];
const FENCES: &[&str] = &["```", "~~~"];

pub(super) static CHECKS: &[Check] = &[
    Check {
        label: "usage_examples",
        points: 2.5,
        rule: Rule::Present {
            groups: &[EXAMPLE_TERMS],
            found: "Usage examples are provided",
            missing: "No usage examples",
        },
    },
    Check {
        label: "inputs_outputs",
        points: 2.0,
        rule: Rule::Present {
            groups: &[IO_TERMS],
            found: "Inputs and outputs are described",
            missing: "Inputs and outputs are not described",
        },
    },
    Check {
        label: "limitations",
        points: 2.0,
        rule: Rule::Present {
            groups: &[LIMITATION_TERMS],
            found: "Limitations and caveats are noted",
            missing: "No limitations or caveats",
        },
    },
    Check {
        label: "troubleshooting",
        points: 1.5,
        rule: Rule::Present {
            groups: &[TROUBLESHOOTING_TERMS],
            found: "Troubleshooting guidance is included",
            missing: "No troubleshooting guidance",
        },
    },
    Check {
        label: "embedded_templates",
        points: 2.0,
        rule: Rule::Custom(embedded_templates),
    },
];

/// A closed fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FencedBlock {
    pub info: String,
    pub body: String,
}

impl FencedBlock {
    fn is_structured(&self) -> bool {
        let info = self.info.to_ascii_lowercase();
        if STRUCTURED_LANGUAGES
            .iter()
            .any(|language| info.split_whitespace().next() == Some(*language))
        {
            return true;
        }

        let body = self.body.trim();
        matches!(
            (body.chars().next(), body.chars().next_back()),
            (Some('{'), Some('}')) | (Some('['), Some(']')) | (Some('<'), Some('>'))
        )
    }
}

/// Pair up fence delimiters; an unterminated block is not counted.
pub(crate) fn fenced_blocks(text: &str) -> Vec<FencedBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<(&str, String, Vec<&str>)> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();
        let fence = FENCES.iter().copied().find(|fence| trimmed.starts_with(fence));

        match (open.take(), fence) {
            (None, Some(fence)) => {
                let info = trimmed.trim_start_matches(fence).trim().to_string();
                open = Some((fence, info, Vec::new()));
            }
            (None, None) => {}
            (Some((marker, info, body)), Some(fence))
                if fence == marker && trimmed.trim_start_matches(fence).trim().is_empty() =>
            {
                blocks.push(FencedBlock {
                    info,
                    body: body.join("\n"),
                });
            }
            (Some((marker, info, mut body)), _) => {
                body.push(line);
                open = Some((marker, info, body));
            }
        }
    }

    blocks
}

fn embedded_templates(subject: &Subject<'_>) -> Outcome {
    let blocks = fenced_blocks(subject.original);

    if blocks.is_empty() {
        return Outcome::fail("No fenced code blocks or templates");
    }
    if blocks.iter().any(FencedBlock::is_structured) {
        return Outcome::pass("Embeds a structured (JSON/YAML/XML) template");
    }
    if blocks.len() >= 2 && subject.has_any(TEMPLATE_TERMS) {
        return Outcome::pass(format!(
            "{} code blocks with template or expected-output guidance",
            blocks.len()
        ));
    }

    Outcome::partial(
        0.5,
        format!(
            "{} code block(s) but no template or expected output",
            blocks.len()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_fences_and_drops_unterminated_blocks() {
        let text = "```bash\nls\n```\n\n~~~json\n{\"a\": 1}\n~~~\n\n```\nnever closed";

        let blocks = fenced_blocks(text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].info, "bash");
        assert_eq!(blocks[0].body, "ls");
        assert!(!blocks[0].is_structured());
        assert!(blocks[1].is_structured());
    }

    #[test]
    fn bracketed_body_counts_as_structured() {
        let blocks = fenced_blocks("```\n[\n  1, 2\n]\n```");

        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_structured());
    }

    #[test]
    fn nested_other_fence_stays_inside_block() {
        let blocks = fenced_blocks("~~~markdown\n```bash\necho hi\n```\n~~~");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "```bash\necho hi\n```");
    }
}
