use std::sync::OnceLock;

use regex::Regex;

use crate::evaluation::checklist::{Check, Outcome, PartialCredit, Rule};
use crate::evaluation::text::Subject;

pub(crate) const MIN_DESCRIPTION_CHARS: usize = 50;
const MAX_ORGANIZED_FILES: usize = 50;
const MAX_ORGANIZED_DIRECTORIES: usize = 10;

const OUTPUT_TERMS: &[&str] = &[
    "output",
    "save to",
    "saved to",
    "write to",
    "writes to",
    "written to",
    "artifact",
    "stored in",
    "results are",
    "generates",
];

pub(super) static CHECKS: &[Check] = &[
    Check {
        label: "descriptor_exists",
        points: 3.0,
        rule: Rule::Custom(descriptor_exists),
    },
    Check {
        label: "name",
        points: 1.5,
        rule: Rule::Custom(name_signal),
    },
    Check {
        label: "description",
        points: 2.0,
        rule: Rule::Custom(description_length),
    },
    Check {
        label: "organization",
        points: 1.0,
        rule: Rule::Custom(organization),
    },
    Check {
        label: "output_location",
        points: 1.5,
        rule: Rule::Present {
            groups: &[OUTPUT_TERMS],
            found: "Output location is stated",
            missing: "No explicit output or artifact location",
        },
    },
    Check {
        label: "conventions",
        points: 1.0,
        rule: Rule::Custom(conventions),
    },
];

pub(crate) fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^ {0,3}#{1,6}\s+\S").expect("heading pattern compiles"))
}

fn name_field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?mi)^name:\s*\S").expect("name pattern compiles"))
}

fn descriptor_exists(subject: &Subject<'_>) -> Outcome {
    if subject.document.has_descriptor() {
        Outcome::pass("Descriptor file present")
    } else {
        Outcome::fail("Descriptor file is missing")
    }
}

fn name_signal(subject: &Subject<'_>) -> Outcome {
    if !subject.document.has_descriptor() {
        Outcome::no_descriptor()
    } else if !subject.document.name.trim().is_empty() {
        Outcome::pass(format!("Skill is named '{}'", subject.document.name.trim()))
    } else if name_field_pattern().is_match(subject.original)
        || heading_pattern().is_match(subject.original)
    {
        Outcome::pass("Name given by a heading or name field")
    } else {
        Outcome::fail("No skill name (heading or name field)")
    }
}

fn description_length(subject: &Subject<'_>) -> Outcome {
    if !subject.document.has_descriptor() {
        return Outcome::no_descriptor();
    }

    let length = subject.document.description.trim().chars().count();
    match length {
        0 => Outcome::fail("Description is empty"),
        length if length < MIN_DESCRIPTION_CHARS => Outcome::partial(
            0.5,
            format!("Description is short ({length} of {MIN_DESCRIPTION_CHARS} characters)"),
        ),
        length => Outcome::pass(format!("Description has {length} characters")),
    }
}

fn organization(subject: &Subject<'_>) -> Outcome {
    let structure = &subject.document.structure;
    let mut credit = PartialCredit::new(1.0);
    credit.add_if(structure.file_count <= MAX_ORGANIZED_FILES, 0.4);
    credit.add_if(structure.directory_count() <= MAX_ORGANIZED_DIRECTORIES, 0.3);
    credit.add_if(structure.transient_files == 0, 0.3);

    let detail = format!(
        "{} file(s), {} top-level director(ies), {} transient file(s)",
        structure.file_count,
        structure.directory_count(),
        structure.transient_files
    );
    match credit.credit() {
        full if full >= 1.0 => Outcome::pass(format!("Files are well organized: {detail}")),
        partial => Outcome::partial(partial, format!("File layout could be tidier: {detail}")),
    }
}

fn conventions(subject: &Subject<'_>) -> Outcome {
    let has_descriptor = subject.document.has_descriptor();
    let has_heading = heading_pattern().is_match(subject.original);
    let mut credit = PartialCredit::new(1.0);
    credit.add_if(has_descriptor, 0.5);
    credit.add_if(has_heading, 0.5);

    match (has_descriptor, has_heading) {
        (true, true) => Outcome::pass("Follows descriptor conventions"),
        (true, false) => Outcome::partial(credit.credit(), "Descriptor has no markdown heading"),
        (false, _) => Outcome::fail("No descriptor file to follow conventions"),
    }
}
