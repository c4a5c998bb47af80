use std::sync::OnceLock;

use regex::Regex;

use crate::evaluation::checklist::{Check, Outcome, Rule};
use crate::evaluation::text::Subject;

/// Offending paths quoted verbatim in a finding.
pub(crate) const MAX_REPORTED_PATHS: usize = 3;

const OS_MARKERS: &[&str] = &[
    "c:\\",
    "cmd.exe",
    "powershell",
    ".exe",
    ".bat",
    "%appdata%",
    "%userprofile%",
    "/usr/local",
    "/usr/bin",
    "~/library",
    "/proc/",
    "hkey_",
    "launchctl",
    "systemctl",
    "/bin/bash",
    "xcode",
];
const PLATFORM_TERMS: &[&str] = &[
    "linux",
    "macos",
    "mac os",
    "windows",
    "cross-platform",
    "platform",
    "operating system",
    "posix",
    "unix",
    "wsl",
];
const RELATIVE_PATH_TERMS: &[&str] = &[
    "relative path",
    "relative to",
    "{basedir}",
    "$skill_dir",
    "skill directory",
];

pub(super) static CHECKS: &[Check] = &[
    Check {
        label: "os_specific_markers",
        points: 3.0,
        rule: Rule::Custom(os_specific_markers),
    },
    Check {
        label: "hardcoded_paths",
        points: 4.0,
        rule: Rule::Custom(no_hardcoded_paths),
    },
    Check {
        label: "platform_notes",
        points: 1.5,
        rule: Rule::Present {
            groups: &[PLATFORM_TERMS],
            found: "Platform support is noted",
            missing: "No note on supported platforms",
        },
    },
    Check {
        label: "relative_paths",
        points: 1.5,
        rule: Rule::Custom(relative_paths),
    },
];

fn relative_marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?:^|[\s`'"(\[])\.{1,2}/[\w.-]"#).expect("relative path pattern compiles")
    })
}

fn os_specific_markers(subject: &Subject<'_>) -> Outcome {
    if !subject.document.has_descriptor() {
        return Outcome::no_descriptor();
    }

    match subject.first_match(OS_MARKERS) {
        None => Outcome::pass("No OS-specific paths or binaries"),
        Some(marker) => Outcome::partial(0.5, format!("OS-specific reference '{marker}'")),
    }
}

fn no_hardcoded_paths(subject: &Subject<'_>) -> Outcome {
    if !subject.document.has_descriptor() {
        return Outcome::no_descriptor();
    }

    let paths = subject.hardcoded_paths();
    if paths.is_empty() {
        return Outcome::pass("No hardcoded absolute paths");
    }

    let quoted: Vec<String> = paths
        .iter()
        .take(MAX_REPORTED_PATHS)
        .map(|path| format!("'{path}'"))
        .collect();
    let remainder = paths.len().saturating_sub(MAX_REPORTED_PATHS);
    let more = if remainder > 0 {
        format!(" and {remainder} more")
    } else {
        String::new()
    };

    Outcome::fail(format!("Hardcoded paths: {}{}", quoted.join(", "), more))
}

fn relative_paths(subject: &Subject<'_>) -> Outcome {
    if !subject.document.has_descriptor() {
        return Outcome::no_descriptor();
    }

    if relative_marker_pattern().is_match(subject.original) || subject.has_any(RELATIVE_PATH_TERMS)
    {
        Outcome::pass("Uses relative paths")
    } else if subject.hardcoded_paths().is_empty() {
        Outcome::not_applicable("No absolute paths to make relative")
    } else {
        Outcome::fail("Uses absolute paths instead of relative ones")
    }
}
