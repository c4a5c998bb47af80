use crate::evaluation::checklist::{Check, Rule};

const TOOL_TERMS: &[&str] = &[
    "requires",
    "required",
    "requirement",
    "prerequisite",
    "dependency",
    "dependencies",
    "depends on",
    "tools",
    "you need",
];
const VERIFICATION_TERMS: &[&str] = &[
    "--version",
    "command -v",
    "verify",
    "check that",
    "check if",
    "ensure",
    "is installed",
    "pre-flight",
    "preflight",
];
const INSTALL_TERMS: &[&str] = &[
    "install",
    "pip ",
    "npm ",
    "npx ",
    "brew ",
    "apt-get",
    "apt install",
    "setup",
    "set up",
];
const ENVIRONMENT_TERMS: &[&str] = &[
    "environment variable",
    "env var",
    "export ",
    "$env",
    "${",
    ".env",
    "env:",
    "getenv",
    "os.environ",
    "process.env",
];

pub(super) static CHECKS: &[Check] = &[
    Check {
        label: "tools_documented",
        points: 3.0,
        rule: Rule::Present {
            groups: &[TOOL_TERMS],
            found: "Required tools are documented",
            missing: "Required tools or prerequisites are not listed",
        },
    },
    Check {
        label: "verification",
        points: 2.5,
        rule: Rule::Present {
            groups: &[VERIFICATION_TERMS],
            found: "Dependencies are verified before use",
            missing: "No pre-flight check that dependencies are available",
        },
    },
    Check {
        label: "installation",
        points: 2.5,
        rule: Rule::Present {
            groups: &[INSTALL_TERMS],
            found: "Installation instructions are provided",
            missing: "No installation instructions",
        },
    },
    Check {
        label: "environment",
        points: 2.0,
        rule: Rule::Present {
            groups: &[ENVIRONMENT_TERMS],
            found: "Environment variables are documented",
            missing: "Environment variables are not documented",
        },
    },
];
