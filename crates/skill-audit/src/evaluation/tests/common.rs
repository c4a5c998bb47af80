use chrono::{DateTime, TimeZone, Utc};

use crate::document::SkillDocument;
use crate::evaluation::{CategoryId, CategoryScore, EvaluationEngine, FindingKind};

pub(super) const WELL_DOCUMENTED: &str = r##"---
name: csv-report
description: Summarize a CSV file into a markdown report with totals per column.
---

# CSV Report

Use when the user asks for a summary of a CSV file. Do not use for Excel workbooks or databases; use the spreadsheet skill instead.

## Requirements

This skill requires `python3` (3.9 or newer) and the `pandas` package.
Verify the tools first: run `python3 --version`.
Install missing packages with `pip install pandas`.
Set the `REPORT_DIR` environment variable to choose where the report is written; it defaults to `./reports/`.

## Steps

1. Check that the input file exists and is not empty.
2. Run `python3 scripts/summarize.py input.csv` to compute column totals.
3. Write the report to `./reports/summary.md`.
4. Confirm the report was created; the task is complete when the file exists.

## Errors and fallbacks

If the script fails with a parse error, retry with `--delimiter ';'`. Otherwise fall back to reading the first 1000 rows.
Validate the exit code of every command.
Edge cases: an empty file produces an empty report; missing columns are skipped.

## Example

Input: a CSV file path. Output: a markdown table.

```bash
python3 scripts/summarize.py data/sales.csv
```

Expected output format:

```json
{"rows": 120, "columns": ["region", "total"]}
```

## Limitations

Works on Linux, macOS and Windows. Note: files larger than 1 GB are not supported.

## Troubleshooting

If you see `UnicodeDecodeError`, re-save the file as UTF-8.
"##;

pub(super) fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn engine() -> EvaluationEngine {
    EvaluationEngine::standard().expect("standard rubric is valid")
}

pub(super) fn skill_files() -> Vec<String> {
    vec!["SKILL.md".to_string(), "scripts/summarize.py".to_string()]
}

pub(super) fn well_documented_skill() -> SkillDocument {
    SkillDocument::new(
        "csv-report",
        "Summarize a CSV file into a markdown report with totals per column.",
        WELL_DOCUMENTED,
        skill_files(),
    )
}

pub(super) fn document(text: &str) -> SkillDocument {
    SkillDocument::new(
        "disk-cleanup",
        "Frees disk space.",
        text,
        vec!["SKILL.md".to_string()],
    )
}

pub(super) fn category(document: &SkillDocument, id: CategoryId) -> CategoryScore {
    engine()
        .score_at(document, evaluated_at())
        .category(id)
        .cloned()
        .expect("category is scored")
}

/// Points and kind of a single named check.
pub(super) fn check(score: &CategoryScore, label: &str) -> (FindingKind, f64) {
    score
        .findings
        .iter()
        .find(|finding| finding.check == label)
        .map(|finding| (finding.kind, finding.points))
        .unwrap_or_else(|| panic!("check {label} not reported"))
}
