use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

const README_PREFIX: &str = "readme";
const MANIFEST_FILES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "pyproject.toml",
    "cargo.toml",
    "go.mod",
    "gemfile",
    "environment.yml",
];
const SCRIPT_EXTENSIONS: &[&str] = &["sh", "bash", "py", "js", "ts", "rb", "ps1"];
const TRANSIENT_EXTENSIONS: &[&str] = &["log", "tmp", "swp", "bak", "pyc"];
const TRANSIENT_NAMES: &[&str] = &[".ds_store", "thumbs.db"];
const TRANSIENT_DIRECTORIES: &[&str] = &["__pycache__", "node_modules", ".cache"];

/// Shape of the file tree that accompanies a skill descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureSummary {
    pub file_count: usize,
    pub directories: Vec<String>,
    pub extensions: BTreeMap<String, usize>,
    pub transient_files: usize,
    pub has_readme: bool,
    pub has_manifest: bool,
    pub has_scripts: bool,
}

impl StructureSummary {
    /// Summarize a list of paths relative to the skill root.
    pub fn from_paths(paths: &[String]) -> Self {
        let mut directories = BTreeSet::new();
        let mut extensions = BTreeMap::new();
        let mut summary = Self {
            file_count: paths.len(),
            ..Self::default()
        };

        for path in paths {
            let normalized = path.replace('\\', "/");
            let segments: Vec<&str> = normalized
                .split('/')
                .filter(|segment| !segment.is_empty() && *segment != ".")
                .collect();
            let Some((file_name, parents)) = segments.split_last() else {
                continue;
            };

            if let Some(top) = parents.first() {
                directories.insert((*top).to_string());
            }

            let lower_name = file_name.to_ascii_lowercase();
            let extension = lower_name
                .rsplit_once('.')
                .filter(|(stem, _)| !stem.is_empty())
                .map(|(_, ext)| ext.to_string());

            if let Some(ext) = &extension {
                *extensions.entry(ext.clone()).or_insert(0) += 1;
            }

            if parents.is_empty() && lower_name.starts_with(README_PREFIX) {
                summary.has_readme = true;
            }
            if MANIFEST_FILES.contains(&lower_name.as_str()) {
                summary.has_manifest = true;
            }
            let in_scripts_dir = parents
                .iter()
                .any(|parent| parent.eq_ignore_ascii_case("scripts"));
            let script_ext = extension
                .as_deref()
                .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext));
            if in_scripts_dir || script_ext {
                summary.has_scripts = true;
            }

            let transient_ext = extension
                .as_deref()
                .is_some_and(|ext| TRANSIENT_EXTENSIONS.contains(&ext));
            let transient_dir = parents.iter().any(|parent| {
                TRANSIENT_DIRECTORIES.contains(&parent.to_ascii_lowercase().as_str())
            });
            if transient_ext || transient_dir || TRANSIENT_NAMES.contains(&lower_name.as_str()) {
                summary.transient_files += 1;
            }
        }

        summary.directories = directories.into_iter().collect();
        summary.extensions = extensions;
        summary
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }
}

/// Already-materialized skill descriptor handed to the evaluation engine.
///
/// `content` is `None` when the skill has no descriptor file at all; an empty string
/// means the file exists but has no text. Both are valid inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SkillDocumentInput")]
pub struct SkillDocument {
    pub name: String,
    pub description: String,
    pub content: Option<String>,
    pub files: Vec<String>,
    pub structure: StructureSummary,
}

impl SkillDocument {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        files: Vec<String>,
    ) -> Self {
        let structure = StructureSummary::from_paths(&files);
        Self {
            name: name.into(),
            description: description.into(),
            content: Some(content.into()),
            files,
            structure,
        }
    }

    /// A skill directory without a descriptor file.
    pub fn missing(name: impl Into<String>, files: Vec<String>) -> Self {
        let structure = StructureSummary::from_paths(&files);
        Self {
            name: name.into(),
            description: String::new(),
            content: None,
            files,
            structure,
        }
    }

    pub fn has_descriptor(&self) -> bool {
        self.content.is_some()
    }

    /// Descriptor text, empty when the descriptor is missing.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Wire form of [`SkillDocument`]; the structure summary is derived when omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SkillDocumentInput {
    name: String,
    description: String,
    content: Option<String>,
    files: Vec<String>,
    structure: Option<StructureSummary>,
}

impl From<SkillDocumentInput> for SkillDocument {
    fn from(input: SkillDocumentInput) -> Self {
        let structure = input
            .structure
            .unwrap_or_else(|| StructureSummary::from_paths(&input.files));
        Self {
            name: input.name,
            description: input.description,
            content: input.content,
            files: input.files,
            structure,
        }
    }
}
