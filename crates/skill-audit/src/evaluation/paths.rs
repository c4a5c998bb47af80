//! Separates genuine absolute filesystem paths from URL and API-route fragments.
//!
//! A cascade of discard rules runs over every absolute-looking token; only tokens
//! rooted in a known OS location, a drive letter, or a hidden entry survive. The
//! cascade prefers missing an odd real path over flagging a URL piece.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::text::contains_term;

/// Shorter candidates are stray slashes, not paths.
pub const MIN_PATH_LEN: usize = 4;

const API_PREFIXES: &[&str] = &["/api/", "/v1/", "/v2/"];
const SCHEME_MARKERS: &[&str] = &["http:", "https:", "ftp:"];
/// Length of the longest scheme marker, in characters.
const SCHEME_WINDOW: usize = 6;
const OS_ROOTS: &[&str] = &[
    "home",
    "users",
    "root",
    "usr",
    "etc",
    "var",
    "opt",
    "tmp",
    "mnt",
    "srv",
    "system",
    "library",
    "applications",
    "volumes",
    "private",
    "bin",
    "sbin",
    "windows",
];
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ')', ';', ':'];

/// Why a candidate was kept or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVerdict {
    Hardcoded,
    ProtocolRelative,
    UrlFragment,
    TooShort,
    ApiRoute,
    DataRoute,
    DomainRoute,
    NotRooted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPath {
    pub path: String,
    pub verdict: PathVerdict,
}

fn candidate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?P<drive>[A-Za-z]:\\[^\s"'`<>|*?]*)|(?P<unix>/[\w.~-]+(?:/[\w.~-]+)*/?)"#)
            .expect("path candidate pattern compiles")
    })
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\b(?:https?|ftp)://[^\s"'`<>()\[\]{}]+"#)
            .expect("url pattern compiles")
    })
}

/// Document-level facts some discard rules depend on.
struct Context<'t> {
    /// Every proper suffix of a URL that could also match as a candidate.
    url_tails: BTreeSet<&'t str>,
    mentions_api: bool,
    mentions_domain: bool,
}

impl<'t> Context<'t> {
    fn new(text: &'t str) -> Self {
        let lower = text.to_lowercase();
        let url_tails = url_pattern()
            .find_iter(text)
            .map(|url| url.as_str().trim_end_matches(TRAILING_PUNCTUATION))
            .flat_map(candidate_tails)
            .collect();
        Self {
            url_tails,
            mentions_api: contains_term(&lower, "api"),
            mentions_domain: lower.contains(".com"),
        }
    }
}

/// Suffixes of `url` that start where a unix or drive candidate could start.
fn candidate_tails(url: &str) -> impl Iterator<Item = &str> {
    url.char_indices()
        .skip(1)
        .filter(move |&(index, ch)| {
            ch == '/'
                || (ch.is_ascii_alphabetic() && url[index + 1..].starts_with(":\\"))
        })
        .map(move |(index, _)| &url[index..])
}

/// The last few characters of `before`, enough to hold any scheme marker.
fn scheme_window(before: &str) -> &str {
    let start = before
        .char_indices()
        .rev()
        .take(SCHEME_WINDOW)
        .last()
        .map_or(before.len(), |(index, _)| index);
    &before[start..]
}

/// Classify every absolute-looking token in `text`, in order of appearance.
pub fn classify_paths(text: &str) -> Vec<ClassifiedPath> {
    let context = Context::new(text);
    let mut classified = Vec::new();

    for captures in candidate_pattern().captures_iter(text) {
        let (matched, is_drive) = match (captures.name("drive"), captures.name("unix")) {
            (Some(drive), _) => (drive, true),
            (None, Some(unix)) => (unix, false),
            (None, None) => continue,
        };
        let before = &text[..matched.start()];
        if !starts_token(before, is_drive) {
            continue;
        }

        let candidate = matched.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if candidate.is_empty() {
            continue;
        }

        classified.push(ClassifiedPath {
            path: candidate.to_string(),
            verdict: verdict(candidate, before, is_drive, &context),
        });
    }

    classified
}

/// Distinct hardcoded paths in order of first appearance.
pub fn hardcoded_paths(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    classify_paths(text)
        .into_iter()
        .filter(|classified| classified.verdict == PathVerdict::Hardcoded)
        .filter(|classified| seen.insert(classified.path.clone()))
        .map(|classified| classified.path)
        .collect()
}

/// Absolute candidates must begin a token; `src/main.rs` or `./x/y` yield nothing.
/// A preceding `/` is let through so it can be rejected as protocol-relative.
fn starts_token(before: &str, is_drive: bool) -> bool {
    match before.chars().next_back() {
        None => true,
        Some(previous) if is_drive => !(previous.is_alphanumeric() || previous == '_'),
        Some(previous) => {
            previous.is_whitespace()
                || matches!(
                    previous,
                    '/' | '"' | '\'' | '`' | '(' | '[' | '{' | '<' | '>' | '=' | ':' | ',' | ';' | '|'
                )
        }
    }
}

fn verdict(candidate: &str, before: &str, is_drive: bool, context: &Context<'_>) -> PathVerdict {
    if before.ends_with('/') {
        return PathVerdict::ProtocolRelative;
    }

    let window = scheme_window(before).to_ascii_lowercase();
    if SCHEME_MARKERS.iter().any(|marker| window.ends_with(marker)) {
        return PathVerdict::UrlFragment;
    }
    if context.url_tails.contains(candidate) {
        return PathVerdict::UrlFragment;
    }

    if candidate.chars().count() < MIN_PATH_LEN {
        return PathVerdict::TooShort;
    }
    if is_drive {
        return PathVerdict::Hardcoded;
    }

    let lower = candidate.to_lowercase();
    if API_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return PathVerdict::ApiRoute;
    }
    if context.mentions_api && lower.contains("/data/") {
        return PathVerdict::DataRoute;
    }

    let segments: Vec<&str> = candidate
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    if context.mentions_domain && segments.len() == 2 && lower == candidate {
        return PathVerdict::DomainRoute;
    }

    let rooted = segments
        .first()
        .is_some_and(|root| OS_ROOTS.contains(&root.to_lowercase().as_str()));
    let hidden = segments
        .iter()
        .any(|segment| segment.len() > 1 && segment.starts_with('.') && *segment != "..");
    if rooted || hidden {
        PathVerdict::Hardcoded
    } else {
        PathVerdict::NotRooted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdicts(text: &str) -> Vec<(String, PathVerdict)> {
        classify_paths(text)
            .into_iter()
            .map(|classified| (classified.path, classified.verdict))
            .collect()
    }

    #[test]
    fn flags_home_and_drive_paths() {
        let found = hardcoded_paths(
            "Read /home/user/docs/notes.md, then copy to C:\\Users\\name\\file.txt.",
        );

        assert_eq!(
            found,
            vec![
                "/home/user/docs/notes.md".to_string(),
                "C:\\Users\\name\\file.txt".to_string()
            ]
        );
    }

    #[test]
    fn ignores_url_embedded_fragments() {
        let text = "Load https://cdn.example.com/CSS/styles.css and call /api/v2/fetch.";

        assert!(hardcoded_paths(text).is_empty());
        assert_eq!(
            verdicts(text),
            vec![
                (
                    "/cdn.example.com/CSS/styles.css".to_string(),
                    PathVerdict::ProtocolRelative
                ),
                ("/api/v2/fetch".to_string(), PathVerdict::ApiRoute),
            ]
        );
    }

    #[test]
    fn discards_fragment_seen_inside_a_url_elsewhere() {
        let text = "Docs live at https://docs.example.org/usr/share/guide\n\
                    Open /usr/share/guide in the browser.";

        let classified = verdicts(text);

        assert_eq!(
            classified.last(),
            Some(&("/usr/share/guide".to_string(), PathVerdict::UrlFragment))
        );
        assert!(hardcoded_paths(text).is_empty());
    }

    #[test]
    fn scheme_marker_right_before_candidate_is_a_url() {
        assert_eq!(
            verdicts("malformed link https:/home/user/site"),
            vec![("/home/user/site".to_string(), PathVerdict::UrlFragment)]
        );
    }

    #[test]
    fn scheme_marker_is_found_after_multibyte_text() {
        assert_eq!(
            verdicts("naïve café → HTTPS:/home/user/site"),
            vec![("/home/user/site".to_string(), PathVerdict::UrlFragment)]
        );
        assert_eq!(scheme_window("é→"), "é→");
        assert_eq!(scheme_window("résumé https:"), "https:");
    }

    #[test]
    fn url_tails_cover_every_candidate_suffix() {
        let tails: Vec<&str> =
            candidate_tails("https://host.example/a/b?x=C:\\tmp").collect();

        assert_eq!(
            tails,
            vec![
                "//host.example/a/b?x=C:\\tmp",
                "/host.example/a/b?x=C:\\tmp",
                "/a/b?x=C:\\tmp",
                "/b?x=C:\\tmp",
                "C:\\tmp",
            ]
        );
    }

    #[test]
    fn long_documents_classify_in_linear_time() {
        let mut text = "Fetch https://mirror.example.org/opt/pkg/archive first.\n".repeat(2_000);
        text.push_str(&"then read /home/u/notes and /opt/pkg/archive ".repeat(30_000));

        let started = std::time::Instant::now();
        let found = hardcoded_paths(&text);

        assert_eq!(found, vec!["/home/u/notes".to_string()]);
        assert!(
            started.elapsed() < std::time::Duration::from_secs(10),
            "classification took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn route_conventions_are_discarded() {
        assert_eq!(
            verdicts("Query the API at /var/data/export"),
            vec![("/var/data/export".to_string(), PathVerdict::DataRoute)]
        );
        assert_eq!(
            verdicts("See example.com under /home/user"),
            vec![("/home/user".to_string(), PathVerdict::DomainRoute)]
        );
        assert_eq!(
            verdicts("Without a domain /home/user stays flagged"),
            vec![("/home/user".to_string(), PathVerdict::Hardcoded)]
        );
        assert_eq!(
            verdicts("a stray /ab slash"),
            vec![("/ab".to_string(), PathVerdict::TooShort)]
        );
    }

    #[test]
    fn hidden_entries_are_hardcoded_but_plain_routes_are_not() {
        assert_eq!(
            verdicts("cache in /project/.cache/index and serve /reports/weekly"),
            vec![
                ("/project/.cache/index".to_string(), PathVerdict::Hardcoded),
                ("/reports/weekly".to_string(), PathVerdict::NotRooted),
            ]
        );
    }

    #[test]
    fn relative_paths_produce_no_candidates() {
        assert!(classify_paths("run ./scripts/run.sh or src/main.rs or ~/bin/tool").is_empty());
    }

    #[test]
    fn repeated_paths_are_reported_once() {
        assert_eq!(
            hardcoded_paths("/opt/tool/bin and again /opt/tool/bin"),
            vec!["/opt/tool/bin".to_string()]
        );
    }
}
