//! Case-folded views of a document and keyword matching over them.
//!
//! Presence checks match a term at a word start, so `fail` also finds `failure` and
//! `failed`. Hedge words are counted as whole words, so `mightily` is not `might`.

use std::cell::OnceCell;

use super::paths;
use crate::document::SkillDocument;

/// The document as seen by the category scorers.
pub(crate) struct Subject<'a> {
    pub document: &'a SkillDocument,
    pub original: &'a str,
    pub lower: String,
    hardcoded_paths: OnceCell<Vec<String>>,
}

impl<'a> Subject<'a> {
    pub fn new(document: &'a SkillDocument) -> Self {
        let original = document.text();
        Self {
            document,
            original,
            lower: original.to_lowercase(),
            hardcoded_paths: OnceCell::new(),
        }
    }

    /// Genuine absolute paths in the original-case text, computed once.
    pub fn hardcoded_paths(&self) -> &[String] {
        self.hardcoded_paths
            .get_or_init(|| paths::hardcoded_paths(self.original))
    }

    pub fn has_any(&self, terms: &[&'static str]) -> bool {
        self.first_match(terms).is_some()
    }

    pub fn first_match(&self, terms: &[&'static str]) -> Option<&'static str> {
        terms
            .iter()
            .copied()
            .find(|term| contains_term(&self.lower, term))
    }

    /// True when every group has at least one matching term.
    pub fn has_all(&self, groups: &[&[&'static str]]) -> bool {
        groups.iter().all(|group| self.has_any(group))
    }

    pub fn count_words(&self, terms: &[&'static str]) -> usize {
        terms
            .iter()
            .map(|term| count_whole_words(&self.lower, term))
            .sum()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn starts_with_word_char(term: &str) -> bool {
    term.chars().next().is_some_and(is_word_char)
}

fn ends_with_word_char(term: &str) -> bool {
    term.chars().next_back().is_some_and(is_word_char)
}

fn boundary_before(haystack: &str, index: usize) -> bool {
    !haystack[..index].chars().next_back().is_some_and(is_word_char)
}

fn boundary_after(haystack: &str, end: usize) -> bool {
    !haystack[end..].chars().next().is_some_and(is_word_char)
}

/// `term` occurs in `haystack` starting on a word boundary.
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if !starts_with_word_char(term) {
        return haystack.contains(term);
    }
    haystack
        .match_indices(term)
        .any(|(index, _)| boundary_before(haystack, index))
}

/// Non-overlapping whole-word occurrences of `term`.
pub(crate) fn count_whole_words(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    let check_start = starts_with_word_char(term);
    let check_end = ends_with_word_char(term);
    haystack
        .match_indices(term)
        .filter(|(index, matched)| {
            (!check_start || boundary_before(haystack, *index))
                && (!check_end || boundary_after(haystack, index + matched.len()))
        })
        .count()
}
