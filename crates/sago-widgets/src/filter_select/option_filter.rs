//! Case-insensitive substring filtering over the caller's option set.
//!
//! Filtering never touches the caller's data: the "default choice" flag
//! lives on the derived [`FilteredOption`], not on [`SelectOption`].

use std::ops::Range;

/// A single selectable item.
///
/// `id` is expected to be unique within a set. Duplicates are not rejected;
/// lookups by id return the last matching option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Display text, also the text filtered and highlighted.
    pub text: String,
    /// Caller-owned identifier returned on commit.
    pub id: String,
}

impl SelectOption {
    /// Create an option from display text and id.
    pub fn new(text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: id.into(),
        }
    }
}

/// One entry of a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredOption<'a> {
    /// Position of the option in the caller-supplied set.
    pub index: usize,
    /// The option itself.
    pub option: &'a SelectOption,
    /// Set on the first entry of a non-empty pass only.
    pub is_default: bool,
}

/// Keep the options whose text contains `filter` case-insensitively, in
/// their original order. An empty filter keeps everything.
///
/// The first kept option is marked as the default choice.
pub fn filter_options<'a>(options: &'a [SelectOption], filter: &str) -> Vec<FilteredOption<'a>> {
    let mut filtered: Vec<FilteredOption<'a>> = options
        .iter()
        .enumerate()
        .filter(|(_, option)| contains_ignore_case(&option.text, filter))
        .map(|(index, option)| FilteredOption {
            index,
            option,
            is_default: false,
        })
        .collect();
    if let Some(first) = filtered.first_mut() {
        first.is_default = true;
    }
    filtered
}

/// Find the last option carrying `id`.
pub fn find_by_id<'a>(options: &'a [SelectOption], id: &str) -> Option<&'a SelectOption> {
    options.iter().rev().find(|option| option.id == id)
}

/// Whether `haystack` contains `needle`, ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

/// Byte range of the first case-insensitive occurrence of `needle` in
/// `haystack`.
///
/// Characters are compared by their lowercase expansions one at a time, so
/// the match always covers as many characters of `haystack` as `needle` has
/// and both ends fall on char boundaries of `haystack`. An empty needle
/// matches at offset 0.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return Some(0..0);
    }
    let needle_len = needle.chars().count();

    for (start, _) in haystack.char_indices() {
        let mut candidate = haystack[start..].char_indices();
        let mut end = start;
        let mut matched = 0;
        for nc in needle.chars() {
            match candidate.next() {
                Some((offset, hc)) if hc.to_lowercase().eq(nc.to_lowercase()) => {
                    end = start + offset + hc.len_utf8();
                    matched += 1;
                }
                _ => break,
            }
        }
        if matched == needle_len {
            return Some(start..end);
        }
    }
    None
}
