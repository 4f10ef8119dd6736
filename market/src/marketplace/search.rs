//! Free-text search over the working set and match highlighting.
//!
//! Everything here is synchronous and allocation-light: it runs on every
//! keystroke against listings that are already in memory.

use serde::Serialize;

use super::listing::Listing;

/// A search query, folded once so per-listing checks are plain substring tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = fold(&raw);
        Self { raw, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether the listing's location or item name contains the query.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.is_empty()
            || fold(&listing.location).contains(&self.folded)
            || fold(&listing.item_name).contains(&self.folded)
    }
}

/// Per-character lowercase, shared by filtering and highlighting.
///
/// `str::to_lowercase` maps a word-final `Σ` to `ς`, which would make the
/// filter disagree with highlight offsets.
fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// A piece of highlighted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchFragment {
    pub text: String,
    pub matched: bool,
}

impl MatchFragment {
    fn new(text: &str, matched: bool) -> Self {
        Self {
            text: text.to_string(),
            matched,
        }
    }
}

/// Listings whose location or item name contains `query`, in input order.
pub fn filter_listings<'a>(listings: &'a [Listing], query: &SearchQuery) -> Vec<&'a Listing> {
    listings.iter().filter(|l| query.matches(l)).collect()
}

/// Split `text` into matched and unmatched fragments for `query`.
///
/// Matches are found left to right and never overlap: once a match is taken
/// the search resumes after its end. Fragment text keeps the original
/// casing and no empty fragment is ever produced, except that an empty query
/// returns the whole text as a single unmatched fragment.
pub fn highlight(text: &str, query: &SearchQuery) -> Vec<MatchFragment> {
    if query.is_empty() {
        return vec![MatchFragment::new(text, false)];
    }

    let folded = FoldedText::new(text);
    let needle = query.folded.as_str();
    let mut out = Vec::new();
    let mut cursor = 0usize; // byte offset into `text`

    while cursor < text.len() {
        let Some((start, end)) = folded.find_from(cursor, needle) else {
            break;
        };
        if start > cursor {
            out.push(MatchFragment::new(&text[cursor..start], false));
        }
        out.push(MatchFragment::new(&text[start..end], true));
        cursor = end;
    }

    if cursor < text.len() {
        out.push(MatchFragment::new(&text[cursor..], false));
    }

    out
}

/// Lowercased copy of a string that remembers where each original
/// character starts, so hits in the folded text map back to original spans.
struct FoldedText {
    folded: String,
    /// `(folded_offset, original_offset)` for every original char boundary,
    /// including the end of the string.
    boundaries: Vec<(usize, usize)>,
}

impl FoldedText {
    fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut boundaries = Vec::with_capacity(text.len() + 1);

        for (offset, ch) in text.char_indices() {
            boundaries.push((folded.len(), offset));
            folded.extend(ch.to_lowercase());
        }
        boundaries.push((folded.len(), text.len()));

        Self { folded, boundaries }
    }

    fn original_offset(&self, folded_offset: usize) -> Option<usize> {
        self.boundaries
            .binary_search_by_key(&folded_offset, |&(f, _)| f)
            .ok()
            .map(|idx| self.boundaries[idx].1)
    }

    fn folded_offset(&self, original_offset: usize) -> Option<usize> {
        self.boundaries
            .iter()
            .find(|&&(_, o)| o == original_offset)
            .map(|&(f, _)| f)
    }

    /// First match of `needle` at or after `from` (an original byte offset),
    /// returned as an original `(start, end)` byte range.
    fn find_from(&self, from: usize, needle: &str) -> Option<(usize, usize)> {
        let mut search_at = self.folded_offset(from)?;

        while search_at <= self.folded.len() {
            let rel = self.folded[search_at..].find(needle)?;
            let hit = search_at + rel;

            if let (Some(start), Some(end)) = (
                self.original_offset(hit),
                self.original_offset(hit + needle.len()),
            ) {
                return Some((start, end));
            }

            // Hit splits a folded character; resume at the next folded char.
            search_at = hit + self.folded[hit..].chars().next()?.len_utf8();
        }

        None
    }
}
