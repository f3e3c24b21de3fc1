//! Split display text around the first match of the filter text.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::option_filter::find_ignore_case;

/// A display string cut into the part before the match, the match itself,
/// and the rest.
///
/// `pre + matched + post` always reproduces the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan<'a> {
    pub pre: &'a str,
    pub matched: &'a str,
    pub post: &'a str,
}

impl<'a> HighlightSpan<'a> {
    /// The whole candidate, unhighlighted.
    fn plain(candidate: &'a str) -> Self {
        Self {
            pre: candidate,
            matched: "",
            post: "",
        }
    }

    /// Whether any text is highlighted.
    pub fn has_match(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Render as styled spans, skipping empty parts.
    pub fn to_line(self, base: Style, highlight: Style) -> Line<'a> {
        let spans: Vec<Span<'a>> = [
            (self.pre, base),
            (self.matched, base.patch(highlight)),
            (self.post, base),
        ]
        .into_iter()
        .filter(|(text, _)| !text.is_empty())
        .map(|(text, style)| Span::styled(text, style))
        .collect();
        Line::from(spans)
    }
}

/// Highlight the first case-insensitive occurrence of `search` in
/// `candidate`.
///
/// An empty `search` leaves everything in `pre`. When `search` does not
/// occur at all (for example a committed value shown against a newer
/// filter), the result is the same plain split.
pub fn format<'a>(search: &str, candidate: &'a str) -> HighlightSpan<'a> {
    if search.is_empty() {
        return HighlightSpan::plain(candidate);
    }
    match find_ignore_case(candidate, search) {
        Some(range) => HighlightSpan {
            pre: &candidate[..range.start],
            matched: &candidate[range.clone()],
            post: &candidate[range.end..],
        },
        None => HighlightSpan::plain(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn joined(span: HighlightSpan<'_>) -> String {
        format!("{}{}{}", span.pre, span.matched, span.post)
    }

    #[test]
    fn splits_around_first_match() {
        let span = format("Ben", "Benny");
        assert_eq!(
            span,
            HighlightSpan {
                pre: "",
                matched: "Ben",
                post: "ny"
            }
        );
    }

    #[test]
    fn keeps_candidate_casing() {
        let span = format("NN", "Benny");
        assert_eq!((span.pre, span.matched, span.post), ("Be", "nn", "y"));
        assert_eq!(joined(span), "Benny");
    }

    #[test]
    fn only_first_occurrence_is_highlighted() {
        let span = format("a", "banana");
        assert_eq!((span.pre, span.matched, span.post), ("b", "a", "nana"));
    }

    #[test]
    fn empty_search_is_plain() {
        let span = format("", "Sue");
        assert_eq!((span.pre, span.matched, span.post), ("Sue", "", ""));
        assert!(!span.has_match());
    }

    #[test]
    fn missing_search_falls_back_to_plain() {
        let span = format("zz", "Sue");
        assert_eq!((span.pre, span.matched, span.post), ("Sue", "", ""));
    }

    #[test]
    fn lengths_add_up() {
        for (search, candidate) in [("im", "Tim is great"), ("É", "café éclair"), ("y", "Daisy")] {
            let span = format(search, candidate);
            assert!(span.has_match());
            assert_eq!(
                span.pre.len() + span.matched.len() + span.post.len(),
                candidate.len()
            );
            assert_eq!(joined(span), candidate);
        }
    }

    #[test]
    fn line_styles_only_the_match() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = format("en", "Benny").to_line(Style::default(), bold);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "en");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(!line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn line_skips_empty_parts() {
        let line = format("", "Sue").to_line(Style::default(), Style::default());
        assert_eq!(line.spans.len(), 1);
    }
}
