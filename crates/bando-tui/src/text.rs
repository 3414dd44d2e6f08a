//! Grapheme-aware text helpers.
//!
//! Truncation counts graphemes (the unit users perceive), while wrapping
//! budgets display columns, since that is what the terminal clips on.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Truncate `text` to at most `max` graphemes.
///
/// Returns the (possibly shortened) text and whether anything was cut.
#[must_use]
pub fn truncate_graphemes(text: &str, max: usize) -> (String, bool) {
    let mut iter = text.grapheme_indices(true);
    match iter.nth(max) {
        Some((byte_idx, _)) => (text[..byte_idx].trim_end().to_owned(), true),
        None => (text.to_owned(), false),
    }
}

/// Whether `text` exceeds `max` graphemes (without allocating a cut copy).
#[must_use]
pub fn exceeds_graphemes(text: &str, max: usize) -> bool {
    text.graphemes(true).nth(max).is_some()
}

/// Greedy word wrap to a column budget.
///
/// Words wider than the budget are split at grapheme boundaries rather than
/// overflowing. A zero budget yields no lines.
#[must_use]
pub fn wrap_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;

    let mut push_word = |word: &str, lines: &mut Vec<String>, line: &mut String, lw: &mut usize| {
        let ww = UnicodeWidthStr::width(word);
        let sep = usize::from(!line.is_empty());
        if *lw + sep + ww <= width {
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(word);
            *lw += sep + ww;
            return;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(line));
            *lw = 0;
        }
        if ww <= width {
            line.push_str(word);
            *lw = ww;
            return;
        }
        // Word alone exceeds the budget: hard-split on graphemes.
        for grapheme in word.graphemes(true) {
            let gw = UnicodeWidthStr::width(grapheme);
            if *lw + gw > width && !line.is_empty() {
                lines.push(std::mem::take(line));
                *lw = 0;
            }
            line.push_str(grapheme);
            *lw += gw;
        }
    };

    for word in text.split_whitespace() {
        push_word(word, &mut lines, &mut line, &mut line_width);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use unicode_segmentation::UnicodeSegmentation;

    #[test]
    fn truncate_short_text_is_untouched() {
        let (out, cut) = truncate_graphemes("breve", 100);
        assert_eq!(out, "breve");
        assert!(!cut);
    }

    #[test]
    fn truncate_at_exact_length_is_untouched() {
        let (out, cut) = truncate_graphemes("abc", 3);
        assert_eq!(out, "abc");
        assert!(!cut);
    }

    #[test]
    fn truncate_cuts_on_grapheme_boundary() {
        // Combining mark must stay attached to its base.
        let text = "e\u{0301}e\u{0301}e\u{0301}"; // é é é as 3 graphemes
        let (out, cut) = truncate_graphemes(text, 2);
        assert!(cut);
        assert_eq!(out.graphemes(true).count(), 2);
    }

    #[test]
    fn truncate_trims_trailing_space() {
        let (out, cut) = truncate_graphemes("uno due tre", 8);
        assert_eq!(out, "uno due");
        assert!(cut);
    }

    #[test]
    fn exceeds_matches_truncate() {
        assert!(!exceeds_graphemes("abc", 3));
        assert!(exceeds_graphemes("abcd", 3));
    }

    #[test]
    fn wrap_respects_budget() {
        let lines = wrap_width("la commissione valuta la qualità", 12);
        for line in &lines {
            assert!(unicode_width::UnicodeWidthStr::width(line.as_str()) <= 12);
        }
        assert_eq!(lines.join(" "), "la commissione valuta la qualità");
    }

    #[test]
    fn wrap_splits_oversized_word() {
        let lines = wrap_width("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_zero_width_is_empty() {
        assert!(wrap_width("qualcosa", 0).is_empty());
    }

    #[test]
    fn wrap_empty_text_is_empty() {
        assert!(wrap_width("", 10).is_empty());
        assert!(wrap_width("   ", 10).is_empty());
    }

    proptest! {
        #[test]
        fn truncate_never_exceeds_max(text in "\\PC{0,64}", max in 0usize..32) {
            let (out, _) = truncate_graphemes(&text, max);
            prop_assert!(out.graphemes(true).count() <= max);
        }

        #[test]
        fn wrap_lines_never_exceed_width(text in "[a-zà-ù ]{0,80}", width in 1usize..24) {
            for line in wrap_width(&text, width) {
                prop_assert!(unicode_width::UnicodeWidthStr::width(line.as_str()) <= width);
            }
        }
    }
}
