//! Text metrics and numeral rendering for display statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::split_lines;

/// Bengali digit glyphs indexed by their value.
pub const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Count whitespace-separated words. Empty or whitespace-only text has none.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count lines with visible content; blank lines are excluded.
pub fn count_lines(text: &str) -> usize {
    split_lines(text)
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .count()
}

// ---------------------------------------------------------------------------
// Numerals
// ---------------------------------------------------------------------------

/// Render an integer with Bengali digits. A leading minus sign is kept.
pub fn to_localized_digits(n: i64) -> String {
    localize_digits(&n.to_string())
}

/// Replace every ASCII digit in `text` with its Bengali glyph.
pub fn localize_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '0'..='9' => BENGALI_DIGITS[usize::from(c as u8 - b'0')],
            _ => c,
        })
        .collect()
}

/// Digit script used when counts are shown to a reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigitStyle {
    /// ০১২৩৪৫৬৭৮৯
    #[default]
    Bengali,
    /// 0123456789
    Ascii,
}

impl DigitStyle {
    pub fn parse(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "bengali" | "bangla" | "bn" => Some(Self::Bengali),
            "ascii" | "latin" | "en" => Some(Self::Ascii),
            _ => None,
        }
    }

    /// Render a count in this digit style.
    pub fn render(self, n: usize) -> String {
        match self {
            Self::Bengali => localize_digits(&n.to_string()),
            Self::Ascii => n.to_string(),
        }
    }
}

impl fmt::Display for DigitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bengali => write!(f, "bengali"),
            Self::Ascii => write!(f, "ascii"),
        }
    }
}

// ---------------------------------------------------------------------------
// TextStats
// ---------------------------------------------------------------------------

/// Word and content-line counts of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub words: usize,
    pub lines: usize,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        Self {
            words: count_words(text),
            lines: count_lines(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words_across_mixed_whitespace() {
        assert_eq!(count_words("এক   দুই\tতিন"), 3);
        assert_eq!(count_words("  এক\nদুই  "), 2);
    }

    #[test]
    fn empty_text_has_no_words_or_lines() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" \t\n "), 0);
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("\n \n\t\n"), 0);
    }

    #[test]
    fn counts_only_content_lines() {
        assert_eq!(count_lines("A\n\n  \nB\r\nC\n"), 3);
    }

    #[test]
    fn localizes_digits() {
        assert_eq!(to_localized_digits(205), "২০৫");
        assert_eq!(to_localized_digits(0), "০");
        assert_eq!(to_localized_digits(1_234_567_890), "১২৩৪৫৬৭৮৯০");
    }

    #[test]
    fn negative_numbers_keep_their_sign() {
        assert_eq!(to_localized_digits(-42), "-৪২");
    }

    #[test]
    fn localize_digits_leaves_other_characters() {
        assert_eq!(localize_digits("লাইন 12, শব্দ 7"), "লাইন ১২, শব্দ ৭");
    }

    #[test]
    fn digit_style_renders_counts() {
        assert_eq!(DigitStyle::Bengali.render(31), "৩১");
        assert_eq!(DigitStyle::Ascii.render(31), "31");
    }

    #[test]
    fn digit_style_parse_handles_variants() {
        assert_eq!(DigitStyle::parse("bengali"), Some(DigitStyle::Bengali));
        assert_eq!(DigitStyle::parse("BN"), Some(DigitStyle::Bengali));
        assert_eq!(DigitStyle::parse("ascii"), Some(DigitStyle::Ascii));
        assert_eq!(DigitStyle::parse("roman"), None);
    }

    #[test]
    fn text_stats_from_text() {
        let stats = TextStats::from_text("আজি মেঘ কেটে গেছে\n\nএসো এসো");
        assert_eq!(stats, TextStats { words: 6, lines: 2 });
    }
}
