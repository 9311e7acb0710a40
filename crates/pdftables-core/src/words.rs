//! Grouping characters into words and lines of text.

use crate::cluster::cluster_indices;
use crate::text::Char;

/// Options for word extraction, matching pdfplumber defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct WordOptions {
    /// Maximum horizontal gap between characters of the same word.
    pub x_tolerance: f64,
    /// Maximum vertical distance between characters on the same line.
    pub y_tolerance: f64,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            x_tolerance: 3.0,
            y_tolerance: 3.0,
        }
    }
}

/// Extracts words and text lines from characters based on spatial proximity.
pub struct WordExtractor;

impl WordExtractor {
    /// Group characters into lines: clusters of `top` within `y_tolerance`,
    /// top to bottom, each sorted left to right.
    pub fn lines<'a>(chars: &[&'a Char], options: &WordOptions) -> Vec<Vec<&'a Char>> {
        let tops: Vec<f64> = chars.iter().map(|c| c.bbox.top).collect();
        cluster_indices(&tops, options.y_tolerance)
            .into_iter()
            .map(|cluster| {
                let mut line: Vec<&Char> = cluster.into_iter().map(|i| chars[i]).collect();
                line.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
                line
            })
            .collect()
    }

    /// Split one line of characters into words.
    ///
    /// A blank character ends the current word. A character starts a new word
    /// when it begins left of the previous one or more than `x_tolerance`
    /// past its right edge.
    fn line_words(line: &[&Char], options: &WordOptions) -> Vec<String> {
        let mut words = Vec::new();
        let mut current: Vec<&Char> = Vec::new();

        for &ch in line {
            if ch.is_blank() {
                words.extend(Self::make_word(&current));
                current.clear();
                continue;
            }
            if let Some(prev) = current.last() {
                let breaks = ch.bbox.x0 < prev.bbox.x0
                    || ch.bbox.x0 > prev.bbox.x1 + options.x_tolerance;
                if breaks {
                    words.extend(Self::make_word(&current));
                    current.clear();
                }
            }
            current.push(ch);
        }
        words.extend(Self::make_word(&current));
        words
    }

    fn make_word(chars: &[&Char]) -> Option<String> {
        (!chars.is_empty()).then(|| chars.iter().map(|c| c.text.as_str()).collect())
    }

    /// Plain text of `chars`: words joined by a space, lines by a newline.
    pub fn text(chars: &[&Char], options: &WordOptions) -> String {
        Self::lines(chars, options)
            .iter()
            .map(|line| Self::line_words(line, options))
            .filter(|words| !words.is_empty())
            .map(|words| words.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
