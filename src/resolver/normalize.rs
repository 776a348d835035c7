//! Text normalization shared by the input side and the title side.
//!
//! Both sides must go through [`normalize`] so that a window of input words
//! and a candidate title compare equal exactly when they read the same.

use std::collections::VecDeque;

/// Characters that end a sentence fragment.
const SENTENCE_DELIMITERS: &[char] = &['.', '?', '!', '(', ')', ','];

/// Non-ASCII punctuation that shows up in titles and typed text.
const TYPOGRAPHIC_PUNCTUATION: &[char] = &[
    '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2013}', '\u{2014}', '\u{2026}', '\u{00A1}',
    '\u{00BF}',
];

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || TYPOGRAPHIC_PUNCTUATION.contains(&c)
}

/// Splits free text into trimmed, non-empty sentence fragments.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(SENTENCE_DELIMITERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Lowercases, drops punctuation and collapses whitespace.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !is_punctuation(*c))
        .collect::<String>()
        .to_lowercase();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Front-consumed queue of normalized words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordQueue {
    words: VecDeque<String>,
}

impl WordQueue {
    pub fn from_text(text: &str) -> Self {
        Self {
            words: normalize(text).split(' ').filter(|w| !w.is_empty()).map(String::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The first `n` words joined by single spaces (fewer if the queue is shorter).
    pub fn window(&self, n: usize) -> String {
        self.words
            .iter()
            .take(n)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Removes up to `n` leading words.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.words.len());
        self.words.drain(..n);
    }
}

impl<S: Into<String>> FromIterator<S> for WordQueue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Normalizes `text` and splits it into words.
pub fn words(text: &str) -> WordQueue {
    WordQueue::from_text(text)
}
