//! Text segmentation used by the analyzers
//!
//! All helpers borrow from the input and never fail: an empty string
//! produces empty word and sentence lists and a single empty line.

mod readability;

pub use readability::{flesch_reading_ease, syllables};

/// Whitespace-separated tokens
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Number of whitespace-separated tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lines split on `\n`; an empty text yields one empty line
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Split text into sentences.
///
/// A sentence ends after `.`, `!` or `?` when the next character is
/// whitespace or the end of the text. Newlines alone do not end a sentence,
/// so an unpunctuated block of lines counts as one sentence.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let at_boundary = match chars.peek() {
            None => true,
            Some((_, next)) => next.is_whitespace(),
        };
        if at_boundary {
            let end = i + c.len_utf8();
            push_trimmed(&mut out, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut out, &text[start..]);
    out
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, fragment: &'a str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}

/// Mean token count per sentence, 0 when there are no sentences
pub fn average_sentence_length(sentences: &[&str]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let total: usize = sentences.iter().map(|s| word_count(s)).sum();
    total as f64 / sentences.len() as f64
}

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
