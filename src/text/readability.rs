//! Flesch reading-ease with a vowel-group syllable estimate

use super::{sentences, words};

/// Estimate syllables in a word by counting vowel groups
pub fn syllables(word: &str) -> usize {
    let letters: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut prev_vowel = false;
    for c in letters.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    // silent trailing e ("make"), but not "-le" ("table")
    if count > 1 && letters.ends_with('e') && !letters.ends_with("le") {
        count -= 1;
    }
    count.max(1)
}

/// Flesch reading-ease rounded to two decimals.
///
/// Returns `None` when the text has no sentences or no words with
/// letters or digits, which is the only failure the content analyzer
/// tolerates.
pub fn flesch_reading_ease(text: &str) -> Option<f64> {
    let sentence_count = sentences(text).len();
    let lexicon: Vec<&str> = words(text)
        .into_iter()
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .collect();
    if sentence_count == 0 || lexicon.is_empty() {
        return None;
    }

    let word_count = lexicon.len() as f64;
    let syllable_count: usize = lexicon.iter().map(|w| syllables(w)).sum();
    let score = 206.835
        - 1.015 * (word_count / sentence_count as f64)
        - 84.6 * (syllable_count as f64 / word_count);
    Some((score * 100.0).round() / 100.0)
}
