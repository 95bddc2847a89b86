use serde::Serialize;

use crate::train::tokenizer::tokenize;

/// Aggregate lexical statistics over a text blob.
///
/// `letters_per_word.len()` always equals `word_count`, and `tokens`
/// mirrors the tokenizer output size.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CountMetrics {
    pub tokens: usize,
    pub word_count: usize,
    pub total_letters: usize,
    pub letters_per_word: Vec<usize>,
    pub words: Vec<String>,
}

/// Count lexical metrics for an arbitrary text buffer.
pub fn count_metrics(text: &str) -> CountMetrics {
    let tokens = tokenize(text);
    let mut metrics = CountMetrics {
        tokens: tokens.len(),
        ..Default::default()
    };

    for token in tokens {
        let mut letters = 0;
        let mut is_word = true;
        for ch in token.chars() {
            if ch.is_alphabetic() {
                letters += 1;
            } else {
                is_word = false;
            }
        }
        if is_word && !token.is_empty() {
            metrics.word_count += 1;
            metrics.total_letters += letters;
            metrics.letters_per_word.push(letters);
            metrics.words.push(token);
        }
    }

    metrics
}
