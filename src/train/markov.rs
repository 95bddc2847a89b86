//! Laplace-smoothed bigram training and evaluation.
//!
//! The probability of observing `next` after `current` is estimated as
//! `(1 + transitions[current][next]) / (vocab_size + totals[current])`.
//! Totals accumulate independently of the transition rows during training;
//! the denominator uses them as-is rather than re-deriving row sums.

use serde::Serialize;

use crate::store::model::{ModelState, PAD_TOKEN};

/// Summary of a single training iteration.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct TrainingStats {
    pub loss_before: f64,
    pub loss_after: f64,
    pub perplexity: f64,
    pub token_count: usize,
    pub sequence_count: usize,
}

/// Metrics from an evaluation pass.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct EvaluationStats {
    pub loss: f64,
    pub perplexity: f64,
}

struct LossAccumulator {
    loss_sum: f64,
    count: usize,
}

fn compute_loss(
    state: &ModelState,
    sequences: &[Vec<String>],
    vocab_size: usize,
) -> LossAccumulator {
    let mut result = LossAccumulator {
        loss_sum: 0.0,
        count: 0,
    };
    if vocab_size == 0 {
        return result;
    }

    for seq in sequences {
        if seq.len() < 2 {
            continue;
        }
        for pair in seq.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if current == PAD_TOKEN || next == PAD_TOKEN {
                continue;
            }
            // Laplace smoothing
            let mut matched = 1.0;
            let mut total = vocab_size as f64;
            if let Some(row_total) = state.totals.get(current) {
                total += row_total;
            }
            if let Some(count) = state
                .transitions
                .get(current)
                .and_then(|row| row.get(next))
            {
                matched += count;
            }
            let probability = matched / total;
            result.loss_sum -= probability.ln();
            result.count += 1;
        }
    }

    result
}

/// Perform one training iteration, mutating `state` in place.
///
/// Every observed (current, next) pair adds 1.0 to its transition count
/// and 1.0 to the current token's total; pairs touching the pad token are
/// skipped, as are sequences shorter than two tokens.
pub fn train_one_step(
    state: &mut ModelState,
    sequences: &[Vec<String>],
    vocab_size: usize,
) -> TrainingStats {
    let mut stats = TrainingStats {
        sequence_count: sequences.len(),
        ..Default::default()
    };

    let before = compute_loss(state, sequences, vocab_size);
    if before.count > 0 {
        stats.loss_before = before.loss_sum / before.count as f64;
    }
    stats.token_count = before.count;

    for seq in sequences {
        if seq.len() < 2 {
            continue;
        }
        for pair in seq.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if current == PAD_TOKEN || next == PAD_TOKEN {
                continue;
            }
            *state
                .transitions
                .entry(current.clone())
                .or_default()
                .entry(next.clone())
                .or_insert(0.0) += 1.0;
            *state.totals.entry(current.clone()).or_insert(0.0) += 1.0;
        }
    }

    state.step += 1;

    let after = compute_loss(state, sequences, vocab_size);
    if after.count > 0 {
        stats.loss_after = after.loss_sum / after.count as f64;
        stats.perplexity = stats.loss_after.exp();
    }

    stats
}

/// Evaluate the model over `sequences` without mutating state.
pub fn evaluate(
    state: &ModelState,
    sequences: &[Vec<String>],
    vocab_size: usize,
) -> EvaluationStats {
    let mut stats = EvaluationStats::default();
    let result = compute_loss(state, sequences, vocab_size);
    if result.count > 0 {
        stats.loss = result.loss_sum / result.count as f64;
        stats.perplexity = stats.loss.exp();
    }
    stats
}
