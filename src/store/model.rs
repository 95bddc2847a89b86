//! Markov model state and its on-disk text format.
//!
//! The serialized layout is line-oriented and deterministic:
//!
//! ```text
//! STEP <int>
//! VOCAB <n>
//! <token_1>
//! ...
//! <token_n>
//! TRANSITIONS <m>
//! <current>\t<next>\t<count>
//! TOTALS <k>
//! <token>\t<total>
//! ```
//!
//! Parsing is strict and sequential; any keyword, count or number mismatch
//! aborts with a descriptive corruption error. There is no partial
//! recovery.

use std::collections::{BTreeMap, HashSet};

use crate::store::StoreError;

/// Token standing in for padding positions in fixed-length sequences.
pub const PAD_TOKEN: &str = "<pad>";
/// Token marking the end of a training sequence.
pub const EOS_TOKEN: &str = "<eos>";

/// Trained model state persisted between runs.
///
/// `vocab` keeps tokens in discovery order; the order matters only for
/// stable serialization, not for model behavior. `totals` accumulate
/// independently of the transition rows during training and are not
/// required to equal the per-row sums; the asymmetry is part of the
/// model's observable behavior and is preserved by the codec.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelState {
    /// Monotonically increasing training step counter
    pub step: u64,
    /// Unique vocabulary tokens in discovery order
    pub vocab: Vec<String>,
    /// Accumulated (current → next → count) transition observations
    pub transitions: BTreeMap<String, BTreeMap<String, f64>>,
    /// Accumulated denominator mass per token
    pub totals: BTreeMap<String, f64>,
}

impl ModelState {
    /// Fresh empty state carrying the two reserved tokens.
    pub fn new() -> Self {
        let mut state = Self::default();
        state.ensure_core_tokens();
        state
    }

    /// Append the reserved pad and end-of-sequence tokens if missing.
    pub fn ensure_core_tokens(&mut self) {
        if !self.vocab.iter().any(|token| token == PAD_TOKEN) {
            self.vocab.push(PAD_TOKEN.to_string());
        }
        if !self.vocab.iter().any(|token| token == EOS_TOKEN) {
            self.vocab.push(EOS_TOKEN.to_string());
        }
    }

    /// Merge newly observed tokens into the vocabulary, preserving
    /// discovery order and skipping duplicates.
    pub fn update_vocab(&mut self, tokens: &[String]) {
        let mut existing: HashSet<String> = self.vocab.iter().cloned().collect();
        for token in tokens {
            if existing.insert(token.clone()) {
                self.vocab.push(token.clone());
            }
        }
    }

    /// Serialize to the line-oriented text layout.
    ///
    /// The transition count is re-derived from the rows at write time, not
    /// cached.
    pub fn encode(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("STEP {}\n", self.step));

        out.push_str(&format!("VOCAB {}\n", self.vocab.len()));
        for token in &self.vocab {
            out.push_str(token);
            out.push('\n');
        }

        let rows: usize = self.transitions.values().map(BTreeMap::len).sum();
        out.push_str(&format!("TRANSITIONS {rows}\n"));
        for (current, inner) in &self.transitions {
            for (next, count) in inner {
                out.push_str(&format!("{current}\t{next}\t{count}\n"));
            }
        }

        out.push_str(&format!("TOTALS {}\n", self.totals.len()));
        for (token, total) in &self.totals {
            out.push_str(&format!("{token}\t{total}\n"));
        }

        out
    }

    /// Parse a previously encoded state.
    pub fn decode(text: &str) -> Result<Self, StoreError> {
        let mut lines = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line));

        let step_line = lines
            .next()
            .ok_or_else(|| corrupt("model state file is empty"))?;
        let step = header_value(step_line, "STEP")?;

        let vocab_line = lines
            .next()
            .ok_or_else(|| corrupt("missing VOCAB header"))?;
        let vocab_count = header_value(vocab_line, "VOCAB")? as usize;
        let mut vocab = Vec::new();
        for _ in 0..vocab_count {
            let token = lines
                .next()
                .ok_or_else(|| corrupt("vocab entries truncated"))?;
            vocab.push(token.to_string());
        }

        let transitions_line = lines
            .next()
            .ok_or_else(|| corrupt("missing TRANSITIONS header"))?;
        let transition_count = header_value(transitions_line, "TRANSITIONS")? as usize;
        let mut transitions: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for _ in 0..transition_count {
            let row = lines
                .next()
                .ok_or_else(|| corrupt("transition rows truncated"))?;
            let mut fields = row.splitn(3, '\t');
            let current = fields
                .next()
                .ok_or_else(|| corrupt("malformed transition row"))?;
            let next = fields
                .next()
                .ok_or_else(|| corrupt("malformed transition row"))?;
            let count = fields
                .next()
                .ok_or_else(|| corrupt("malformed transition row"))?
                .parse::<f64>()
                .map_err(|_| corrupt("failed to parse transition count"))?;
            transitions
                .entry(current.to_string())
                .or_default()
                .insert(next.to_string(), count);
        }

        let totals_line = lines
            .next()
            .ok_or_else(|| corrupt("missing TOTALS header"))?;
        let totals_count = header_value(totals_line, "TOTALS")? as usize;
        let mut totals = BTreeMap::new();
        for _ in 0..totals_count {
            let row = lines
                .next()
                .ok_or_else(|| corrupt("totals rows truncated"))?;
            let (token, value) = row
                .split_once('\t')
                .ok_or_else(|| corrupt("malformed totals row"))?;
            let total = value
                .parse::<f64>()
                .map_err(|_| corrupt("failed to parse totals value"))?;
            totals.insert(token.to_string(), total);
        }

        let mut state = Self {
            step,
            vocab,
            transitions,
            totals,
        };
        state.ensure_core_tokens();
        Ok(state)
    }
}

fn corrupt(message: &str) -> StoreError {
    StoreError::Corrupt(message.to_string())
}

fn header_value(line: &str, keyword: &str) -> Result<u64, StoreError> {
    let rest = line
        .trim()
        .strip_prefix(keyword)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or_else(|| StoreError::Corrupt(format!("expected {keyword} header")))?;
    rest.parse::<u64>()
        .map_err(|_| StoreError::Corrupt(format!("failed to parse {keyword} value")))
}
