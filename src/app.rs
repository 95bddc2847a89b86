//! End-to-end workflow: load state, train one step, persist, probe
//! external services, record everything in the event log.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use crate::events::{EventLogger, utc_timestamp};
use crate::http::client::{HttpClient, Outcome};
use crate::http::request::Request;
use crate::store::StoreError;
use crate::store::model::{EOS_TOKEN, PAD_TOKEN};
use crate::store::state::StateManager;
use crate::train::markov::{evaluate, train_one_step};
use crate::train::metrics::count_metrics;
use crate::train::tokenizer::tokenize;

const HEALTH_BODY: &str = r#"{"jsonrpc":"2.0","id":"health","method":"health","params":{}}"#;
const CALL_BODY: &str =
    r#"{"jsonrpc":"2.0","id":"call","method":"call","params":{"message":"ping"}}"#;
const CHAT_BODY: &str =
    r#"{"model":"default","messages":[{"role":"user","content":"Hello from the training loop."}]}"#;

/// Executes one training/probe cycle rooted at a state directory.
pub struct Application {
    state_dir: PathBuf,
}

impl Application {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let manager = StateManager::new(&self.state_dir);
        let logger = EventLogger::new(manager.log_path());

        logger.emit(&json!({
            "timestamp": utc_timestamp(),
            "action": "startup",
            "version": env!("CARGO_PKG_VERSION"),
        }))?;

        let config = manager.load_or_init_config()?;
        let dataset = manager.load_or_init_dataset()?;
        let mut state = manager.load_or_init_model_state()?;
        state.ensure_core_tokens();

        // Tokenize every line, grow the vocabulary, terminate with <eos>.
        let mut raw_sequences = Vec::with_capacity(dataset.len());
        for line in &dataset {
            let mut tokens = tokenize(line);
            state.update_vocab(&tokens);
            tokens.push(EOS_TOKEN.to_string());
            raw_sequences.push(tokens);
        }

        // Right-pad every sequence to the longest one.
        let max_length = raw_sequences
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(1);
        let sequences: Vec<Vec<String>> = raw_sequences
            .into_iter()
            .map(|mut seq| {
                seq.resize(max_length, PAD_TOKEN.to_string());
                seq
            })
            .collect();

        let dataset_blob = dataset.join("\n");
        let metrics = count_metrics(&dataset_blob);
        logger.emit(&json!({
            "timestamp": utc_timestamp(),
            "action": "dataset_metrics",
            "tokens": metrics.tokens,
            "words": metrics.word_count,
            "total_letters": metrics.total_letters,
            "hash": hash_hex(&dataset_blob),
        }))?;

        let vocab_size = state.vocab.len();
        let train_start = Instant::now();
        let stats = train_one_step(&mut state, &sequences, vocab_size);
        let train_latency = train_start.elapsed();

        manager.save_model_state(&state)?;

        logger.emit(&json!({
            "timestamp": utc_timestamp(),
            "action": "train",
            "step": state.step,
            "loss_before": stats.loss_before,
            "loss_after": stats.loss_after,
            "perplexity": stats.perplexity,
            "tokens": stats.token_count,
            "sequences": stats.sequence_count,
            "latency_ms": train_latency.as_millis() as u64,
            "dataset_hash": hash_hex(&dataset_blob),
        }))?;

        let eval_stats = evaluate(&state, &sequences, state.vocab.len());
        logger.emit(&json!({
            "timestamp": utc_timestamp(),
            "action": "evaluation",
            "loss": eval_stats.loss,
            "perplexity": eval_stats.perplexity,
            "step": state.step,
        }))?;

        let client = HttpClient::new();
        let timeout = config.timeout();

        let health = Request::post(config.mcp_url.as_str(), HEALTH_BODY);
        let health_outcome = client.perform(&health, timeout, config.retries);
        log_probe(&logger, "mcp_health", HEALTH_BODY, &health_outcome)?;

        let call = Request::post(config.mcp_url.as_str(), CALL_BODY);
        let call_outcome = client.perform(&call, timeout, config.retries);
        log_probe(&logger, "mcp_call", CALL_BODY, &call_outcome)?;

        let chat = Request::post(config.lm_studio_url.as_str(), CHAT_BODY);
        let chat_outcome = client.perform(&chat, timeout, config.retries);
        log_probe(&logger, "lm_studio_chat", CHAT_BODY, &chat_outcome)?;

        tracing::info!(
            step = state.step,
            loss = stats.loss_after,
            perplexity = stats.perplexity,
            "training step completed"
        );
        for (probe, outcome) in [
            ("mcp_health", &health_outcome),
            ("mcp_call", &call_outcome),
            ("lm_studio_chat", &chat_outcome),
        ] {
            if let Outcome::Failure { error, .. } = outcome {
                tracing::warn!(probe, error = %error, "service probe failed");
            }
        }

        Ok(())
    }
}

fn log_probe(
    logger: &EventLogger,
    action: &str,
    request_body: &str,
    outcome: &Outcome,
) -> Result<(), StoreError> {
    let event = match outcome {
        Outcome::Success { response, latency } => json!({
            "timestamp": utc_timestamp(),
            "action": action,
            "request_hash": hash_hex(request_body),
            "status": response.status,
            "latency_ms": latency.as_millis() as u64,
            "response_hash": hash_hex(&String::from_utf8_lossy(&response.body)),
        }),
        Outcome::Failure { error, latency } => json!({
            "timestamp": utc_timestamp(),
            "action": action,
            "request_hash": hash_hex(request_body),
            "error": error.to_string(),
            "latency_ms": latency.as_millis() as u64,
        }),
    };
    logger.emit(&event)
}

fn hash_hex(value: &str) -> String {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}
