use std::time::Duration;

/// Endpoints and retry policy for the external service probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// JSON-RPC endpoint of the MCP service
    pub mcp_url: String,
    /// Chat-completions endpoint of the LM Studio service
    pub lm_studio_url: String,
    /// Per-attempt timeout applied to connect, send and receive
    pub request_timeout_ms: u64,
    /// Retries allowed after the first attempt
    pub retries: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            mcp_url: "http://127.0.0.1:3333/jsonrpc".to_string(),
            lm_studio_url: "http://127.0.0.1:1234/v1/chat/completions".to_string(),
            request_timeout_ms: 2000,
            retries: 2,
        }
    }
}

impl TrainingConfig {
    /// Parse `key=value` lines.
    ///
    /// Blank lines and `#` comments are skipped, unrecognized keys are
    /// ignored, and missing or unparseable values keep the built-in
    /// defaults. Keys and values are taken verbatim, with no inner trimming.
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match key {
                "mcp_url" => config.mcp_url = value.to_string(),
                "lm_studio_url" => config.lm_studio_url = value.to_string(),
                "request_timeout_ms" => {
                    if let Ok(parsed) = value.parse() {
                        config.request_timeout_ms = parsed;
                    }
                }
                "retries" => {
                    if let Ok(parsed) = value.parse() {
                        config.retries = parsed;
                    }
                }
                _ => {}
            }
        }

        config
    }

    /// Per-attempt timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Contents written to a fresh state root on first run.
    pub fn default_file_content() -> String {
        let config = Self::default();
        format!(
            "# autodidact configuration\n\
             mcp_url={}\n\
             lm_studio_url={}\n\
             request_timeout_ms={}\n\
             retries={}\n",
            config.mcp_url, config.lm_studio_url, config.request_timeout_ms, config.retries
        )
    }
}
