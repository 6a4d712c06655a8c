use crate::common::retry::RetryPolicy;
use crate::config::env::{self, EnvKey};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://vod.api.qcloud.com/v2/index.php";

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub secret_id: String,
    pub secret_key: String,
    pub endpoint: String,
    pub proxy: Option<String>,
    pub output_bucket: Option<String>,
    pub output_dir: Option<String>,
    /// Encoding profile ids on the remote service; only index 0 is submitted.
    pub transcode_definitions: Vec<u64>,
    pub request_timeout_ms: u64,
    pub retry_max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            secret_id: env::get(EnvKey::SecretId)?,
            secret_key: env::get(EnvKey::SecretKey)?,
            endpoint: env::get_or(EnvKey::Endpoint, DEFAULT_ENDPOINT),
            proxy: env::get_opt(EnvKey::Proxy),
            output_bucket: env::get_opt(EnvKey::OutputBucket),
            output_dir: env::get_opt(EnvKey::OutputDir),
            transcode_definitions: parse_definitions(&env::get_or(
                EnvKey::TranscodeDefinitions,
                "",
            )),
            request_timeout_ms: env::get_parsed(EnvKey::RequestTimeoutMs, 5000),
            retry_max_attempts: env::get_parsed(EnvKey::RetryMaxAttempts, 3),
            retry_base_delay_ms: env::get_parsed(EnvKey::RetryBaseDelayMs, 200),
            retry_max_delay_ms: env::get_parsed(EnvKey::RetryMaxDelayMs, 2000),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
            Duration::from_millis(self.retry_max_delay_ms),
        )
    }
}

/// Parses a comma-separated list of profile ids. Malformed entries are
/// dropped here so they can never reach the request signer.
fn parse_definitions(raw: &str) -> Vec<u64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_definitions() {
        assert_eq!(parse_definitions("100, 210,30"), vec![100, 210, 30]);
    }

    #[test]
    fn drops_malformed_definition_entries() {
        assert_eq!(parse_definitions("100,abc,,NaN,20"), vec![100, 20]);
    }

    #[test]
    fn empty_definition_list_stays_empty() {
        assert!(parse_definitions("").is_empty());
    }
}
