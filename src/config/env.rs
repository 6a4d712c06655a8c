use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    SecretId,
    SecretKey,
    Endpoint,
    Proxy,
    OutputBucket,
    OutputDir,
    TranscodeDefinitions,
    RequestTimeoutMs,
    RetryMaxAttempts,
    RetryBaseDelayMs,
    RetryMaxDelayMs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::SecretId => "VOD_SECRET_ID",
            EnvKey::SecretKey => "VOD_SECRET_KEY",
            EnvKey::Endpoint => "VOD_ENDPOINT",
            EnvKey::Proxy => "VOD_PROXY",
            EnvKey::OutputBucket => "VOD_OUTPUT_BUCKET",
            EnvKey::OutputDir => "VOD_OUTPUT_DIR",
            EnvKey::TranscodeDefinitions => "VOD_TRANSCODE_DEFINITIONS",
            EnvKey::RequestTimeoutMs => "VOD_REQUEST_TIMEOUT_MS",
            EnvKey::RetryMaxAttempts => "RETRY_MAX_ATTEMPTS",
            EnvKey::RetryBaseDelayMs => "RETRY_BASE_DELAY_MS",
            EnvKey::RetryMaxDelayMs => "RETRY_MAX_DELAY_MS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_opt(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|v| !v.is_empty())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
