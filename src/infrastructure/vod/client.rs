use crate::config::settings::AppConfig;
use crate::infrastructure::vod::signing;
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use time::OffsetDateTime;
use url::Url;

pub const ACTION_PROCESS_COS_MEDIA: &str = "ProcessCosMedia";

/// Parameters of one ProcessCosMedia submission.
#[derive(Debug, Clone)]
pub struct ProcessMediaRequest {
    pub region: String,
    pub input_bucket: String,
    pub input_path: String,
    pub output_bucket: String,
    pub output_dir: String,
    /// Encoding profile id, submitted as `mediaProcess.transcode.definition.0`.
    pub definition: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscodeResult {
    pub code: i64,
    #[serde(rename = "codeDesc", default)]
    pub code_desc: String,
    #[serde(rename = "vodTaskId", default)]
    pub vod_task_id: String,
}

#[derive(Debug, Error)]
pub enum VodError {
    #[error("transport error calling VOD API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("VOD API rejected the request: code {code}, {desc}")]
    Api { code: i64, desc: String },
    #[error("failed to sign VOD request: {0}")]
    Signing(String),
}

#[derive(Clone)]
pub struct VodClient {
    http: reqwest::Client,
    endpoint: Url,
    secret_id: String,
    secret_key: String,
}

impl VodClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms));
        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: Url::parse(&config.endpoint)?,
            secret_id: config.secret_id.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    /// One signed GET against the media API. Success is `code == 0`; any
    /// other code comes back as [`VodError::Api`] so the caller can retry it
    /// the same way as a transport failure.
    pub async fn process_media(
        &self,
        request: &ProcessMediaRequest,
    ) -> Result<TranscodeResult, VodError> {
        let url = self
            .signed_url(request)
            .map_err(|e| VodError::Signing(e.to_string()))?;

        let result: TranscodeResult = self.http.get(url).send().await?.json().await?;
        if result.code != 0 {
            return Err(VodError::Api {
                code: result.code,
                desc: result.code_desc,
            });
        }
        Ok(result)
    }

    fn signed_url(&self, request: &ProcessMediaRequest) -> anyhow::Result<Url> {
        let mut params = BTreeMap::new();
        params.insert("Action".to_string(), ACTION_PROCESS_COS_MEDIA.to_string());
        params.insert("Region".to_string(), request.region.clone());
        params.insert("SecretId".to_string(), self.secret_id.clone());
        params.insert(
            "Timestamp".to_string(),
            OffsetDateTime::now_utc().unix_timestamp().to_string(),
        );
        params.insert(
            "Nonce".to_string(),
            rand::rng().random_range(1..=u64::from(u32::MAX)).to_string(),
        );
        params.insert("input.bucket".to_string(), request.input_bucket.clone());
        params.insert("input.path".to_string(), request.input_path.clone());
        params.insert("output.bucket".to_string(), request.output_bucket.clone());
        params.insert("output.dir".to_string(), request.output_dir.clone());
        params.insert(
            "mediaProcess.transcode.definition.0".to_string(),
            request.definition.to_string(),
        );

        signing::build_signed_url(&self.endpoint, &params, &self.secret_key)
    }
}
