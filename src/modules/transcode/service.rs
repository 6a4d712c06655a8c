use super::dto::{BatchReport, RecordOutcome, RecordReport, SkipReason};
use super::model::{ObjectKey, Record, StorageEvent};
use crate::infrastructure::vod::client::ProcessMediaRequest;
use crate::state::AppState;
use tracing::{debug, error, info, warn};

/// Event names that fan into the transcode pipeline.
const OBJECT_CREATED_PREFIX: &str = "cos:ObjectCreated";

/// Extensions accepted without consulting `Content-Type`.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "flv", "avi", "wmv", "mov", "mkv", "mpg", "mpeg", "ts", "m3u8", "webm", "3gp", "rm",
    "rmvb", "vob", "f4v", "m4v", "asf", "mts", "dat",
];

pub struct TranscodeService;

impl TranscodeService {
    /// Runs a whole batch. Records are handled one at a time and a failing
    /// record never aborts the batch; every record ends in exactly one
    /// reported outcome and nothing propagates out to the caller.
    pub async fn handle_event(state: &AppState, event: StorageEvent) -> BatchReport {
        let mut reports = Vec::with_capacity(event.records.len());
        for record in event.records {
            let key = record.cos.object.key.clone();
            let outcome = Self::handle_record(state, &record).await;
            match &outcome {
                RecordOutcome::Skipped { reason } => {
                    info!(key = %key, reason = ?reason, "record skipped");
                }
                RecordOutcome::Submitted { task_id, attempts } => {
                    info!(key = %key, task_id = %task_id, attempts, "transcode task submitted");
                }
                RecordOutcome::Failed { attempts, error } => {
                    error!(key = %key, attempts, error = %error, "transcode abandoned after retries");
                }
            }
            reports.push(RecordReport { key, outcome });
        }
        BatchReport::from_records(reports)
    }

    async fn handle_record(state: &AppState, record: &Record) -> RecordOutcome {
        if !record.event.starts_with(OBJECT_CREATED_PREFIX) {
            return RecordOutcome::Skipped {
                reason: SkipReason::NotCreatedEvent,
            };
        }

        let key = match ObjectKey::parse(&record.cos.object.key) {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "cannot decompose object key");
                return RecordOutcome::Skipped {
                    reason: SkipReason::MalformedKey,
                };
            }
        };
        debug!(
            app_id = %key.app_id,
            bucket = %key.bucket,
            file = %key.file_name,
            "decomposed object key"
        );

        let Some(output_bucket) = state
            .config
            .output_bucket
            .as_deref()
            .filter(|b| !b.is_empty())
        else {
            error!("output bucket is not configured, cannot transcode");
            return RecordOutcome::Skipped {
                reason: SkipReason::OutputBucketMissing,
            };
        };

        let Some(definition) = state.config.transcode_definitions.first().copied() else {
            error!("no transcode definition configured, cannot transcode");
            return RecordOutcome::Skipped {
                reason: SkipReason::NoTranscodeDefinition,
            };
        };

        if output_bucket == record.cos.bucket.name {
            error!(
                bucket = %record.cos.bucket.name,
                "output bucket equals the triggering bucket, refusing to self-trigger"
            );
            return RecordOutcome::Skipped {
                reason: SkipReason::SelfTrigger,
            };
        }

        if !Self::is_video(&key, record.cos.object.content_type()) {
            return RecordOutcome::Skipped {
                reason: SkipReason::NotVideo,
            };
        }

        let output_dir = state
            .config
            .output_dir
            .clone()
            .unwrap_or_else(|| key.dir.clone());

        let request = ProcessMediaRequest {
            region: record.cos.bucket.region.clone(),
            input_bucket: record.cos.bucket.name.clone(),
            input_path: key.path.clone(),
            output_bucket: output_bucket.to_string(),
            output_dir,
            definition,
        };

        Self::submit_with_retry(state, &request).await
    }

    /// Extension match wins outright; otherwise the record counts as video
    /// iff its `Content-Type` metadata is a `video/*` media type.
    fn is_video(key: &ObjectKey, content_type: Option<&str>) -> bool {
        if VIDEO_EXTENSIONS.contains(&key.extension.as_str()) {
            return true;
        }
        content_type
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .map(|m| m.type_() == mime::VIDEO)
            .unwrap_or(false)
    }

    async fn submit_with_retry(state: &AppState, request: &ProcessMediaRequest) -> RecordOutcome {
        let policy = state.config.retry_policy();
        let mut last_error = String::new();

        for attempt in 1..=policy.max_attempts {
            match state.vod.process_media(request).await {
                Ok(result) => {
                    return RecordOutcome::Submitted {
                        task_id: result.vod_task_id,
                        attempts: attempt,
                    };
                }
                Err(e) => {
                    warn!(attempt, error = %e, path = %request.input_path, "transcode request failed");
                    last_error = e.to_string();
                    if attempt < policy.max_attempts {
                        tokio::time::sleep(policy.backoff(attempt)).await;
                    }
                }
            }
        }

        RecordOutcome::Failed {
            attempts: policy.max_attempts,
            error: last_error,
        }
    }
}
