use serde::Serialize;
use utoipa::ToSchema;

/// Why a record ended without a transcode submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotCreatedEvent,
    MalformedKey,
    OutputBucketMissing,
    NoTranscodeDefinition,
    SelfTrigger,
    NotVideo,
}

/// Terminal state of one record.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    Skipped { reason: SkipReason },
    Submitted { task_id: String, attempts: u32 },
    Failed { attempts: u32, error: String },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordReport {
    pub key: String,
    #[serde(flatten)]
    pub outcome: RecordOutcome,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchReport {
    pub total: usize,
    pub submitted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub records: Vec<RecordReport>,
}

impl BatchReport {
    pub fn from_records(records: Vec<RecordReport>) -> Self {
        let mut submitted = 0;
        let mut skipped = 0;
        let mut failed = 0;
        for report in &records {
            match report.outcome {
                RecordOutcome::Skipped { .. } => skipped += 1,
                RecordOutcome::Submitted { .. } => submitted += 1,
                RecordOutcome::Failed { .. } => failed += 1,
            }
        }
        Self {
            total: records.len(),
            submitted,
            skipped,
            failed,
            records,
        }
    }
}
