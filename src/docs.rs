use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::transcode::handler::handle_storage_event,
    ),
    components(
        schemas(
            crate::modules::transcode::model::StorageEvent,
            crate::modules::transcode::model::Record,
            crate::modules::transcode::model::CosEntity,
            crate::modules::transcode::model::CosBucket,
            crate::modules::transcode::model::CosObject,
            crate::modules::transcode::dto::BatchReport,
            crate::modules::transcode::dto::RecordReport,
            crate::modules::transcode::dto::RecordOutcome,
            crate::modules::transcode::dto::SkipReason,
        )
    ),
    tags(
        (name = "Transcode", description = "Storage event intake and transcode dispatch")
    )
)]
pub struct ApiDoc;
