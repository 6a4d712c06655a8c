use crate::common::response::{ApiResponse, ApiSuccess};
use crate::modules::transcode::dto::BatchReport;
use crate::modules::transcode::model::StorageEvent;
use crate::modules::transcode::service::TranscodeService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

#[utoipa::path(
    post,
    path = "/api/v1/transcode/events",
    request_body = StorageEvent,
    responses(
        (status = 200, description = "Batch processed, per-record outcomes inside", body = ApiResponse<BatchReport>),
        (status = 422, description = "Malformed event payload")
    ),
    tag = "Transcode"
)]
pub async fn handle_storage_event(
    State(state): State<AppState>,
    Json(event): Json<StorageEvent>,
) -> impl IntoResponse {
    let report = TranscodeService::handle_event(&state, event).await;
    ApiSuccess(
        ApiResponse::success(report, "Batch processed"),
        StatusCode::OK,
    )
    .into_response()
}
