use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{ChurchId, RatingSubmission, VisitId};
use super::rating::{RatingDescriptions, RatingResult, VisitObservation};
use super::repository::{ChurchRatingStore, RatingRepository, RepositoryError};
use super::service::{RatingServiceError, VisitRatingService};

/// Router builder exposing rating submission, lookup, and preview endpoints.
pub fn visit_rating_router<R, C>(service: Arc<VisitRatingService<R, C>>) -> Router
where
    R: RatingRepository + 'static,
    C: ChurchRatingStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/visits/:visit_id/rating",
            post(submit_handler::<R, C>).get(visit_rating_handler::<R, C>),
        )
        .route(
            "/api/v1/churches/:church_id/rating",
            get(church_rating_handler::<R, C>),
        )
        .route("/api/v1/ratings/preview", post(preview_handler::<R, C>))
        .route("/api/v1/ratings/descriptions", get(descriptions_handler))
        .with_state(service)
}

pub(crate) async fn submit_handler<R, C>(
    State(service): State<Arc<VisitRatingService<R, C>>>,
    Path(visit_id): Path<String>,
    Json(submission): Json<RatingSubmission>,
) -> Response
where
    R: RatingRepository + 'static,
    C: ChurchRatingStore + 'static,
{
    match service.submit(VisitId(visit_id), submission) {
        Ok(record) => (StatusCode::CREATED, Json(record.view())).into_response(),
        Err(RatingServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(RatingServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "visit already rated",
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn visit_rating_handler<R, C>(
    State(service): State<Arc<VisitRatingService<R, C>>>,
    Path(visit_id): Path<String>,
) -> Response
where
    R: RatingRepository + 'static,
    C: ChurchRatingStore + 'static,
{
    let id = VisitId(visit_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(RatingServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "visitId": id.0,
                "error": "visit has not been rated",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn church_rating_handler<R, C>(
    State(service): State<Arc<VisitRatingService<R, C>>>,
    Path(church_id): Path<String>,
) -> Response
where
    R: RatingRepository + 'static,
    C: ChurchRatingStore + 'static,
{
    match service.church_summary(&ChurchId(church_id)) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn preview_handler<R, C>(
    State(service): State<Arc<VisitRatingService<R, C>>>,
    Json(observation): Json<VisitObservation>,
) -> Json<RatingResult>
where
    R: RatingRepository + 'static,
    C: ChurchRatingStore + 'static,
{
    Json(service.preview(&observation))
}

pub(crate) async fn descriptions_handler() -> Json<RatingDescriptions> {
    Json(RatingDescriptions::all())
}

fn internal_error(error: RatingServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
