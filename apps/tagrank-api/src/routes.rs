use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use tagrank_service::{Error as ServiceError, TopPeopleRequest, TopPeopleResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/top-people", post(top_people))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn top_people(
	State(state): State<AppState>,
	payload: Result<Json<TopPeopleRequest>, JsonRejection>,
) -> Result<Json<TopPeopleResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.top_people(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		tracing::info!(status = %rejection.status(), "Rejected malformed request body.");

		ApiError::new(rejection.status(), "invalid_request", rejection.body_text())
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::Connectivity { message } => ApiError::new(
				StatusCode::SERVICE_UNAVAILABLE,
				"store_unavailable",
				format!("Store unavailable: {message}"),
			),
			ServiceError::Query { message } => ApiError::new(
				StatusCode::INTERNAL_SERVER_ERROR,
				"store_query_failed",
				format!("Store query failed: {message}"),
			),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
