use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use haven_service::{ListingsPage, Role, SearchListingsRequest, Viewer};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/listings", get(listings))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// Caller identity is resolved by the upstream gateway and forwarded as plain
/// query parameters alongside the filters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListingsQuery {
	#[serde(flatten)]
	request: SearchListingsRequest,
	role: Option<String>,
	user_id: Option<String>,
	agency_id: Option<String>,
}
impl ListingsQuery {
	fn viewer(&self) -> Viewer {
		Viewer {
			role: self.role.as_deref().map(Role::parse).unwrap_or_default(),
			user_id: self.user_id.as_deref().and_then(|raw| Uuid::parse_str(raw).ok()),
			agency_id: self.agency_id.as_deref().and_then(|raw| Uuid::parse_str(raw).ok()),
		}
	}
}

async fn listings(
	State(state): State<AppState>,
	Query(query): Query<ListingsQuery>,
) -> Result<Json<ListingsPage>, ApiError> {
	let viewer = query.viewer();
	let page = state.service.search_listings(&query.request, &viewer).await?;

	Ok(Json(page))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	details: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error: String,
	details: String,
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error: self.error, details: self.details };

		(self.status, Json(body)).into_response()
	}
}
impl From<haven_service::Error> for ApiError {
	fn from(err: haven_service::Error) -> Self {
		tracing::error!(error = %err, "Listings search failed.");

		Self {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			error: "Failed to fetch listings.".to_string(),
			details: err.to_string(),
		}
	}
}
