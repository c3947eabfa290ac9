use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use haven_api::{routes, state::AppState};
use haven_config::{Config, Postgres, Search, Service, Storage};
use haven_testkit::TestDatabase;

fn test_config(dsn: String) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 1 } },
		search: Search::default(),
	}
}

async fn app_with_schema(test_db: &TestDatabase) -> (axum::Router, AppState) {
	let state = AppState::new(test_config(test_db.dsn().to_string()))
		.await
		.expect("Failed to build app state.");

	(routes::router(state.clone()), state)
}

async fn json_body(response: axum::response::Response) -> Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Response body was not JSON.")
}

#[tokio::test]
async fn listings_failure_surfaces_as_generic_500() {
	// A lazy pool defers connecting until the first query, so the search
	// itself fails without any Postgres around.
	let pool = sqlx::postgres::PgPool::connect_lazy("postgres://haven@127.0.0.1:1/haven")
		.expect("Failed to create lazy pool.");
	let service = haven_service::ListingService::new(
		test_config("postgres://haven@127.0.0.1:1/haven".to_string()),
		haven_storage::db::Db { pool },
	);
	let app = routes::router(AppState { service: std::sync::Arc::new(service) });
	let response = app
		.oneshot(Request::builder().uri("/v1/listings").body(Body::empty()).unwrap())
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

	let body = json_body(response).await;

	assert_eq!(body["error"], "Failed to fetch listings.");
	assert!(body["details"].is_string());
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set HAVEN_PG_DSN to run."]
async fn health_returns_ok() {
	let Some(base_dsn) = haven_testkit::env_dsn() else {
		eprintln!("Skipping health_returns_ok; set HAVEN_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let (app, _state) = app_with_schema(&test_db).await;
	let response = app
		.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set HAVEN_PG_DSN to run."]
async fn listings_returns_page_envelope() {
	let Some(base_dsn) = haven_testkit::env_dsn() else {
		eprintln!("Skipping listings_returns_page_envelope; set HAVEN_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let (app, state) = app_with_schema(&test_db).await;

	sqlx::query(
		"\
INSERT INTO listings (title, description, price, purchase_category, property_type, bedrooms, location, state, status)
VALUES
	('3 Bedroom Flat', 'Flat in Lekki Phase 1', 45000000, 'Sale', 'Apartment', 3, 'Lekki', 'Lagos', 'available'),
	('Sold Duplex', 'Duplex in Ikeja', 90000000, 'Sale', 'Duplex', 4, 'Ikeja', 'Lagos', 'sold')",
	)
	.execute(&state.service.db.pool)
	.await
	.expect("Failed to seed listings.");

	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/listings?search=3%20bedroom%20flat%20in%20Lekki&role=client")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let body = json_body(response).await;

	assert_eq!(body["total"], 1);
	assert_eq!(body["totalPages"], 1);
	assert_eq!(body["currentPage"], 1);
	assert_eq!(body["listings"][0]["title"], "3 Bedroom Flat");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set HAVEN_PG_DSN to run."]
async fn invalid_page_parameter_falls_back_to_first_page() {
	let Some(base_dsn) = haven_testkit::env_dsn() else {
		eprintln!(
			"Skipping invalid_page_parameter_falls_back_to_first_page; set HAVEN_PG_DSN to run."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let (app, _state) = app_with_schema(&test_db).await;
	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/listings?page=abc&limit=0")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let body = json_body(response).await;

	assert_eq!(body["currentPage"], 1);
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
