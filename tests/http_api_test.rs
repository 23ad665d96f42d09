use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use consignment_service::adapters::http::{router, ApiErrorBody, AppState, HealthResponse};
use consignment_service::{
    FleetVesselLocator, InMemoryConsignmentStore, Response, ShippingService, Vessel,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    let service = ShippingService::new(InMemoryConsignmentStore::new()).with_vessel_locator(
        Arc::new(FleetVesselLocator::new(vec![Vessel {
            id: "vessel001".to_string(),
            name: "Boaty McBoatface".to_string(),
            max_weight: 200_000,
            capacity: 500,
        }])),
    );

    router(Arc::new(AppState {
        service,
        service_name: "go.micro.srv.consignment".to_string(),
        service_version: "latest".to_string(),
    }))
}

fn create_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/consignments")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_consignment(weight: i64) -> serde_json::Value {
    json!({
        "description": "This is a test consignment",
        "weight": weight,
        "containers": [
            {"customer_id": "cust001", "user_id": "user001", "origin": "Manchester, United Kingdom"}
        ]
    })
}

#[tokio::test]
async fn test_create_then_list() {
    let app = app();

    let response = app
        .clone()
        .oneshot(create_request(sample_consignment(550)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Response = body_json(response).await;
    assert!(created.created);
    let consignment = created.consignment.unwrap();
    assert_eq!(consignment.vessel_id, "vessel001");
    assert_eq!(consignment.weight, 550);

    let response = app.oneshot(get_request("/consignments")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listing: Response = body_json(response).await;
    assert!(!listing.created);
    assert_eq!(listing.consignments, vec![consignment]);
}

#[tokio::test]
async fn test_unavailable_allocation_maps_to_conflict() {
    let app = app();

    let response = app
        .clone()
        .oneshot(create_request(sample_consignment(999_999)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let error: ApiErrorBody = body_json(response).await;
    assert_eq!(error.code, "allocation_unavailable");

    let listing: Response = body_json(app.oneshot(get_request("/consignments")).await.unwrap()).await;
    assert!(listing.consignments.is_empty());
}

#[tokio::test]
async fn test_invalid_request_maps_to_bad_request() {
    let app = app();

    let response = app
        .clone()
        .oneshot(create_request(json!({"description": "empty", "weight": 10, "containers": []})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ApiErrorBody = body_json(response).await;
    assert_eq!(error.code, "invalid_request");

    let response = app
        .oneshot(create_request(sample_consignment(-5)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_store_size() {
    let app = app();
    app.clone()
        .oneshot(create_request(sample_consignment(10)))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = body_json(response).await;
    assert_eq!(health.status, "ok");
    assert_eq!(health.service, "go.micro.srv.consignment");
    assert_eq!(health.consignments, 1);
}

async fn assert_invalid_request(app: axum::Router, request: Request<Body>) {
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ApiErrorBody = body_json(response).await;
    assert_eq!(error.code, "invalid_request");
    assert!(error.message.contains("body"));
}

#[tokio::test]
async fn test_undecodable_bodies_are_invalid_requests() {
    let app = app();

    let mut non_numeric_weight = sample_consignment(0);
    non_numeric_weight["weight"] = json!("heavy");
    assert_invalid_request(app.clone(), create_request(non_numeric_weight)).await;

    assert_invalid_request(app.clone(), create_request(sample_consignment(3_000_000_000))).await;

    let not_json = Request::builder()
        .method("POST")
        .uri("/consignments")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    assert_invalid_request(app.clone(), not_json).await;

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/consignments")
        .body(Body::from(sample_consignment(10).to_string()))
        .unwrap();
    assert_invalid_request(app.clone(), no_content_type).await;

    let listing: Response = body_json(app.oneshot(get_request("/consignments")).await.unwrap()).await;
    assert!(listing.consignments.is_empty());
}
