//! HTTP surface tests through the full router

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use homeservices_backend::app::{create_app, AppState};
use homeservices_backend::config::Settings;
use homeservices_backend::domain::NewClient;
use homeservices_backend::services::{FixedClock, Marketplace, MarketplaceConfig};

fn build_test_router() -> Router {
    let clock = Arc::new(FixedClock::new(common::start_time()));
    let mut market = Marketplace::new(MarketplaceConfig::default(), clock);
    market
        .register_client(NewClient {
            full_name: "Cliente de Teste".to_string(),
            email: "cliente@teste.com".to_string(),
            phone: String::new(),
            address: String::new(),
        })
        .unwrap();
    market
        .register_professional(common::new_professional(
            "Profissional de Teste",
            "profissional@teste.com",
            Some("profissional@teste.com"),
        ))
        .unwrap();

    create_app(AppState::new(market.into_shared(), Settings::for_tests()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn login(app: &Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "senha123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["expires_in"],
        json!(Settings::for_tests().token_ttl_seconds)
    );
    (
        body["data"]["access_token"].as_str().unwrap().to_string(),
        body["data"]["user_id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn health_is_public() {
    let app = build_test_router();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email() {
    let app = build_test_router();
    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "cliente@teste.com", "password": "errada" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "ninguem@teste.com", "password": "senha123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = build_test_router();
    let (status, body) = send(&app, Method::GET, "/quotes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn quote_flow_over_http() {
    let app = build_test_router();
    let (client_token, _) = login(&app, "cliente@teste.com").await;
    let (pro_token, pro_id) = login(&app, "profissional@teste.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/quotes",
        Some(&client_token),
        Some(json!({ "professional_id": pro_id, "message": "leak" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    let quote_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/quotes/{}/offers", quote_id),
        Some(&pro_token),
        Some(json!({
            "kind": "priced",
            "description": "Troca do cano",
            "labor_cost": "100",
            "materials": [{ "name": "pipe", "price": "20" }],
            "visit_date": "2024-01-10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "answered");
    assert_eq!(body["data"]["messages"][1]["kind"], "priced_offer");
    assert_eq!(body["data"]["messages"][1]["details"]["total"], "120");

    let (_, body) = send(&app, Method::GET, "/me/offers", Some(&client_token), None).await;
    assert_eq!(body["data"]["has_new_offers"], true);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/quotes/{}/accept", quote_id),
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/quotes/{}/schedule", quote_id),
        Some(&client_token),
        Some(json!({ "date": "2024-01-10", "time": "09:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "scheduled");
    assert_eq!(body["data"]["scheduled_visit"], "10/01/2024 às 09:00");

    let (status, body) = send(
        &app,
        Method::GET,
        "/notifications/unread-count",
        Some(&pro_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // quote received, offer accepted, visit scheduled
    assert_eq!(body["data"]["count"], 3);
}

#[tokio::test]
async fn illegal_transition_maps_to_conflict() {
    let app = build_test_router();
    let (client_token, _) = login(&app, "cliente@teste.com").await;
    let (_, pro_id) = login(&app, "profissional@teste.com").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/quotes",
        Some(&client_token),
        Some(json!({ "professional_id": pro_id, "message": "leak" })),
    )
    .await;
    let quote_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/quotes/{}/accept", quote_id),
        Some(&client_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ILLEGAL_TRANSITION");
}

#[tokio::test]
async fn professional_cannot_create_quotes() {
    let app = build_test_router();
    let (pro_token, pro_id) = login(&app, "profissional@teste.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/quotes",
        Some(&pro_token),
        Some(json!({ "professional_id": pro_id, "message": "eu mesmo" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admin_login_and_reasons() {
    let app = build_test_router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "email": "admin@teste.com", "password": "senha123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");

    let (status, body) = send(&app, Method::GET, "/denunciations/reasons", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn professionals_listing_is_paginated() {
    let app = build_test_router();
    let (status, body) = send(
        &app,
        Method::GET,
        "/professionals?per_page=10",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["data"][0]["full_name"], "Profissional de Teste");
}
