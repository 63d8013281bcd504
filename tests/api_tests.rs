//! Integration tests for the HTTP surface.
//!
//! Each test builds the real router over an in-memory store, registers users,
//! assigns roles and drives the endpoints end to end with `oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use angaza_backend::{
    config::AppState,
    routes::create_router,
    store::{DocumentStore, MemoryStore},
};

fn setup_app() -> (Router, AppState) {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let state = AppState::with_store(store, "test-secret".to_string());
    (create_router(state.clone()), state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers an account and, when given, stamps a role onto the user document
/// the way an administrator screen would.
async fn register_user(app: &Router, state: &AppState, email: &str, role: Option<&str>) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": email, "password": "secret123", "name": "Test User" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    if let Some(role) = role {
        let user = state.user_repo.find_by_email(email).await.unwrap().unwrap();
        state.user_repo.set_role(user.id, role).await.unwrap();
    }
    token
}

#[tokio::test]
async fn health_is_public() {
    let (app, _state) = setup_app();
    let response = app.oneshot(request("GET", "/api/health", None, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_requires_a_token() {
    let (app, _state) = setup_app();
    let response = app.oneshot(request("GET", "/api/users/me", None, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_me_round_trip() {
    let (app, _state) = setup_app();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": "asha@angaza.org", "password": "secret123", "name": "Asha" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The same e-mail cannot register twice.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": "asha@angaza.org", "password": "secret123", "name": "Asha" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // A wrong password is rejected.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "asha@angaza.org", "password": "wrong-pass" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "asha@angaza.org", "password": "secret123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request("GET", "/api/users/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["email"], json!("asha@angaza.org"));
    assert!(me["role"].is_null());
    assert!(me.get("passwordHash").is_none());
}

#[tokio::test]
async fn users_without_a_role_are_blocked_from_gated_areas() {
    let (app, state) = setup_app();
    let token = register_user(&app, &state, "newcomer@angaza.org", None).await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/resources", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Public routes stay reachable.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/access/route?path=/dashboard", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["allowed"], json!(true));

    let response = app
        .oneshot(request("GET", "/api/access/route?path=/resources", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["allowed"], json!(false));
}

#[tokio::test]
async fn inventory_flow_records_distributions_and_guards_stock() {
    let (app, state) = setup_app();
    let admin = register_user(&app, &state, "admin@angaza.org", Some("system admin")).await;

    // Category setup; the duplicate is rejected.
    let response = app
        .clone()
        .oneshot(request("POST", "/api/categories", Some(&admin), Some(json!({ "name": "Seeds" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let category_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request("POST", "/api/categories", Some(&admin), Some(json!({ "name": "seeds" }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // A resource with ten bags in stock.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/resources",
            Some(&admin),
            Some(json!({
                "name": "Maize seed",
                "category": "Seeds",
                "quantity": 10,
                "unit": "bags",
                "unitValue": 12.5,
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let resource = body_json(response).await;
    let resource_id = resource["id"].as_str().unwrap().to_string();
    assert_eq!(resource["quantity"], json!(10));

    // Handing out four bags decrements the stock to six.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/distributions",
            Some(&admin),
            Some(json!({
                "resourceId": resource_id,
                "quantity": 4,
                "recipient": "Kibera relief point",
                "location": "Nairobi",
                "date": "2026-08-06",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let distribution = body_json(response).await;
    assert_eq!(distribution["status"], json!("pending"));
    assert_eq!(distribution["quantity"], json!(4));
    assert_eq!(distribution["resourceName"], json!("Maize seed"));
    assert_eq!(distribution["totalValue"], json!(50.0));
    assert_eq!(distribution["date"], json!("2026-08-06"));

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/resources/{resource_id}"), Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["quantity"], json!(6));

    // Overshooting the stock is a conflict and changes nothing.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/distributions",
            Some(&admin),
            Some(json!({
                "resourceId": resource_id,
                "quantity": 100,
                "recipient": "Camp B",
                "location": "Kisumu",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Zero quantity fails validation outright.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/distributions",
            Some(&admin),
            Some(json!({
                "resourceId": resource_id,
                "quantity": 0,
                "recipient": "Camp B",
                "location": "Kisumu",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/resources/{resource_id}"), Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["quantity"], json!(6));

    // Aggregates see the one handout.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/distributions/stats", Some(&admin), None))
        .await
        .unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["totalDistributions"], json!(1));
    assert_eq!(stats["quantitiesDistributed"], json!(4));
    assert_eq!(stats["pendingDistributions"], json!(1));

    let response = app
        .clone()
        .oneshot(request("GET", "/api/categories/stats", Some(&admin), None))
        .await
        .unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats[0]["category"], json!("Seeds"));
    assert_eq!(stats[0]["usedQuantity"], json!(4));
    // The fold runs over current stock: 6 bags remain, 4 went out,
    // remaining = max(0, 6 - 4) and usage = round(100 * 4 / 6).
    assert_eq!(stats[0]["totalQuantity"], json!(6));
    assert_eq!(stats[0]["remainingQuantity"], json!(2));
    assert_eq!(stats[0]["usagePercent"], json!(67));

    // The category is in use, so it cannot be deleted.
    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/api/categories/{category_id}"), Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Six bags sit under the default low-stock threshold.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/resources/low-stock", Some(&admin), None))
        .await
        .unwrap();
    let low = body_json(response).await;
    assert_eq!(low.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(request("GET", "/api/dashboard/summary", Some(&admin), None))
        .await
        .unwrap();
    let summary = body_json(response).await;
    assert_eq!(summary["totalResources"], json!(1));
    assert_eq!(summary["pendingDistributions"], json!(1));
    assert_eq!(summary["lowStockResources"], json!(1));
    assert_eq!(summary["outOfStockResources"], json!(0));

    // Every mutation above left an audit entry.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/audit-logs", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let logs = body_json(response).await;
    assert!(logs.as_array().unwrap().len() >= 3);
}

#[tokio::test]
async fn board_members_see_finance_but_not_operations() {
    let (app, state) = setup_app();
    let board = register_user(&app, &state, "board@angaza.org", Some("board")).await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/resources", Some(&board), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request("GET", "/api/audit-logs", Some(&board), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request("GET", "/api/access/areas", Some(&board), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], json!("board"));
    let areas = body["areas"].as_array().unwrap();
    assert!(areas.contains(&json!("finance")));
    assert!(!areas.contains(&json!("admin")));

    let response = app
        .clone()
        .oneshot(request("GET", "/api/access/route?path=/admin", Some(&board), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["allowed"], json!(false));

    let response = app
        .oneshot(request("GET", "/api/access/route?path=/dashboard", Some(&board), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["allowed"], json!(true));
}

#[tokio::test]
async fn registry_collections_validate_and_round_trip() {
    let (app, state) = setup_app();
    let admin = register_user(&app, &state, "ops@angaza.org", Some("system admin")).await;

    // The name is the one structural requirement.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/records/beneficiaries",
            Some(&admin),
            Some(json!({ "village": "Kitui" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/records/beneficiaries",
            Some(&admin),
            Some(json!({ "name": "Amina Odhiambo", "village": "Kitui" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = body_json(response).await;
    let record_id = record["id"].as_str().unwrap().to_string();
    assert_eq!(record["village"], json!("Kitui"));
    assert!(record["createdAt"].is_string());

    let response = app
        .clone()
        .oneshot(request("GET", "/api/records/beneficiaries", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/records/beneficiaries/{record_id}"),
            Some(&admin),
            Some(json!({ "village": "Machakos" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["village"], json!("Machakos"));
    assert_eq!(updated["name"], json!("Amina Odhiambo"));

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/records/beneficiaries/{record_id}"),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/records/beneficiaries/{record_id}"),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Collections outside the registry whitelist do not exist.
    let response = app
        .oneshot(request("GET", "/api/records/secrets", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn role_assignment_opens_the_matching_areas() {
    let (app, state) = setup_app();
    let admin = register_user(&app, &state, "root@angaza.org", Some("system admin")).await;
    let officer_token = register_user(&app, &state, "officer@angaza.org", None).await;

    let officer = state.user_repo.find_by_email("officer@angaza.org").await.unwrap().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/users/{}/role", officer.id),
            Some(&admin),
            Some(json!({ "role": "field officer" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"], json!("field officer"));

    // Field officers work with beneficiaries but not with the stock screens.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/records/beneficiaries", Some(&officer_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request("GET", "/api/resources", Some(&officer_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Ordinary users cannot hand out roles.
    let response = app
        .oneshot(request(
            "PUT",
            &format!("/api/users/{}/role", officer.id),
            Some(&officer_token),
            Some(json!({ "role": "system admin" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
