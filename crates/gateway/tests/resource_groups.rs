mod common;

use std::sync::Arc;

use auditdesk_auth::{
    Credential, CredentialStore, LoginRequest, MemoryCredentialStore, RegisterRequest,
};
use auditdesk_core::RecordId;
use auditdesk_gateway::{GatewayError, MultipartPayload};
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::StubBackend;

fn id(n: i64) -> RecordId {
    RecordId::new(n)
}

/// Assert the last request the stub saw.
fn assert_last(srv: &StubBackend, method: Method, path: &str) {
    let req = srv.last_request();
    assert_eq!((req.method.clone(), req.path.as_str()), (method, path));
}

#[tokio::test]
async fn events_group_maps_to_event_endpoints() {
    let srv = StubBackend::ok().await;
    let gw = srv.anonymous_gateway();
    let events = gw.events();

    events.list().await.unwrap();
    assert_last(&srv, Method::GET, "/api/events");

    events.create(&json!({ "name": "Q3 audit" })).await.unwrap();
    assert_last(&srv, Method::POST, "/api/events/add");
    assert_eq!(srv.last_request().json(), json!({ "name": "Q3 audit" }));

    let renamed = json!({ "name": "Q4 audit" });
    events.update(id(4), &renamed).await.unwrap();
    assert_last(&srv, Method::PUT, "/api/events/update/4");
}

#[tokio::test]
async fn offices_group_maps_to_office_endpoints() {
    let srv = StubBackend::ok().await;
    let gw = srv.anonymous_gateway();
    let offices = gw.offices();

    offices.list().await.unwrap();
    assert_last(&srv, Method::GET, "/api/offices");

    let office = json!({ "name": "Registrar" });
    offices.create(&office).await.unwrap();
    assert_last(&srv, Method::POST, "/api/offices");

    let renamed = json!({ "name": "Registrar's Office" });
    offices.update(id(8), &renamed).await.unwrap();
    assert_last(&srv, Method::PUT, "/api/offices/8");

    offices.delete(id(8)).await.unwrap();
    assert_last(&srv, Method::DELETE, "/api/offices/8");
}

#[tokio::test]
async fn office_types_group_maps_to_officestypes_endpoints() {
    let srv = StubBackend::ok().await;
    let gw = srv.anonymous_gateway();
    let types = gw.office_types();

    types.list().await.unwrap();
    assert_last(&srv, Method::GET, "/api/officestypes");

    types.create(&json!({ "type": "Academic" })).await.unwrap();
    assert_last(&srv, Method::POST, "/api/officestypes");

    types.get(id(2)).await.unwrap();
    assert_last(&srv, Method::GET, "/api/officestypes/2");

    let renamed = json!({ "type": "Administrative" });
    types.update(id(2), &renamed).await.unwrap();
    assert_last(&srv, Method::PUT, "/api/officestypes/2");

    types.delete(id(2)).await.unwrap();
    assert_last(&srv, Method::DELETE, "/api/officestypes/2");
}

#[tokio::test]
async fn office_heads_group_maps_to_officeheads_endpoints() {
    let srv = StubBackend::ok().await;
    let gw = srv.anonymous_gateway();
    let heads = gw.office_heads();

    heads.list().await.unwrap();
    assert_last(&srv, Method::GET, "/api/officeheads/all");

    heads.get(id(12)).await.unwrap();
    assert_last(&srv, Method::GET, "/api/officeheads/12");

    heads
        .update(id(12), MultipartPayload::new().text("name", "Dr. Cruz"))
        .await
        .unwrap();
    assert_last(&srv, Method::PUT, "/api/officeheads/update/12");
    assert!(
        srv.last_request()
            .header("content-type")
            .unwrap()
            .starts_with("multipart/form-data")
    );

    heads.delete_many(&[id(1), id(2)]).await.unwrap();
    assert_last(&srv, Method::DELETE, "/api/officeheads/delete");
    assert_eq!(srv.requests().len(), 4, "no fallback after a success");
}

#[tokio::test]
async fn requirements_group_maps_to_requirement_endpoints() {
    let srv = StubBackend::ok().await;
    let gw = srv.anonymous_gateway();
    let reqs = gw.requirements();

    reqs.list().await.unwrap();
    assert_last(&srv, Method::GET, "/api/requirements/all");

    reqs.criteria(None).await.unwrap();
    assert_last(&srv, Method::GET, "/api/requirements/criteria");

    reqs.criteria(Some(id(6))).await.unwrap();
    assert_last(&srv, Method::GET, "/api/requirements/criteria/event/6");

    reqs.for_event(id(6)).await.unwrap();
    assert_last(&srv, Method::GET, "/api/requirements/event/6");

    let requirement = json!({ "title": "Annual report" });
    reqs.create(&requirement).await.unwrap();
    assert_last(&srv, Method::POST, "/api/requirements/add");

    let revised = json!({ "title": "Annual report v2" });
    reqs.update(id(9), &revised).await.unwrap();
    assert_last(&srv, Method::PUT, "/api/requirements/update/9");

    reqs.delete_many(&[id(9), id(10)]).await.unwrap();
    assert_last(&srv, Method::POST, "/api/requirements/delete");
    assert_eq!(
        srv.last_request().json(),
        json!({ "requirementIds": [9, 10] })
    );
}

#[tokio::test]
async fn users_group_maps_to_user_endpoints() {
    let srv = StubBackend::ok().await;
    let gw = srv.anonymous_gateway();

    gw.users().list().await.unwrap();
    assert_last(&srv, Method::GET, "/api/user");

    gw.users().current("ana@example.org").await.unwrap();
    assert_last(&srv, Method::GET, "/api/user/current/ana@example.org");

    let err = gw.users().current("  ").await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidRequest(_)));
}

#[tokio::test]
async fn login_stores_token_and_later_calls_use_it() {
    let srv = StubBackend::spawn(|req| {
        if req.path == "/api/auth/login" {
            let user = json!({ "email": "ana@example.org" });
            (
                StatusCode::OK,
                json!({ "success": true, "token": "fresh-jwt", "user": user }),
            )
        } else {
            (StatusCode::OK, json!({ "success": true }))
        }
    })
    .await;
    let store = Arc::new(MemoryCredentialStore::new());
    let gw = srv.gateway(store.clone());

    let envelope = gw
        .auth()
        .login(&LoginRequest::new("ana@example.org", "pw"))
        .await
        .unwrap();
    assert_eq!(envelope.user().unwrap()["email"], "ana@example.org");

    let login = srv.last_request();
    assert_eq!(login.method, Method::POST);
    assert_eq!(
        login.json(),
        json!({ "email": "ana@example.org", "password": "pw" })
    );
    assert!(login.header("authorization").is_none());

    assert_eq!(store.load(), Some(Credential::new("fresh-jwt").unwrap()));

    gw.events().list().await.unwrap();
    assert_eq!(
        srv.last_request().header("authorization"),
        Some("Bearer fresh-jwt")
    );
}

#[tokio::test]
async fn unsuccessful_login_stores_nothing() {
    let srv = StubBackend::spawn(|_| {
        (
            StatusCode::OK,
            json!({ "success": false, "message": "Wrong password", "token": "x" }),
        )
    })
    .await;
    let store = Arc::new(MemoryCredentialStore::new());
    let gw = srv.gateway(store.clone());

    let envelope = gw
        .auth()
        .login(&LoginRequest::new("ana@example.org", "bad"))
        .await
        .unwrap();
    assert_eq!(envelope.success(), Some(false));
    assert!(store.load().is_none());
}

#[tokio::test]
async fn register_posts_profile() {
    let srv = StubBackend::ok().await;
    let gw = srv.anonymous_gateway();

    gw.auth()
        .register(&RegisterRequest::new("Ana", "ana@example.org", "pw").with_field("role", "staff"))
        .await
        .unwrap();

    assert_last(&srv, Method::POST, "/api/auth/register");
    assert_eq!(srv.last_request().json()["role"], "staff");
}

#[tokio::test]
async fn logout_clears_credential_even_when_the_call_fails() {
    let srv = StubBackend::spawn(|_| (StatusCode::INTERNAL_SERVER_ERROR, json!({}))).await;
    let store = Arc::new(MemoryCredentialStore::with_credential(Credential::new("t").unwrap()));
    let gw = srv.gateway(store.clone());

    let err = gw.auth().logout().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_last(&srv, Method::POST, "/api/auth/logout");
    assert_eq!(srv.last_request().header("authorization"), Some("Bearer t"));
    assert!(store.load().is_none());
}

#[tokio::test]
async fn health_check_hits_root_path() {
    let srv = StubBackend::spawn(|_| (StatusCode::OK, json!({ "status": "ok" }))).await;
    let gw = srv.anonymous_gateway();

    let envelope = gw.health().check().await.unwrap();
    assert_eq!(envelope.get("status").unwrap(), "ok");
    assert_last(&srv, Method::GET, "/health");
}
