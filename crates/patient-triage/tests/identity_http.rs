use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use patient_triage::triage::{
    HttpIdentityLookup, Identifier, IdentityError, IdentityInput, IdentityLookup,
    IdentityValidator, LookupError, PatientRecord,
};
use serde_json::json;

const API_KEY: &str = "test-subscription-key";

async fn patient_endpoint(Path(identifier): Path<String>, headers: HeaderMap) -> Response {
    let authorised = headers
        .get("Ocp-Apim-Subscription-Key")
        .and_then(|value| value.to_str().ok())
        == Some(API_KEY);
    if !authorised {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "missing subscription key" })),
        )
            .into_response();
    }

    match identifier.as_str() {
        "123456789" => Json(json!({ "name": "Smith,John", "born": "01-01-1980" })).into_response(),
        "555555555" => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        "999999999" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serves the fake identity API on a background runtime and returns its address.
fn spawn_identity_service() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    listener
        .set_nonblocking(true)
        .expect("non-blocking listener");
    let addr = listener.local_addr().expect("listener address");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("test runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            let app = Router::new().route("/patients/:identifier", get(patient_endpoint));
            axum::serve(listener, app).await.expect("test server runs");
        });
    });

    addr
}

fn client(addr: SocketAddr, api_key: &str) -> HttpIdentityLookup {
    HttpIdentityLookup::new(format!("http://{addr}/patients/"), api_key).expect("client builds")
}

fn identifier(raw: &str) -> Identifier {
    Identifier::parse(raw).expect("valid identifier")
}

#[test]
fn fetches_record_with_subscription_key() {
    let addr = spawn_identity_service();
    let lookup = client(addr, API_KEY);

    let record = lookup
        .lookup(&identifier("123456789"))
        .expect("record found");

    assert_eq!(
        record,
        PatientRecord {
            name: "Smith,John".to_string(),
            born: "01-01-1980".to_string(),
        }
    );
    assert_eq!(
        lookup.record_url(&identifier("123456789")),
        format!("http://{addr}/patients/123456789")
    );
}

#[test]
fn maps_status_codes_to_lookup_errors() {
    let addr = spawn_identity_service();
    let lookup = client(addr, API_KEY);

    assert_eq!(
        lookup.lookup(&identifier("000000001")),
        Err(LookupError::NotFound {
            identifier: "000000001".to_string()
        })
    );
    assert_eq!(
        lookup.lookup(&identifier("999999999")),
        Err(LookupError::Service {
            status: 500,
            body: "boom".to_string()
        })
    );
    assert!(matches!(
        lookup.lookup(&identifier("555555555")),
        Err(LookupError::MalformedRecord { .. })
    ));
}

#[test]
fn wrong_key_surfaces_as_service_error() {
    let addr = spawn_identity_service();
    let lookup = client(addr, "wrong-key");

    assert!(matches!(
        lookup.lookup(&identifier("123456789")),
        Err(LookupError::Service { status: 401, .. })
    ));
}

#[test]
fn unreachable_service_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);

    let lookup = client(addr, API_KEY);
    assert!(matches!(
        lookup.lookup(&identifier("123456789")),
        Err(LookupError::Transport { .. })
    ));
}

#[test]
fn validator_verifies_against_http_service() {
    let addr = spawn_identity_service();
    let validator = IdentityValidator::new(client(addr, API_KEY));
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");

    let patient = validator
        .validate(&IdentityInput::new("123456789", "Smith", "01-01-1980"), today)
        .expect("verified");
    assert_eq!(patient.age.years(), 44);

    let err = validator
        .validate(&IdentityInput::new("555555555", "Smith", "01-01-1980"), today)
        .expect_err("body is not a record");
    assert!(matches!(err, IdentityError::RecordParse { .. }));
}
