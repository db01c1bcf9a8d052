use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use passenger_api::{server::build_router, IdPolicy, QueryEngine};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const DATA: &str = "survived,pclass,sex,age,fare,embarked
1,1,female,29.0,211.3,S
0,3,male,22.0,7.25,S
1,3,female,26.0,7.92,C
";

fn router(policy: IdPolicy) -> Router {
    let engine = QueryEngine::from_reader(DATA.as_bytes(), policy).unwrap();
    build_router(Arc::new(engine))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn row(survived: u8, pclass: u8, sex: &str, age: f64, fare: f64, embarked: &str) -> Value {
    json!({
        "survived": survived,
        "pclass": pclass,
        "sex": sex,
        "age": age,
        "fare": fare,
        "embarked": embarked,
    })
}

#[tokio::test]
async fn test_list_passengers() {
    let app = router(IdPolicy::None);
    let (status, body) = get(&app, "/api/passengers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "passengers": [
                row(1, 1, "female", 29.0, 211.3, "S"),
                row(0, 3, "male", 22.0, 7.25, "S"),
                row(1, 3, "female", 26.0, 7.92, "C"),
            ]
        })
    );
}

#[tokio::test]
async fn test_filter_by_class() {
    let app = router(IdPolicy::None);
    let (status, body) = get(&app, "/api/passengers/class/3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["passengers"],
        json!([
            row(0, 3, "male", 22.0, 7.25, "S"),
            row(1, 3, "female", 26.0, 7.92, "C"),
        ])
    );

    let (status, body) = get(&app, "/api/passengers/class/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "passengers": [] }));
}

#[tokio::test]
async fn test_filter_by_survival() {
    let app = router(IdPolicy::None);
    let (status, body) = get(&app, "/api/passengers/survived/1").await;

    assert_eq!(status, StatusCode::OK);
    let sexes: Vec<_> = body["passengers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["sex"].as_str().unwrap())
        .collect();
    assert_eq!(sexes, vec!["female", "female"]);
}

#[tokio::test]
async fn test_invalid_enumerations() {
    let app = router(IdPolicy::None);

    for uri in ["/api/passengers/survived/2", "/api/passengers/survived/-1"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            body,
            json!({
                "error": "Bad request",
                "message": "Invalid survival status. Use 1 for survived and 0 for not survived",
            })
        );
    }

    for uri in ["/api/passengers/class/0", "/api/passengers/class/4"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Bad request");
        assert_eq!(
            body["message"],
            "Invalid class. Use 1, 2, or 3 for passenger class"
        );
    }
}

#[tokio::test]
async fn test_get_by_id_not_found() {
    let app = router(IdPolicy::None);
    let (status, body) = get(&app, "/api/passengers/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "error": "Not found",
            "message": "Passenger with ID 999 not found",
        })
    );

    // the file carries no identifiers, so even position 1 misses
    let (status, _) = get(&app, "/api/passengers/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_by_id_positional() {
    let app = router(IdPolicy::Positional);
    let (status, body) = get(&app, "/api/passengers/2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passenger"]["passenger_id"], 2);
    assert_eq!(body["passenger"]["sex"], "male");

    let (status, _) = get(&app, "/api/passengers/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_routes() {
    let app = router(IdPolicy::None);

    for uri in [
        "/api/passengers/abc",
        "/api/passengers/survived/yes",
        "/api/passengers/class/first",
        "/api/people",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"], "Not found");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("The requested URL was not found"));
    }
}

#[tokio::test]
async fn test_health() {
    let app = router(IdPolicy::None);
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["passengers"], 3);
}

#[tokio::test]
async fn test_oversized_integers() {
    let app = router(IdPolicy::Positional);

    let (status, body) = get(&app, "/api/passengers/survived/99999999999999999999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Bad request",
            "message": "Invalid survival status. Use 1 for survived and 0 for not survived",
        })
    );

    let (status, body) = get(&app, "/api/passengers/class/99999999999999999999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "error": "Bad request",
            "message": "Invalid class. Use 1, 2, or 3 for passenger class",
        })
    );

    let (status, body) = get(&app, "/api/passengers/class/-99999999999999999999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request");

    let (status, body) = get(&app, "/api/passengers/99999999999999999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "error": "Not found",
            "message": "Passenger with ID 99999999999999999999 not found",
        })
    );
}

#[tokio::test]
async fn test_signed_segments() {
    let app = router(IdPolicy::Positional);

    // only a leading minus counts as part of an integer
    for uri in [
        "/api/passengers/survived/+1",
        "/api/passengers/class/+3",
        "/api/passengers/+2",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("The requested URL was not found"));
    }
}
