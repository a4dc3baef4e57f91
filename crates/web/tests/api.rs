use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use model::track::{GeoPoint, ParsedTrack};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracks::{
    resolver::TrackInfoResolver, source::TrackSource, store::TrackStore, RequestError,
    RequestResult,
};
use utility::geo::distance;
use web::{app, WebState};

const TRACK_A: &str = "http://example.com/a.igc";
const TRACK_B: &str = "http://example.com/b.igc";
const SLOW_TRACK: &str = "http://example.com/slow.igc";

struct FakeSource {
    tracks: HashMap<&'static str, ParsedTrack>,
}

#[async_trait]
impl TrackSource for FakeSource {
    async fn fetch_track(&self, url: &str) -> RequestResult<ParsedTrack> {
        if url == SLOW_TRACK {
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
        self.tracks
            .get(url)
            .cloned()
            .ok_or_else(|| RequestError::ParseError(format!("nothing at {}", url)))
    }
}

fn equator_track() -> ParsedTrack {
    ParsedTrack {
        date: NaiveDate::from_ymd_opt(2016, 2, 19).unwrap(),
        pilot: "Miguel Angel Gordillo".to_owned(),
        glider_type: "RV8".to_owned(),
        glider_id: "EC-XLL".to_owned(),
        points: vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 2.0),
        ],
    }
}

fn test_app() -> Router {
    let source = FakeSource {
        tracks: HashMap::from([(TRACK_A, equator_track())]),
    };
    let resolver =
        TrackInfoResolver::new(TrackStore::new(), source, Duration::from_millis(200));
    app(WebState::new(resolver))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn submit(app: &Router, url: &str) -> (StatusCode, Value) {
    let body = json!({ "url": url }).to_string();
    send(app, Method::POST, "/api/track", Some(&body)).await
}

#[tokio::test]
async fn service_info() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"], "Service for IGC tracks.");
    assert_eq!(body["version"], "v1");
    let uptime = body["uptime"].as_str().unwrap();
    assert_eq!(uptime.split(':').count(), 3);
}

#[tokio::test]
async fn submissions_get_sequential_ids() {
    let app = test_app();
    assert_eq!(send(&app, Method::GET, "/api/track", None).await.1, json!([]));

    assert_eq!(submit(&app, TRACK_A).await, (StatusCode::OK, json!({ "id": 0 })));
    assert_eq!(submit(&app, TRACK_B).await, (StatusCode::OK, json!({ "id": 1 })));

    let (status, body) = send(&app, Method::GET, "/api/track", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([0, 1]));
}

#[tokio::test]
async fn malformed_submission_is_rejected_without_using_an_id() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/api/track", Some("{\"url\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "malformedRequest");

    let (status, body) = send(&app, Method::POST, "/api/track", Some("{\"link\":\"x\"}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "malformedRequest");

    assert_eq!(submit(&app, TRACK_A).await.1, json!({ "id": 0 }));
}

#[tokio::test]
async fn track_summary() {
    let app = test_app();
    submit(&app, TRACK_A).await;

    let (status, body) = send(&app, Method::GET, "/api/track/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["h_date"], "2016-02-19");
    assert_eq!(body["pilot"], "Miguel Angel Gordillo");
    assert_eq!(body["glider"], "RV8");
    assert_eq!(body["glider_id"], "EC-XLL");

    let expected = distance(&(0.0, 0.0), &(0.0, 1.0)) + distance(&(0.0, 1.0), &(0.0, 2.0));
    let length = body["track_length"].as_f64().unwrap();
    assert!((length - expected).abs() < 1e-6);
}

#[tokio::test]
async fn single_fields_match_the_summary() {
    let app = test_app();
    submit(&app, TRACK_A).await;
    let (_, summary) = send(&app, Method::GET, "/api/track/0", None).await;

    for field in ["pilot", "glider", "glider_id", "track_length", "h_date"] {
        let (status, value) =
            send(&app, Method::GET, &format!("/api/track/0/{}", field), None).await;
        assert_eq!(status, StatusCode::OK, "field {}", field);
        assert_eq!(value, summary[field], "field {}", field);
    }
}

#[tokio::test]
async fn unknown_field() {
    let app = test_app();
    submit(&app, TRACK_A).await;
    let (status, body) = send(&app, Method::GET, "/api/track/0/bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "unknownField");
    assert_eq!(body["requestedUri"], "/api/track/0/bogus");
}

#[tokio::test]
async fn bad_ids() {
    let app = test_app();
    submit(&app, TRACK_A).await;

    let (status, body) = send(&app, Method::GET, "/api/track/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "notFound");

    let (status, body) = send(&app, Method::GET, "/api/track/-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalidId");

    let (status, body) = send(&app, Method::GET, "/api/track/abc/pilot", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalidId");

    let (status, body) = send(&app, Method::GET, "/api/track/99/pilot", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "notFound");

    // larger than any index, but still a well formed id
    let (status, body) =
        send(&app, Method::GET, "/api/track/99999999999999999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "notFound");
}

#[tokio::test]
async fn undecodable_ids() {
    let app = test_app();
    submit(&app, TRACK_A).await;

    for uri in ["/api/track/%FF", "/api/track/%FF/pilot"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["kind"], "invalidId", "{}", uri);
        assert!(body["detailedInformation"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn unsupported_methods() {
    let app = test_app();
    for (method, uri) in [
        (Method::DELETE, "/api/track"),
        (Method::PUT, "/api/track/0"),
        (Method::POST, "/api/track/0/pilot"),
        (Method::DELETE, "/api"),
    ] {
        let (status, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, uri);
        assert_eq!(body["kind"], "methodNotAllowed", "{} {}", method, uri);
        assert_eq!(body["requestedUri"], uri);
    }
}

#[tokio::test]
async fn unreadable_tracks_are_bad_gateway() {
    let app = test_app();
    submit(&app, TRACK_B).await;
    let (status, body) = send(&app, Method::GET, "/api/track/0", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "parseError");

    // the service keeps working afterwards
    assert_eq!(submit(&app, TRACK_A).await.1, json!({ "id": 1 }));
    assert_eq!(send(&app, Method::GET, "/api/track/1", None).await.0, StatusCode::OK);
}

#[tokio::test]
async fn slow_tracks_time_out() {
    let app = test_app();
    submit(&app, SLOW_TRACK).await;
    let (status, body) = send(&app, Method::GET, "/api/track/0/pilot", None).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["kind"], "timeout");
}

#[tokio::test]
async fn wrong_path_shapes() {
    let app = test_app();
    submit(&app, TRACK_A).await;

    let (status, body) = send(&app, Method::GET, "/api/track/0/pilot/extra", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "malformedRequest");

    let (status, body) = send(&app, Method::GET, "/api/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "notFound");

    let (status, _) = send(&app, Method::GET, "/elsewhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_schema() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/track/schema", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["properties"]["track_length"].is_object());
}

#[tokio::test]
async fn summary_schema_with_example_data() {
    let app = test_app();
    let (status, body) =
        send(&app, Method::GET, "/api/track/schema?exampleData=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["examples"][0]["pilot"], "Miguel Angel Gordillo");
    assert_eq!(body["examples"][0]["h_date"], "2016-02-19");
}
