//! Router assembly: question API, health, static question form, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - question API under `/api/questions` (GET list, POST create)
/// - `/api/health` (liveness + store readiness)
/// - the question form from `static_dir` with index fallback
/// - CORS (allow any origin/method/headers) so the form can live elsewhere
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>, static_dir: &str) -> Router {
    let static_service = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(format!("{static_dir}/index.html")));

    Router::new()
        .route("/api/health", get(http::http_health))
        .route(
            "/api/questions",
            get(http::http_list_questions).post(http::http_create_question),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        async_trait,
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::{NewQuestion, Question};
    use crate::config::StoreConfig;
    use crate::store::{self, MemoryStore, QuestionStore, Result as StoreResult, StoreError};

    /// Store whose backend is permanently down.
    struct DownStore;

    #[async_trait]
    impl QuestionStore for DownStore {
        async fn insert(&self, _new: NewQuestion) -> StoreResult<Question> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn list_all(&self) -> StoreResult<Vec<Question>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn ping(&self) -> StoreResult<()> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        fn backend(&self) -> &'static str {
            "down"
        }
    }

    fn app_with(store: Arc<dyn QuestionStore>) -> Router {
        build_router(Arc::new(AppState::new(store)), "./static")
    }

    fn app() -> Router {
        app_with(Arc::new(MemoryStore::new()))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json body") };
        (status, body)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/questions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn get_list() -> Request<Body> {
        Request::builder().uri("/api/questions").body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn two_sum_scenario() {
        let app = app();
        let payload = json!({
            "title": "Two Sum",
            "difficulty": "Easy",
            "testCases": [{ "input": "[2,7]", "expectedOutput": "0,1", "isHidden": false }]
        });

        let (status, created) = send(&app, post_json(&payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_str().expect("id").to_string();
        assert!(!id.is_empty());

        let mut without_id = created.clone();
        without_id.as_object_mut().expect("object").remove("id");
        assert_eq!(without_id, payload);

        let (status, listed) = send(&app, get_list()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn empty_list_is_an_empty_array() {
        let (status, listed) = send(&app(), get_list()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn list_matches_every_create_in_order() {
        let app = app();
        let mut created = Vec::new();
        for body in [r#"{"title":"A"}"#, r#"{}"#, r#"{"difficulty":"Hard","testCases":[]}"#] {
            let (status, q) = send(&app, post_json(body)).await;
            assert_eq!(status, StatusCode::OK);
            created.push(q);
        }
        assert_eq!(created[1], json!({ "id": created[1]["id"] }));
        assert_eq!(created[2]["testCases"], json!([]));

        let (_, listed) = send(&app, get_list()).await;
        assert_eq!(listed, Value::Array(created));
    }

    #[tokio::test]
    async fn wrong_types_are_rejected_and_not_stored() {
        let app = app();
        let (status, err) = send(&app, post_json(r#"{"testCases":[{"isHidden":"yes"}]}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "invalid_input");

        let (status, err) = send(&app, post_json("title=Two+Sum")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "invalid_input");

        let (_, listed) = send(&app, get_list()).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn store_outage_maps_to_503() {
        let app = app_with(Arc::new(DownStore));

        let (status, err) = send(&app, post_json(r#"{"title":"A"}"#)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err["error"], "store_unavailable");

        let (status, err) = send(&app, get_list()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err["error"], "store_unavailable");

        let req = Request::builder().uri("/api/health").body(Body::empty()).expect("request");
        let (status, health) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health, json!({ "ok": true, "store": "down", "ready": false }));
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let app = app();
        let (a, b) = tokio::join!(
            send(&app, post_json(r#"{"title":"A"}"#)),
            send(&app, post_json(r#"{"title":"B"}"#)),
        );
        assert_eq!(a.0, StatusCode::OK);
        assert_eq!(b.0, StatusCode::OK);
        assert_ne!(a.1["id"], b.1["id"]);
    }

    #[tokio::test]
    async fn explicit_nulls_are_stored_and_returned() {
        let app = app();
        let payload = json!({ "title": null, "difficulty": "Easy", "testCases": null });

        let (status, created) = send(&app, post_json(&payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        let mut without_id = created.clone();
        without_id.as_object_mut().expect("object").remove("id");
        assert_eq!(without_id, payload);

        let (_, listed) = send(&app, get_list()).await;
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn unreachable_store_at_startup_still_serves() {
        let cfg = StoreConfig {
            mongo_uri: Some("mongodb+srv://cluster0.does-not-exist.invalid".into()),
            ..StoreConfig::default()
        };
        let app = app_with(store::open(&cfg).await);

        let (status, err) = send(&app, post_json(r#"{"title":"A"}"#)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err["error"], "store_unavailable");

        let (status, _) = send(&app, get_list()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let req = Request::builder().uri("/api/health").body(Body::empty()).expect("request");
        let (status, health) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health, json!({ "ok": true, "store": "mongodb", "ready": false }));
    }
}
