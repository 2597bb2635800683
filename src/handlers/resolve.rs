use axum::{body::Bytes, extract::State, Json};

use crate::{errors::ResolveError, http_server::AppState, models::descriptor::DownloadDescriptor};

/// POST /
/// Resolves `{ "url", "ver" }` into a download descriptor.
///
/// The body is taken as raw bytes so that missing or malformed JSON maps to the
/// shortcut's "Empty request" code instead of an extractor rejection.
pub async fn handle_resolve(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DownloadDescriptor>, ResolveError> {
    let descriptor = state.resolver.resolve(&body).await?;

    Ok(Json(descriptor))
}

/// POST /preview
/// Returns the raw Twitter payload for `{ "url" }`.
pub async fn handle_preview(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ResolveError> {
    tracing::info!("Preview requested");

    let payload = state.resolver.preview(&body).await?;

    Ok(Json(payload))
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::ErrorCode,
        http_server::create_router,
        utils::test_app_state::{create_test_app_state_with, TestCollaborators},
    };
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post(collaborators: TestCollaborators, uri: &str, body: &str) -> (StatusCode, Value) {
        let router = create_router(create_test_app_state_with(collaborators));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn video_tweet() -> Value {
        json!({
            "id_str": "12345",
            "extended_entities": {
                "media": [{
                    "type": "video",
                    "video_info": {
                        "variants": [
                            { "bitrate": 832000, "content_type": "video/mp4", "url": "https://video.twimg.com/vid.mp4" }
                        ]
                    }
                }]
            }
        })
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let collaborators = TestCollaborators::new().with_tweet("12345", video_tweet()).expect_requests(1);

        let (status, body) = post(
            collaborators,
            "/",
            r#"{ "url": "https://twitter.com/user/status/12345", "ver": "3.2" }"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "https://video.twimg.com/vid.mp4");
        assert_eq!(body["contentType"], "video/mp4");
        assert_eq!(body["tweetId"], "12345");
        assert_eq!(body["sell"], false);
        assert!(body.get("versionNotice").is_none());
    }

    #[tokio::test]
    async fn test_resolve_empty_request() {
        let collaborators = TestCollaborators::new().expect_requests(1);

        let (status, body) = post(collaborators, "/", "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": ErrorCode::EmptyBody.user_message() }));
    }

    #[tokio::test]
    async fn test_resolve_without_body() {
        let collaborators = TestCollaborators::new().expect_requests(1);

        let (status, body) = post(collaborators, "/", "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], ErrorCode::EmptyBody.user_message());
    }

    #[tokio::test]
    async fn test_resolve_not_twitter_is_logged() {
        let collaborators = TestCollaborators::new()
            .expect_requests(1)
            .expect_error_log("603: Not a Twitter URL.");

        let (status, body) = post(collaborators, "/", r#"{ "url": "https://example.com/foo" }"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], ErrorCode::NotTargetPlatform.user_message());
    }

    #[tokio::test]
    async fn test_resolve_outdated_version() {
        let collaborators = TestCollaborators::new().expect_requests(1);

        let (status, body) = post(
            collaborators,
            "/",
            r#"{ "url": "https://twitter.com/user/status/12345", "ver": "1.0" }"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], ErrorCode::OutdatedShortcutVersion.user_message());
    }

    #[tokio::test]
    async fn test_preview_returns_payload() {
        let collaborators = TestCollaborators::new().with_tweet("12345", video_tweet());

        let (status, body) = post(collaborators, "/preview", r#"{ "url": "https://x.com/user/status/12345" }"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, video_tweet());
    }

    #[tokio::test]
    async fn test_preview_rejects_bad_url() {
        let (status, body) = post(TestCollaborators::new(), "/preview", r#"{ "url": "nope" }"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], ErrorCode::NotAUrl.user_message());
    }
}
