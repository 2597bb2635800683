use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{config::TwitterConfig, metrics::track_twitter_api_call, models::tweet::TweetId};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Twitter API responded with status {0}: {1}")]
    Status(u16, String),
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Fetches the extended representation of a single tweet.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetLookup: Send + Sync {
    async fn fetch_tweet(&self, id: &TweetId) -> LookupResult<serde_json::Value>;
}

#[derive(Debug, Clone)]
pub struct TwitterApiClient {
    client: Client,
    api_base_url: String,
    bearer_token: String,
}

impl TwitterApiClient {
    pub fn new(config: &TwitterConfig, timeout: Duration) -> LookupResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn show_url(&self) -> String {
        format!("{}/1.1/statuses/show.json", self.api_base_url)
    }

    async fn request_tweet(&self, id: &TweetId) -> LookupResult<serde_json::Value> {
        let response = self
            .client
            .get(self.show_url())
            .query(&[("id", id.as_str()), ("tweet_mode", "extended")])
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(LookupError::Status(status, body));
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[async_trait]
impl TweetLookup for TwitterApiClient {
    async fn fetch_tweet(&self, id: &TweetId) -> LookupResult<serde_json::Value> {
        tracing::debug!("Fetching tweet {} from Twitter API", id);

        track_twitter_api_call("statuses_show", self.request_tweet(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(mock_server: &MockServer) -> TwitterApiClient {
        let config = TwitterConfig {
            api_base_url: format!("{}/", mock_server.uri()),
            bearer_token: "test-token".to_string(),
            request_timeout_seconds: 5,
        };

        TwitterApiClient::new(&config, Duration::from_secs(config.request_timeout_seconds)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_tweet_success() {
        let mock_server = MockServer::start().await;
        let payload = json!({ "id_str": "12345", "full_text": "hello" });

        Mock::given(method("GET"))
            .and(path("/1.1/statuses/show.json"))
            .and(query_param("id", "12345"))
            .and(query_param("tweet_mode", "extended"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.fetch_tweet(&TweetId("12345".to_string())).await.unwrap();

        assert_eq!(result, payload);
    }

    #[tokio::test]
    async fn test_fetch_tweet_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/1.1/statuses/show.json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("No status found with that ID."))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.fetch_tweet(&TweetId("1".to_string())).await.unwrap_err();

        match err {
            LookupError::Status(status, body) => {
                assert_eq!(status, 404);
                assert_eq!(body, "No status found with that ID.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_tweet_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.fetch_tweet(&TweetId("1".to_string())).await.unwrap_err();

        assert!(matches!(err, LookupError::RequestError(_)));
    }
}
