use crate::{
    http_server::AppState,
    metrics::Metrics,
    models::request_counter::CounterField,
    repositories::{error_log::MockErrorLogStore, request_counter::MockRequestCounterStore},
    services::{
        annotator::{FixedUpsell, ShortcutPolicy},
        resolver::MediaResolver,
        twitter_client::MockTweetLookup,
    },
    Config,
};
use mockall::predicate::{always, eq};
use std::sync::Arc;

/// Mocked collaborators for router-level tests. Calls without a matching expectation panic.
pub struct TestCollaborators {
    lookup: MockTweetLookup,
    counters: MockRequestCounterStore,
    error_log: MockErrorLogStore,
}

impl TestCollaborators {
    pub fn new() -> Self {
        Self {
            lookup: MockTweetLookup::new(),
            counters: MockRequestCounterStore::new(),
            error_log: MockErrorLogStore::new(),
        }
    }

    pub fn with_tweet(mut self, tweet_id: &'static str, payload: serde_json::Value) -> Self {
        self.lookup
            .expect_fetch_tweet()
            .withf(move |id| id.as_str() == tweet_id)
            .returning(move |_| Ok(payload.clone()));
        self
    }

    pub fn expect_requests(mut self, count: usize) -> Self {
        self.counters
            .expect_increment()
            .with(always(), eq(CounterField::TotalRequests))
            .times(count)
            .returning(|_, _| Ok(()));
        self
    }

    pub fn expect_error_log(mut self, message: &'static str) -> Self {
        self.error_log
            .expect_record()
            .withf(move |entry| entry.message == message)
            .times(1)
            .returning(|_| Ok(()));
        self
    }
}

pub fn create_test_app_state() -> AppState {
    create_test_app_state_with(TestCollaborators::new())
}

pub fn create_test_app_state_with(collaborators: TestCollaborators) -> AppState {
    let config = Config::load_test_env().expect("Failed to load test configuration");
    let shortcut = ShortcutPolicy::new(&config.shortcut).expect("Invalid shortcut versions in test configuration");

    let resolver = MediaResolver::new(
        Arc::new(collaborators.lookup),
        Arc::new(collaborators.counters),
        Arc::new(collaborators.error_log),
        shortcut,
        Arc::new(FixedUpsell(false)),
    );

    AppState {
        resolver: Arc::new(resolver),
        metrics: Arc::new(Metrics::new()),
    }
}
