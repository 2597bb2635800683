use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    errors::ResolveError,
    metrics::track_resolve_outcome,
    models::{
        descriptor::DownloadDescriptor,
        error_log::ErrorLogEntry,
        request::{body_for_log, ResolveBody},
        request_counter::{current_day, CounterField},
        tweet::TweetMetadata,
    },
    repositories::{error_log::ErrorLogStore, request_counter::RequestCounterStore},
    services::{
        annotator::{ShortcutPolicy, UpsellPolicy},
        descriptor_builder, media_selector,
        twitter_client::TweetLookup,
    },
    utils::x_url::{classify, extract_tweet_id},
};

/// Counter bookkeeping for one request.
///
/// `settle` records the tally on the normal path. If the guard is dropped unsettled
/// (handler panic or cancelled future) the increments are spawned from `Drop` instead.
/// Either way the writes run on their own task, so cancelling the request mid-write
/// cannot lose them.
struct RequestTally {
    counters: Arc<dyn RequestCounterStore>,
    day: NaiveDate,
    upsold: bool,
    settled: bool,
}

impl RequestTally {
    fn open(counters: Arc<dyn RequestCounterStore>) -> Self {
        Self {
            counters,
            day: current_day(),
            upsold: false,
            settled: false,
        }
    }

    fn mark_upsold(&mut self) {
        self.upsold = true;
    }

    async fn settle(mut self) {
        self.settled = true;

        let writes = tokio::spawn(record_tally(self.counters.clone(), self.day, self.upsold));
        if let Err(e) = writes.await {
            tracing::error!("Request tally task for {} failed: {}", self.day, e);
        }
    }
}

impl Drop for RequestTally {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(record_tally(self.counters.clone(), self.day, self.upsold));
            }
            Err(_) => tracing::warn!("No runtime available, request tally for {} was lost", self.day),
        }
    }
}

async fn record_tally(counters: Arc<dyn RequestCounterStore>, day: NaiveDate, upsold: bool) {
    if let Err(e) = counters.increment(day, CounterField::TotalRequests).await {
        tracing::error!("Failed to increment request counter for {}: {}", day, e);
    }

    if upsold {
        if let Err(e) = counters.increment(day, CounterField::TotalUpsells).await {
            tracing::error!("Failed to increment upsell counter for {}: {}", day, e);
        }
    }
}

/// Runs the tweet-to-descriptor pipeline for a single request body.
#[derive(Clone)]
pub struct MediaResolver {
    lookup: Arc<dyn TweetLookup>,
    counters: Arc<dyn RequestCounterStore>,
    error_log: Arc<dyn ErrorLogStore>,
    shortcut: ShortcutPolicy,
    upsell: Arc<dyn UpsellPolicy>,
}

impl MediaResolver {
    pub fn new(
        lookup: Arc<dyn TweetLookup>,
        counters: Arc<dyn RequestCounterStore>,
        error_log: Arc<dyn ErrorLogStore>,
        shortcut: ShortcutPolicy,
        upsell: Arc<dyn UpsellPolicy>,
    ) -> Self {
        Self {
            lookup,
            counters,
            error_log,
            shortcut,
            upsell,
        }
    }

    /// Resolves a request body into a descriptor.
    ///
    /// Every call counts towards today's request total, whatever the outcome.
    pub async fn resolve(&self, raw_body: &[u8]) -> Result<DownloadDescriptor, ResolveError> {
        let mut tally = RequestTally::open(self.counters.clone());

        let result = self.run_pipeline(raw_body).await;
        match &result {
            Ok(descriptor) => {
                if descriptor.did_upsell() {
                    tally.mark_upsold();
                }
                track_resolve_outcome("ok");
            }
            Err(err) => {
                track_resolve_outcome(&err.metric_label());
                self.report_failure(raw_body, err).await;
            }
        }

        tally.settle().await;
        result
    }

    /// Returns the raw upstream payload for a tweet URL. Bypasses counters and version checks.
    pub async fn preview(&self, raw_body: &[u8]) -> Result<serde_json::Value, ResolveError> {
        let body = ResolveBody::from_bytes(raw_body)?;
        let url = classify(body.url())?;
        let tweet_id = extract_tweet_id(&url)?;

        Ok(self.lookup.fetch_tweet(&tweet_id).await?)
    }

    async fn run_pipeline(&self, raw_body: &[u8]) -> Result<DownloadDescriptor, ResolveError> {
        let body = ResolveBody::from_bytes(raw_body)?;
        self.shortcut.check_preflight(&body)?;

        let url = classify(body.url())?;
        let tweet_id = extract_tweet_id(&url)?;
        tracing::info!("Resolving media for tweet {}", tweet_id);

        let payload = self.lookup.fetch_tweet(&tweet_id).await?;
        let metadata = TweetMetadata::from_value(payload)
            .map_err(|e| ResolveError::Unexpected(format!("Malformed tweet payload: {}", e)))?;

        let selection = media_selector::select_variant(&metadata)?;
        let descriptor = descriptor_builder::build(&metadata, &tweet_id, &selection);

        Ok(self.shortcut.annotate(descriptor, body.ver(), self.upsell.as_ref()))
    }

    async fn report_failure(&self, raw_body: &[u8], err: &ResolveError) {
        match err {
            ResolveError::Known(_) => tracing::info!("Resolution rejected: {}", err),
            ResolveError::Unexpected(detail) => tracing::error!("Resolution failed unexpectedly: {}", detail),
        }

        let Some(message) = err.diagnostic() else {
            return;
        };

        let entry = ErrorLogEntry::new(body_for_log(raw_body), message);
        if let Err(e) = self.error_log.record(&entry).await {
            tracing::error!("Failed to store error log entry {}: {}", entry.id, e);
        }
    }
}
