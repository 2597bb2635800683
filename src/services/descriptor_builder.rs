use crate::models::{
    descriptor::DownloadDescriptor,
    tweet::{MediaKind, MediaSelection, TweetId, TweetMetadata},
};

const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

/// Builds the client-facing descriptor from the upstream payload and the selected variant.
///
/// Nothing from `metadata` is copied besides the tweet id, so upstream schema changes
/// never leak into the response.
pub fn build(metadata: &TweetMetadata, fallback_id: &TweetId, selection: &MediaSelection) -> DownloadDescriptor {
    let tweet_id = metadata
        .id_str
        .as_deref()
        .and_then(TweetId::parse)
        .unwrap_or_else(|| fallback_id.clone());
    let bitrate = selection.variant.bitrate.unwrap_or(0);

    DownloadDescriptor {
        tweet_id,
        url: selection.variant.url.trim().to_string(),
        content_type: sanitize_content_type(&selection.variant.content_type),
        kind: selection.kind,
        bitrate,
        estimated_size_bytes: estimate_size(selection.kind, bitrate, selection.duration_millis),
        sell: None,
        version_notice: None,
    }
}

fn sanitize_content_type(content_type: &str) -> String {
    let content_type = content_type.trim().to_ascii_lowercase();
    if content_type.is_empty() {
        return DEFAULT_CONTENT_TYPE.to_string();
    }

    content_type
}

/// Bytes for a video at `bitrate` bits/s over `duration_millis`. GIFs never get an estimate.
pub fn estimate_size(kind: MediaKind, bitrate: u64, duration_millis: Option<u64>) -> Option<u64> {
    if kind == MediaKind::Gif || bitrate == 0 {
        return None;
    }

    let duration_millis = duration_millis?;
    Some(bitrate.saturating_mul(duration_millis) / 8_000)
}
