use serde::{Deserialize, Serialize};

use crate::models::tweet::{MediaKind, TweetId};

/// What the shortcut receives on success. Only these fields ever leave the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadDescriptor {
    pub tweet_id: TweetId,
    pub url: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub bitrate: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_notice: Option<String>,
}

impl DownloadDescriptor {
    pub fn did_upsell(&self) -> bool {
        self.sell == Some(true)
    }
}
