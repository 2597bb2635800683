use serde::{Deserialize, Serialize};

/// Numeric status id taken from a tweet URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TweetId(pub String);
impl TweetId {
    pub fn parse(input: &str) -> Option<Self> {
        if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        Some(TweetId(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TweetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parts of an extended-mode `statuses/show` payload the pipeline reads.
/// Every other upstream field is ignored on deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetMetadata {
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub extended_entities: Option<ExtendedEntities>,
}

impl TweetMetadata {
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn media(&self) -> &[MediaEntity] {
        self.extended_entities
            .as_ref()
            .map(|entities| entities.media.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtendedEntities {
    #[serde(default)]
    pub media: Vec<MediaEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaEntity {
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(default)]
    pub video_info: Option<VideoInfo>,
}

impl MediaEntity {
    pub fn variants(&self) -> &[MediaVariant] {
        self.video_info
            .as_ref()
            .map(|info| info.variants.as_slice())
            .unwrap_or_default()
    }

    pub fn duration_millis(&self) -> Option<u64> {
        self.video_info.as_ref().and_then(|info| info.duration_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub duration_millis: Option<u64>,
    #[serde(default)]
    pub variants: Vec<MediaVariant>,
}

/// One encoded rendition of a video or GIF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaVariant {
    #[serde(default)]
    pub bitrate: Option<u64>,
    pub content_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Gif,
}

impl MediaKind {
    /// Maps the upstream `type` of a media entity; photos and unknown types yield `None`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "video" => Some(MediaKind::Video),
            "animated_gif" => Some(MediaKind::Gif),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Gif => write!(f, "gif"),
        }
    }
}

/// The variant picked for a tweet together with what it was picked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSelection {
    pub variant: MediaVariant,
    pub kind: MediaKind,
    pub duration_millis: Option<u64>,
}
