use url::Url;

use crate::{errors::ErrorCode, models::tweet::TweetId};

const VALID_DOMAINS: [&str; 2] = ["twitter.com", "x.com"];

/// A URL already known to point at X/Twitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetUrl(Url);

impl TweetUrl {
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

fn is_platform_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    VALID_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// Checks that `input` is a URL with a scheme and host on twitter.com / x.com.
pub fn classify(input: Option<&str>) -> Result<TweetUrl, ErrorCode> {
    let input = input.map(str::trim).filter(|s| !s.is_empty()).ok_or(ErrorCode::MissingUrlField)?;

    let url = Url::parse(input).map_err(|_| ErrorCode::NotAUrl)?;
    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(ErrorCode::NotAUrl),
    };

    if !is_platform_host(host) {
        return Err(ErrorCode::NotTargetPlatform);
    }

    Ok(TweetUrl(url))
}

/// Reads the numeric id following a `status` (or legacy `statuses`) path segment.
///
/// The marker must be followed by digits, so an account literally named `status`
/// still resolves.
pub fn extract_tweet_id(url: &TweetUrl) -> Result<TweetId, ErrorCode> {
    let segments: Vec<&str> = url
        .as_url()
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    segments
        .windows(2)
        .find_map(|pair| match pair {
            [marker, id] if *marker == "status" || *marker == "statuses" => TweetId::parse(id),
            _ => None,
        })
        .ok_or(ErrorCode::NotATweet)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(input: &str) -> Result<String, ErrorCode> {
        let url = classify(Some(input))?;
        extract_tweet_id(&url).map(|id| id.0)
    }

    #[test]
    fn test_classify_missing_url() {
        assert_eq!(classify(None).unwrap_err(), ErrorCode::MissingUrlField);
        assert_eq!(classify(Some("   ")).unwrap_err(), ErrorCode::MissingUrlField);
    }

    #[test]
    fn test_classify_not_a_url() {
        assert_eq!(classify(Some("random text")).unwrap_err(), ErrorCode::NotAUrl);
        assert_eq!(classify(Some("twitter.com/user/status/1")).unwrap_err(), ErrorCode::NotAUrl);
        assert_eq!(classify(Some("mailto:someone@x.com")).unwrap_err(), ErrorCode::NotAUrl);
    }

    #[test]
    fn test_classify_other_platforms() {
        assert_eq!(classify(Some("https://example.com/foo")).unwrap_err(), ErrorCode::NotTargetPlatform);
        assert_eq!(
            classify(Some("https://google.com/x.com/user/status/1")).unwrap_err(),
            ErrorCode::NotTargetPlatform
        );
        assert_eq!(
            classify(Some("https://nottwitter.com/user/status/1")).unwrap_err(),
            ErrorCode::NotTargetPlatform
        );
    }

    #[test]
    fn test_classify_platform_hosts() {
        for input in [
            "https://twitter.com/user/status/1",
            "https://mobile.twitter.com/user/status/1",
            "https://www.x.com/user/status/1",
            "http://X.COM/user/status/1",
        ] {
            assert!(classify(Some(input)).is_ok(), "{input} should classify");
        }
    }

    #[test]
    fn test_extract_tweet_id() {
        assert_eq!(id_of("https://twitter.com/user/status/12345").unwrap(), "12345");
        assert_eq!(id_of("https://x.com/user/status/12345/").unwrap(), "12345");
        assert_eq!(id_of("https://x.com/user/status/12345?s=20&t=abc").unwrap(), "12345");
        assert_eq!(id_of("https://x.com/user/status/12345/video/1").unwrap(), "12345");
        assert_eq!(id_of("https://twitter.com/i/web/status/987").unwrap(), "987");
        assert_eq!(id_of("https://twitter.com/user/statuses/555").unwrap(), "555");
        assert_eq!(id_of("https://twitter.com/status/status/12345").unwrap(), "12345");
        assert_eq!(id_of("https://x.com/statuses/status/777/photo/1").unwrap(), "777");
    }

    #[test]
    fn test_extract_not_a_tweet() {
        assert_eq!(id_of("https://twitter.com/user").unwrap_err(), ErrorCode::NotATweet);
        assert_eq!(id_of("https://twitter.com/user/status/").unwrap_err(), ErrorCode::NotATweet);
        assert_eq!(id_of("https://x.com/user/status/bad_id").unwrap_err(), ErrorCode::NotATweet);
        assert_eq!(id_of("https://x.com/").unwrap_err(), ErrorCode::NotATweet);
        assert_eq!(id_of("https://x.com/status/status").unwrap_err(), ErrorCode::NotATweet);
    }
}
