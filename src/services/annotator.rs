use crate::{
    config::{ShortcutConfig, UpsellConfig},
    errors::ErrorCode,
    models::{client_version::ClientVersion, descriptor::DownloadDescriptor, request::ResolveBody},
};

/// Decides whether a successful response asks the user for support.
#[cfg_attr(test, mockall::automock)]
pub trait UpsellPolicy: Send + Sync {
    fn should_upsell(&self) -> bool;
}

/// Asks with a fixed probability.
#[derive(Debug, Clone)]
pub struct RandomUpsell {
    rate: f64,
}

impl RandomUpsell {
    pub fn new(config: &UpsellConfig) -> Self {
        let rate = if config.rate.is_nan() { 0.0 } else { config.rate.clamp(0.0, 1.0) };
        Self { rate }
    }
}

impl UpsellPolicy for RandomUpsell {
    fn should_upsell(&self) -> bool {
        rand::random_bool(self.rate)
    }
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedUpsell(pub bool);

impl UpsellPolicy for FixedUpsell {
    fn should_upsell(&self) -> bool {
        self.0
    }
}

/// Version thresholds and integrity settings for the shortcut client.
#[derive(Debug, Clone)]
pub struct ShortcutPolicy {
    minimum_version: ClientVersion,
    latest_version: ClientVersion,
    update_url: String,
    integrity_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid shortcut version in configuration: {0}")]
pub struct InvalidVersionConfig(pub String);

impl ShortcutPolicy {
    pub fn new(config: &ShortcutConfig) -> Result<Self, InvalidVersionConfig> {
        let parse = |raw: &str| ClientVersion::parse(raw).ok_or_else(|| InvalidVersionConfig(raw.to_string()));

        Ok(Self {
            minimum_version: parse(&config.minimum_version)?,
            latest_version: parse(&config.latest_version)?,
            update_url: config.update_url.clone(),
            integrity_key: config.integrity_key.clone().filter(|key| !key.is_empty()),
        })
    }

    /// Rejects a request before any URL handling happens.
    ///
    /// An undeclared version passes; a declared one must parse and reach the minimum.
    pub fn check_preflight(&self, body: &ResolveBody) -> Result<(), ErrorCode> {
        if let Some(raw) = body.ver() {
            match ClientVersion::parse(raw) {
                Some(version) if version >= self.minimum_version => {}
                _ => return Err(ErrorCode::OutdatedShortcutVersion),
            }
        }

        if let Some(expected) = &self.integrity_key {
            if body.key() != Some(expected.as_str()) {
                return Err(ErrorCode::ShortcutCompromised);
            }
        }

        Ok(())
    }

    /// Adds the upsell flag and, for clients behind the latest release, an update notice.
    pub fn annotate(
        &self,
        mut descriptor: DownloadDescriptor,
        client_version: Option<&str>,
        upsell: &dyn UpsellPolicy,
    ) -> DownloadDescriptor {
        descriptor.sell = Some(upsell.should_upsell());

        let is_current = client_version
            .and_then(ClientVersion::parse)
            .is_some_and(|version| version >= self.latest_version);
        if !is_current {
            descriptor.version_notice = Some(format!(
                "Version {} of the shortcut is available. Update at {}",
                self.latest_version, self.update_url
            ));
        }

        descriptor
    }
}
