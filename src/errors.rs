use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::{db_persistence::DbError, services::twitter_client::LookupError};

pub type AppResult<T> = Result<T, AppError>;

/// Failures outside a single resolution: startup, persistence and serving.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Twitter client error: {0}")]
    Lookup(#[from] LookupError),
    #[error("Server error: {0}")]
    Server(String),
}

const SHORTCUT_HELP: &str = "Try Again. If problem persists, please go to www.tvdl.app to update / reset your shortcut.";

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Try again. If problem persists, please send an email to help@tvdl.app for more help";

/// Failure codes reported to the shortcut. Values are part of the client contract
/// and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    EmptyBody = 600,
    MissingUrlField = 601,
    NotAUrl = 602,
    NotTargetPlatform = 603,
    NotATweet = 604,
    NoVideoOrGif = 605,
    ShortcutCompromised = 606,
    OutdatedShortcutVersion = 607,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::EmptyBody,
        ErrorCode::MissingUrlField,
        ErrorCode::NotAUrl,
        ErrorCode::NotTargetPlatform,
        ErrorCode::NotATweet,
        ErrorCode::NoVideoOrGif,
        ErrorCode::ShortcutCompromised,
        ErrorCode::OutdatedShortcutVersion,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Short description of the failure, without the help suffix.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::EmptyBody => "Empty request.",
            ErrorCode::MissingUrlField => "No URL found.",
            ErrorCode::NotAUrl => "Not a URL.",
            ErrorCode::NotTargetPlatform => "Not a Twitter URL.",
            ErrorCode::NotATweet => "Not a tweet.",
            ErrorCode::NoVideoOrGif => "Video / GIF not found.",
            ErrorCode::ShortcutCompromised => "Shortcut compromised.",
            ErrorCode::OutdatedShortcutVersion => "Outdated shortcut version.",
        }
    }

    pub fn user_message(self) -> String {
        format!("{} {}", self.message(), SHORTCUT_HELP)
    }

    pub fn is_loggable(self) -> bool {
        matches!(self, ErrorCode::NotTargetPlatform | ErrorCode::NoVideoOrGif)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// User-facing message for a raw code. Codes outside the table get the generic message.
pub fn message_for_code(code: u16) -> String {
    match ErrorCode::from_code(code) {
        Some(known) => known.user_message(),
        None => UNEXPECTED_ERROR_MESSAGE.to_string(),
    }
}

/// Why a resolution stopped. The variant tag is the code the shortcut sees.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("{0}: {msg}", msg = .0.message())]
    Known(ErrorCode),
    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

impl ResolveError {
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ResolveError::Known(code) => Some(*code),
            ResolveError::Unexpected(_) => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ResolveError::Known(code) => code.user_message(),
            ResolveError::Unexpected(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    /// Message for the error log, or `None` when the failure isn't worth recording.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            ResolveError::Known(code) if code.is_loggable() => Some(self.to_string()),
            ResolveError::Known(_) => None,
            ResolveError::Unexpected(_) => Some(self.to_string()),
        }
    }

    /// Label used for the outcome metric.
    pub fn metric_label(&self) -> String {
        match self {
            ResolveError::Known(code) => code.to_string(),
            ResolveError::Unexpected(_) => "unexpected".to_string(),
        }
    }
}

impl From<ErrorCode> for ResolveError {
    fn from(code: ErrorCode) -> Self {
        ResolveError::Known(code)
    }
}

impl From<LookupError> for ResolveError {
    fn from(err: LookupError) -> Self {
        ResolveError::Unexpected(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.user_message(),
        });

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
