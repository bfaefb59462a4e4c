use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the remote movie service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Failures turning a local image into a hosted poster URL.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("image upload is not configured (set CLOUDINARY_CLOUD_NAME and CLOUDINARY_UPLOAD_PRESET)")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("image host responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("image host returned no URL")]
    MissingUrl,

    #[error("cannot attach image as {mime}")]
    InvalidMime {
        mime: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Everything a user-facing flow (load, submit, delete) can surface.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to upload image: {0}")]
    Upload(#[source] UploadError),

    #[error("Failed to {action}: {source}")]
    Persistence {
        action: &'static str,
        #[source]
        source: ApiError,
    },
}

impl WatchlistError {
    pub fn persistence(action: &'static str) -> impl FnOnce(ApiError) -> Self {
        move |source| Self::Persistence { action, source }
    }

    /// True when the underlying cause is a transport failure rather than a server answer.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Upload(UploadError::Network(_))
                | Self::Persistence { source: ApiError::Network(_), .. }
        )
    }
}

impl From<UploadError> for WatchlistError {
    fn from(err: UploadError) -> Self {
        Self::Upload(err)
    }
}

/// Keeps error bodies short enough to fit in a notification.
pub(crate) fn truncate_body(body: String) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_message_names_the_action() {
        let err = WatchlistError::persistence("delete movie")(ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: "missing".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Failed to delete movie: server responded with 404 Not Found: missing"
        );
        assert!(!err.is_network());
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short".to_string()), "short");
        let long = "x".repeat(500);
        let cut = truncate_body(long);
        assert_eq!(cut.chars().count(), 201);
        assert!(cut.ends_with('…'));
    }
}
