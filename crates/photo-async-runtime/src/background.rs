//! AI background editing
//!
//! The service itself lives outside this crate; only its contract is defined
//! here. Every edit is a single attempt. On failure the caller gets back the
//! last good image to restore.

use std::future::Future;

pub const QUOTA_MESSAGE: &str =
    "The AI service is over its quota or rate limit. Please wait a moment and try again.";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "The AI edit failed. Your previous image has been restored.";

/// An external image generation and editing service.
///
/// Images travel as data URIs. Errors are the service's own message text.
pub trait BackgroundService: Send + Sync + 'static {
    /// Generate a background from a text prompt
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, String>> + Send;

    /// Cut the subject out of a photo
    fn remove_background(
        &self,
        photo_data_uri: &str,
    ) -> impl Future<Output = Result<String, String>> + Send;
}

/// Stand-in used when no service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackgroundService;

impl BackgroundService for NoBackgroundService {
    async fn generate(&self, _prompt: &str) -> Result<String, String> {
        Err("Background editing is not configured".to_string())
    }

    async fn remove_background(&self, _photo_data_uri: &str) -> Result<String, String> {
        Err("Background editing is not configured".to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundRequest {
    Generate { prompt: String },
    RemoveBackground { photo_data_uri: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Quota exhausted or rate limited
    Quota,
    Other,
}

impl FailureKind {
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::Quota => QUOTA_MESSAGE,
            FailureKind::Other => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Sort a service error by its message text
pub fn classify_failure(message: &str) -> FailureKind {
    let message = message.to_ascii_lowercase();
    let quota_markers = [
        "quota",
        "rate limit",
        "rate-limit",
        "ratelimit",
        "too many requests",
        "resource_exhausted",
        "429",
    ];
    if quota_markers.iter().any(|m| message.contains(m)) {
        FailureKind::Quota
    } else {
        FailureKind::Other
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundOutcome {
    Updated(String),
    Failed {
        kind: FailureKind,
        message: &'static str,
        /// Image to put back on the canvas
        restored: String,
    },
}

/// Make exactly one attempt at `request`
pub async fn run_background_edit<S: BackgroundService>(
    service: &S,
    request: &BackgroundRequest,
    last_good: &str,
) -> BackgroundOutcome {
    let result = match request {
        BackgroundRequest::Generate { prompt } => service.generate(prompt).await,
        BackgroundRequest::RemoveBackground { photo_data_uri } => {
            service.remove_background(photo_data_uri).await
        }
    };

    match result {
        Ok(image) => BackgroundOutcome::Updated(image),
        Err(error) => {
            let kind = classify_failure(&error);
            log::warn!("Background edit failed ({:?}): {}", kind, error);
            BackgroundOutcome::Failed {
                kind,
                message: kind.user_message(),
                restored: last_good.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_failure() {
        assert_eq!(classify_failure("Quota exceeded for project"), FailureKind::Quota);
        assert_eq!(classify_failure("HTTP 429 Too Many Requests"), FailureKind::Quota);
        assert_eq!(classify_failure("RESOURCE_EXHAUSTED"), FailureKind::Quota);
        assert_eq!(classify_failure("Rate limit hit"), FailureKind::Quota);
        assert_eq!(classify_failure("connection reset"), FailureKind::Other);
        assert_eq!(classify_failure(""), FailureKind::Other);
    }
}
