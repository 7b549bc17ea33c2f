//! Notification sink for list-load errors.
//!
//! Components receive the sink as an `Arc<dyn Notifier>` rather than reaching
//! for a global. Errors arrive exactly as the API client returned them; the
//! sink holds one and a new error replaces the old one.

use log::error;
use std::sync::{Arc, Mutex};

use crate::api::ApiError;

/// Receives errors that have no modal to show them
pub trait Notifier: Send + Sync {
    fn notify(&self, error: &ApiError);
}

/// Keeps the most recent error and logs every error it receives
#[derive(Clone, Default)]
pub struct LatestNotification {
    latest: Arc<Mutex<Option<ApiError>>>,
}

impl LatestNotification {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last error received, if any
    pub fn latest(&self) -> Option<ApiError> {
        self.latest.lock().ok().and_then(|latest| latest.clone())
    }

    /// Take the last error, leaving the sink empty
    pub fn take(&self) -> Option<ApiError> {
        self.latest.lock().ok().and_then(|mut latest| latest.take())
    }
}

impl Notifier for LatestNotification {
    fn notify(&self, error: &ApiError) {
        error!("{}", error);
        if let Ok(mut latest) = self.latest.lock() {
            *latest = Some(error.clone());
        }
    }
}
