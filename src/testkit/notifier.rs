//! Recording [`Notifier`] for testing.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::UserId;
use crate::port::{NotificationMetadata, Notifier};

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone)]
pub struct SentNotification {
    pub target: UserId,
    pub title: String,
    pub body: String,
    pub metadata: NotificationMetadata,
}

/// Notifier that records every send and reports scripted outcomes.
///
/// Each send pops the next scripted outcome; when the queue is
/// exhausted, delivery is reported as successful.
#[derive(Default)]
pub struct RecordingNotifier {
    outcomes: Mutex<VecDeque<bool>>,
    sent: Mutex<Vec<SentNotification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue delivery outcomes for upcoming sends.
    #[must_use]
    pub fn with_outcomes(self, outcomes: Vec<bool>) -> Self {
        *self.outcomes.lock() = outcomes.into();
        self
    }

    /// Everything sent so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        target: &UserId,
        title: &str,
        body: &str,
        metadata: NotificationMetadata,
    ) -> bool {
        self.sent.lock().push(SentNotification {
            target: target.clone(),
            title: title.to_string(),
            body: body.to_string(),
            metadata,
        });
        self.outcomes.lock().pop_front().unwrap_or(true)
    }
}
