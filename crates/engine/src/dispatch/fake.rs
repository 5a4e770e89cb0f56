//! Fake — recording test double for notification delivery.

use std::pin::Pin;
use std::sync::Mutex;

use super::sink::{Notification, NotificationSink};

/// A sink that records every delivered notification in order.
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in delivery order.
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.delivered.lock().unwrap().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(
        &self,
        notification: Notification,
    ) -> Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            self.delivered.lock().unwrap().push(notification);
        })
    }
}
