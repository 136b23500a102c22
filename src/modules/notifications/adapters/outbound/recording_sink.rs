// Notification sink that keeps everything it receives.
//
// Purpose
// - Let handler tests assert on emitted notifications and simulate an unreachable sink.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::modules::notifications::core::notification::NewNotification;
use crate::modules::notifications::core::ports::{NotificationSink, SinkError};

#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    sent: Mutex<Vec<NewNotification>>,
    is_offline: bool,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn sent(&self) -> Vec<NewNotification> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify(&self, notification: NewNotification) -> Result<(), SinkError> {
        if self.is_offline {
            return Err(SinkError::Offline);
        }
        self.sent.lock().await.push(notification);
        Ok(())
    }
}
