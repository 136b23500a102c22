// Notification sink backed by a bounded channel.
//
// Purpose
// - Decouple producers (clock-out, scans, assignments) from notification persistence.
//
// Notes
// - notify never waits: a full or closed channel is reported as SinkError and the caller drops it.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};

use crate::modules::notifications::core::notification::NewNotification;
use crate::modules::notifications::core::ports::{NotificationSink, SinkError};

#[derive(Debug, Clone)]
pub struct ChannelNotificationSink {
    sender: Sender<NewNotification>,
}

impl ChannelNotificationSink {
    pub fn channel(capacity: usize) -> (Self, Receiver<NewNotification>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationSink for ChannelNotificationSink {
    async fn notify(&self, notification: NewNotification) -> Result<(), SinkError> {
        self.sender.try_send(notification).map_err(|err| match err {
            TrySendError::Full(_) => SinkError::Full,
            TrySendError::Closed(_) => SinkError::Closed,
        })
    }
}
