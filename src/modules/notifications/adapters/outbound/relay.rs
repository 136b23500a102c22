// Notification relay worker.
//
// Purpose
// - Drain the notification channel and persist each notification into the inbox.
//
// Responsibilities
// - Stamp id (UUID v7) and created_at on receipt.
// - Log and skip persistence failures; keep draining.
// - Return when every sender has been dropped.

use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use uuid::Uuid;

use crate::modules::notifications::core::notification::NewNotification;
use crate::modules::notifications::core::ports::NotificationRepository;
use crate::shared::core::clock::Clock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub persisted: usize,
    pub failed: usize,
}

pub async fn run_notification_relay(
    mut receiver: Receiver<NewNotification>,
    repository: Arc<dyn NotificationRepository>,
    clock: Arc<dyn Clock>,
) -> RelayStats {
    let mut stats = RelayStats::default();
    while let Some(incoming) = receiver.recv().await {
        let notification = incoming.stamp(Uuid::now_v7(), clock.now());
        match repository.insert(&notification).await {
            Ok(()) => {
                stats.persisted += 1;
                tracing::debug!(
                    tenant_id = %notification.tenant_id,
                    notification_id = %notification.id,
                    kind = %notification.kind,
                    "notification stored"
                );
            }
            Err(err) => {
                stats.failed += 1;
                tracing::warn!(
                    tenant_id = %notification.tenant_id,
                    kind = %notification.kind,
                    error = %err,
                    "notification could not be stored"
                );
            }
        }
    }
    tracing::info!(persisted = stats.persisted, failed = stats.failed, "notification relay stopped");
    stats
}
