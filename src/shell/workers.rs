// Background workers spawned by the binary.

use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;

use crate::modules::notifications::adapters::outbound::relay::{RelayStats, run_notification_relay};
use crate::modules::notifications::core::notification::NewNotification;
use crate::modules::notifications::core::ports::NotificationRepository;
use crate::shared::core::clock::Clock;

pub fn spawn_notification_relay(
    receiver: Receiver<NewNotification>,
    repository: Arc<dyn NotificationRepository>,
    clock: Arc<dyn Clock>,
) -> JoinHandle<RelayStats> {
    tracing::info!("notification relay started");
    tokio::spawn(run_notification_relay(receiver, repository, clock))
}
