use serde_json::json;

use crate::modules::notifications::core::notification::{
    NewNotification, NotificationKind, Severity,
};
use crate::modules::notifications::core::ports::NotificationSink;
use crate::modules::time_entries::core::intents::TimeEntryIntent;

/// Translate ledger intents into notifications and hand them to the sink.
/// Best effort: sink failures are logged and never reach the caller.
pub async fn dispatch_intents(sink: &dyn NotificationSink, intents: Vec<TimeEntryIntent>) {
    for intent in intents {
        let notification = to_notification(intent);
        if let Err(err) = sink.notify(notification.clone()).await {
            tracing::warn!(
                tenant_id = %notification.tenant_id,
                kind = %notification.kind,
                error = %err,
                "notification dropped"
            );
        }
    }
}

fn to_notification(intent: TimeEntryIntent) -> NewNotification {
    match intent {
        TimeEntryIntent::NotifyOvertime {
            tenant_id,
            user_id,
            time_entry_id,
            duration_hours,
            work_date,
        } => NewNotification::to_user(
            tenant_id,
            user_id,
            NotificationKind::OvertimeDetected,
            format!("Overtime detected: {duration_hours:.1} hours on {work_date}"),
        )
        .with_severity(Severity::Warning)
        .with_payload(json!({
            "time_entry_id": time_entry_id,
            "duration_hours": duration_hours,
            "work_date": work_date,
        })),
    }
}
