// Notification model shared by the detector, the ledger and the inbox.
//
// Notes
// - Severity and kind persist as text and parse back strictly.
// - A notification without a user is a tenant broadcast.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::core::ports::UnknownVariant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            _ => Err(UnknownVariant {
                field: "severity",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OvertimeDetected,
    MissingClockout,
    ShiftAssigned,
    TaskAssigned,
    General,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::OvertimeDetected => "overtime_detected",
            NotificationKind::MissingClockout => "missing_clockout",
            NotificationKind::ShiftAssigned => "shift_assigned",
            NotificationKind::TaskAssigned => "task_assigned",
            NotificationKind::General => "general",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "overtime_detected" => Ok(NotificationKind::OvertimeDetected),
            "missing_clockout" => Ok(NotificationKind::MissingClockout),
            "shift_assigned" => Ok(NotificationKind::ShiftAssigned),
            "task_assigned" => Ok(NotificationKind::TaskAssigned),
            "general" => Ok(NotificationKind::General),
            _ => Err(UnknownVariant {
                field: "notification type",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a producer hands to the sink. Identity and timestamps are stamped on persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNotification {
    pub tenant_id: String,
    pub user_id: Option<Uuid>,
    pub task_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub payload: Option<serde_json::Value>,
    pub severity: Severity,
}

impl NewNotification {
    pub fn to_user(
        tenant_id: impl Into<String>,
        user_id: Uuid,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id: Some(user_id),
            task_id: None,
            kind,
            message: message.into(),
            payload: None,
            severity: Severity::Info,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn stamp(self, id: Uuid, created_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            tenant_id: self.tenant_id,
            user_id: self.user_id,
            task_id: self.task_id,
            kind: self.kind,
            message: self.message,
            payload: self.payload,
            severity: self.severity,
            is_read: false,
            delivered: false,
            created_at,
            read_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub tenant_id: String,
    pub user_id: Option<Uuid>,
    pub task_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub payload: Option<serde_json::Value>,
    pub severity: Severity,
    pub is_read: bool,
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn is_visible_to(&self, tenant_id: &str, user_id: Uuid) -> bool {
        self.tenant_id == tenant_id && self.user_id.is_none_or(|owner| owner == user_id)
    }
}

#[cfg(test)]
mod notification_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("info", Severity::Info)]
    #[case("warning", Severity::Warning)]
    #[case("critical", Severity::Critical)]
    fn it_should_parse_severities(#[case] raw: &str, #[case] expected: Severity) {
        assert_eq!(raw.parse::<Severity>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn it_should_reject_unknown_kinds() {
        let err = "party".parse::<NotificationKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown notification type 'party'");
    }

    #[rstest]
    fn it_should_show_broadcasts_to_every_user_of_the_tenant() {
        let mut notification = NewNotification::to_user(
            "tenant-a",
            Uuid::now_v7(),
            NotificationKind::General,
            "hello",
        )
        .stamp(Uuid::now_v7(), Utc::now());
        notification.user_id = None;
        assert!(notification.is_visible_to("tenant-a", Uuid::now_v7()));
        assert!(!notification.is_visible_to("tenant-b", Uuid::now_v7()));
    }

    #[rstest]
    fn it_should_serialize_the_kind_as_type() {
        let notification =
            NewNotification::to_user("tenant-a", Uuid::nil(), NotificationKind::MissingClockout, "m");
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "missing_clockout");
        assert_eq!(json["severity"], "info");
    }
}
