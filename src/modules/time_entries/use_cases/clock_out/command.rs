use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ClockOut {
    pub tenant_id: String,
    pub user_id: Uuid,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl ClockOut {
    pub fn new(tenant_id: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id,
            end_time: None,
            notes: None,
        }
    }
}
