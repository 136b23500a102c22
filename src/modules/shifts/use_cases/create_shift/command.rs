use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateShift {
    pub tenant_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub role: Option<String>,
    pub team: Option<String>,
    pub description: Option<String>,
    pub is_recurring: bool,
}

impl CreateShift {
    pub fn new(tenant_id: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            start_time,
            end_time,
            role: None,
            team: None,
            description: None,
            is_recurring: false,
        }
    }
}
