// Identity claims handed to every operation by the boundary.
//
// Purpose
// - Carry the already-authenticated (user_id, tenant_id, role) triple. Nothing here verifies
//   credentials; token issuance and verification live outside this service.
//
// Responsibilities
// - Map roles to the permissions each route requires.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::ports::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    Admin,
    Manager,
    Technician,
    Finance,
    Contractor,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Technician => "technician",
            Role::Finance => "finance",
            Role::Contractor => "contractor",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "superadmin" => Ok(Role::Superadmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "technician" => Ok(Role::Technician),
            "finance" => Ok(Role::Finance),
            "contractor" => Ok(Role::Contractor),
            "employee" => Ok(Role::Employee),
            _ => Err(UnknownVariant {
                field: "role",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ClockIn,
    ViewOthersTimesheet,
    ViewSummaryReport,
    ReviewExceptions,
    ManageShifts,
    BackfillTenant,
    BackfillAllTenants,
}

impl Permission {
    fn allowed_roles(self) -> &'static [Role] {
        match self {
            Permission::ClockIn => &[Role::Technician, Role::Contractor, Role::Employee, Role::Admin],
            Permission::ViewOthersTimesheet => &[Role::Manager, Role::Admin],
            Permission::ViewSummaryReport => &[Role::Manager, Role::Superadmin],
            Permission::ReviewExceptions => &[Role::Manager, Role::Admin],
            Permission::ManageShifts => &[Role::Manager, Role::Admin, Role::Superadmin],
            Permission::BackfillTenant => &[Role::Admin, Role::Superadmin],
            Permission::BackfillAllTenants => &[Role::Superadmin],
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            Permission::ClockIn => "clock in",
            Permission::ViewOthersTimesheet => "view another user's timesheet",
            Permission::ViewSummaryReport => "view the summary report",
            Permission::ReviewExceptions => "review time exceptions",
            Permission::ManageShifts => "manage shifts",
            Permission::BackfillTenant => "backfill durations",
            Permission::BackfillAllTenants => "backfill durations across tenants",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: Uuid,
    pub tenant_id: String,
    pub role: Role,
}

impl Claims {
    pub fn new(user_id: Uuid, tenant_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            tenant_id: tenant_id.into(),
            role,
        }
    }

    pub fn can(&self, permission: Permission) -> bool {
        permission.allowed_roles().contains(&self.role)
    }

    pub fn authorize(&self, permission: Permission) -> Result<(), ApplicationError> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(ApplicationError::Forbidden {
                role: self.role,
                action: permission.action(),
            })
        }
    }
}
