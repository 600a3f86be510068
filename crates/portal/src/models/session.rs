//! Session-related types.
//!
//! Types stored in the session for authentication state. The session is
//! written once at login and removed at logout; nothing mutates it in
//! between.

use serde::{Deserialize, Serialize};

use brasa_core::{EmployeeId, EmployeeRole, TenantId};

/// Session-stored employee identity.
///
/// Minimal data identifying the logged-in employee; everything else comes
/// from the backend on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentEmployee {
    /// Tenant scope: the employee's login email.
    pub tenant_id: TenantId,
    /// Employee's backend id.
    pub employee_id: EmployeeId,
    /// Role chosen at login, gating workflow actions.
    pub role: EmployeeRole,
    /// Display name.
    pub name: String,
    /// Auth token from the employee service, when it issued one.
    pub token: Option<String>,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in employee.
    pub const CURRENT_EMPLOYEE: &str = "current_employee";
}
