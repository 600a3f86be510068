//! Employee service endpoints: registration, login, profile.

use serde_json::json;

use brasa_core::{EmployeeRole, TenantId};

use super::types::{EmployeeProfile, LoginResponse, ProfileUpdate, RegisterRequest};
use super::{BackendClient, BackendError};

impl BackendClient {
    /// Register a new employee.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the data.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), BackendError> {
        let url = format!("{}/registrar", self.config().employees_url);
        let body = serde_json::to_value(request)?;
        self.post_json(&url, &body).await.map(drop)
    }

    /// Log an employee in. The tenant id is the employee's email.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the credentials are rejected.
    pub async fn login(
        &self,
        tenant_id: &TenantId,
        password: &str,
        rol: EmployeeRole,
    ) -> Result<LoginResponse, BackendError> {
        let url = format!("{}/logearse", self.config().employees_url);
        let body = json!({
            "tenant_id": tenant_id,
            "password": password,
            "rol": rol,
        });
        let payload = self.post_json(&url, &body).await?;
        serde_json::from_value(payload).map_err(Into::into)
    }

    /// Fetch the employee profile for a tenant.
    ///
    /// The endpoint is a POST taking the tenant id in the body.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn profile(&self, tenant_id: &TenantId) -> Result<EmployeeProfile, BackendError> {
        let url = format!("{}/perfil", self.config().employees_url);
        let payload = self.post_json(&url, &json!({"tenant_id": tenant_id})).await?;
        serde_json::from_value(payload).map_err(Into::into)
    }

    /// Update the editable profile fields for a tenant.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn update_profile(
        &self,
        tenant_id: &TenantId,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        let url = format!("{}/perfil", self.config().employees_url);
        let mut body = serde_json::to_value(update)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("tenant_id".to_owned(), json!(tenant_id));
        }
        self.put_json(&url, &body).await.map(drop)
    }
}
