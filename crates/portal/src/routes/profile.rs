//! Profile route handlers.
//!
//! These routes require authentication. The profile itself lives in the
//! employee service; the portal edits three fields and re-reads the rest.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::backend::{EmployeeProfile, ProfileUpdate};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentEmployee;
use crate::state::AppState;

/// Profile edit form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub nombre: String,
    pub apellidos: String,
    pub numero: String,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub employee: CurrentEmployee,
    pub profile: EmployeeProfile,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Display the profile page.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(employee): RequireAuth,
) -> impl IntoResponse {
    match state.backend().profile(&employee.tenant_id).await {
        Ok(profile) => ProfileTemplate {
            employee,
            profile,
            notice: None,
            error: None,
        },
        Err(err) => ProfileTemplate {
            employee,
            profile: EmployeeProfile::default(),
            notice: None,
            error: Some(err.to_string()),
        },
    }
}

/// Handle profile form submission, then re-read and render the result.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(employee): RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Response {
    let update = ProfileUpdate {
        nombre: non_empty(form.nombre),
        apellidos: non_empty(form.apellidos),
        numero: non_empty(form.numero),
    };

    let (notice, error) = match state
        .backend()
        .update_profile(&employee.tenant_id, &update)
        .await
    {
        Ok(()) => (Some("Perfil actualizado.".to_owned()), None),
        Err(err) => (None, Some(err.to_string())),
    };

    let profile = state
        .backend()
        .profile(&employee.tenant_id)
        .await
        .unwrap_or_default();

    ProfileTemplate {
        employee,
        profile,
        notice,
        error,
    }
    .into_response()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
