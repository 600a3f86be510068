//! Authentication route handlers.
//!
//! Handles login, registration and logout against the employee service.
//! The backend is the authority; the portal only stores the returned
//! identity in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use brasa_core::{EmployeeId, EmployeeRole, TenantId};

use crate::backend::RegisterRequest;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_employee, set_current_employee};
use crate::models::CurrentEmployee;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub rol: EmployeeRole,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub document_type: String,
    pub document: String,
    pub phone: String,
    pub birth_date: String,
    pub rol: EmployeeRole,
    pub password: String,
    pub password_confirm: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page. Already-authenticated employees go straight to
/// the order list.
pub async fn login_page(
    OptionalAuth(employee): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if employee.is_some() {
        return Redirect::to("/orders").into_response();
    }

    LoginTemplate {
        error: query.error,
        success: query.success,
    }
    .into_response()
}

/// Handle login form submission.
///
/// Authenticates against the employee service; on success the session holds
/// the employee identity until logout.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let tenant_id = TenantId::new(form.email.clone());

    match state
        .backend()
        .login(&tenant_id, &form.password, form.rol)
        .await
    {
        Ok(response) => {
            let name = response.nombre.clone().unwrap_or_else(|| {
                form.email
                    .split('@')
                    .next()
                    .unwrap_or(form.email.as_str())
                    .to_owned()
            });
            let employee = CurrentEmployee {
                employee_id: EmployeeId::new(
                    response.employee_id().unwrap_or(form.email.as_str()),
                ),
                role: form.rol,
                token: response.auth_token().map(ToOwned::to_owned),
                tenant_id,
                name,
            };

            if let Err(err) = set_current_employee(&session, &employee).await {
                return AppError::Internal(format!("failed to store session: {err}"))
                    .into_response();
            }

            tracing::info!(tenant = %employee.tenant_id, role = %employee.role, "employee logged in");
            Redirect::to("/orders").into_response()
        }
        Err(err) => LoginTemplate {
            error: Some(err.to_string()),
            success: None,
        }
        .into_response(),
    }
}

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if form.password != form.password_confirm {
        return RegisterTemplate {
            error: Some("Las contraseñas no coinciden".to_owned()),
        }
        .into_response();
    }

    let request = RegisterRequest {
        gmail: form.email,
        nombre: form.name,
        apellidos: form.last_name,
        tipo_documento: form.document_type,
        documento: form.document,
        numero: form.phone,
        fecha_nacimiento: form.birth_date,
        rol: form.rol,
        password: form.password,
    };

    match state.backend().register(&request).await {
        Ok(()) => {
            let success = urlencoding::encode("Registro exitoso. Ya puedes iniciar sesión.");
            Redirect::to(&format!("/auth/login?success={success}")).into_response()
        }
        Err(err) => RegisterTemplate {
            error: Some(err.to_string()),
        }
        .into_response(),
    }
}

/// Handle logout. Clears the whole session identity at once.
pub async fn logout(session: Session) -> Response {
    if let Err(err) = clear_current_employee(&session).await {
        tracing::warn!(error = %err, "failed to clear session on logout");
    }
    Redirect::to("/auth/login").into_response()
}
