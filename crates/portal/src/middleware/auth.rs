//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring an employee session in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentEmployee, session_keys};

/// Extractor that requires an authenticated employee.
///
/// If nobody is logged in, returns a redirect to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(employee): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hola, {}!", employee.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentEmployee);

/// Error returned when authentication is required but nobody is logged in.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        // Get the current employee from the session
        let employee: CurrentEmployee = session
            .get(session_keys::CURRENT_EMPLOYEE)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                // Check if this is an API request
                let is_api = parts.uri.path().starts_with("/api/");
                if is_api {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToLogin
                }
            })?;

        Ok(Self(employee))
    }
}

/// Extractor that optionally gets the current employee.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// logged in.
pub struct OptionalAuth(pub Option<CurrentEmployee>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let employee = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentEmployee>(session_keys::CURRENT_EMPLOYEE)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(employee))
    }
}

/// Helper to set the current employee in the session.
///
/// Replaces the stored identity wholesale; there are no partial updates.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_employee(
    session: &Session,
    employee: &CurrentEmployee,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_EMPLOYEE, employee)
        .await
}

/// Helper to clear the current employee from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_employee(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentEmployee>(session_keys::CURRENT_EMPLOYEE)
        .await?;
    Ok(())
}
