//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Sales dashboard
//! GET  /health                 - Health check
//!
//! # Orders
//! GET  /orders                 - Order list (status filter + search)
//! GET  /orders/{uuid}          - Order detail
//! POST /orders/{uuid}/advance  - Confirm the next workflow step
//! POST /orders/{uuid}/start    - Start the workflow (administrador only)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Profile (requires auth)
//! GET  /profile                - Profile page
//! POST /profile                - Update profile
//! ```

pub mod auth;
pub mod home;
pub mod orders;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{uuid}", get(orders::show))
        .route("/{uuid}/advance", post(orders::advance))
        .route("/{uuid}/start", post(orders::start))
}

/// Create all routes for the portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Sales dashboard
        .route("/", get(home::home))
        // Order routes
        .nest("/orders", order_routes())
        // Profile routes
        .route("/profile", get(profile::show).post(profile::update))
        // Auth routes
        .nest("/auth", auth_routes())
}
