//! Restaurant backend API client.
//!
//! # Architecture
//!
//! The backend is an opaque external service split across several API
//! gateways: order queries, order detail, workflow transitions, and the
//! employee service. This module is the only place that talks to it.
//!
//! Responses are not contractually stable in shape, so every read goes
//! through `brasa_core::normalize` (orders) or a tolerant envelope type
//! (lists, reports) rather than a strict wire schema.
//!
//! # Example
//!
//! ```rust,ignore
//! use brasa_portal::backend::BackendClient;
//!
//! let client = BackendClient::new(&config.backend)?;
//!
//! // List orders still in the kitchen
//! let orders = client.list_orders(&[OrderStatus::Cocina], None, None).await?;
//!
//! // Advance one of them
//! client.confirm_step(&orders[0], StepId::CocinaLista, &employee_id).await?;
//! ```

mod client;
mod employees;
mod orders;
mod reports;
mod types;
mod workflow;

pub use client::BackendClient;
pub use reports::SalesRow;
pub use types::{EmployeeProfile, LoginResponse, OrdersEnvelope, ProfileUpdate, RegisterRequest};
pub use workflow::{DEFAULT_DESTINATION, DEFAULT_ORIGIN};

use thiserror::Error;

/// Errors that can occur when talking to the restaurant backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Could not reach the backend at all. The message is user-facing.
    #[error(
        "Error de conexión: no se pudo conectar con el servidor. \
         Verifica tu conexión a internet o contacta al administrador."
    )]
    Connection(#[source] reqwest::Error),

    /// HTTP-level failure past the connection stage.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The backend answered with an error payload. Surfaced verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The step was already processed or its task timed out server-side.
    /// Recoverable: re-fetch and display current state.
    #[error("El pedido ya fue procesado o el tiempo de espera expiró")]
    AlreadyProcessed,

    /// A workflow start for this order is already in flight.
    #[error("Ya hay un workflow en proceso para este pedido")]
    WorkflowInProgress,

    /// The detail endpoint does not know this order.
    #[error("Pedido no encontrado")]
    OrderNotFound,

    /// A required identifier is missing; checked before any network call.
    #[error("{0} es requerido para esta acción. Por favor, inicia sesión nuevamente.")]
    MissingIdentifier(&'static str),

    /// Response body was not the JSON we expected.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Connection(err)
        } else {
            Self::Http(err)
        }
    }
}
