//! Order list, detail and workflow route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use brasa_core::{CanonicalOrder, OrderStatus, OrderUuid, WorkflowStep, next_step};

use crate::backend::BackendError;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentEmployee;
use crate::state::AppState;

/// Filter label meaning "no status filter".
const FILTER_ALL: &str = "Todos";

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for the order list.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    /// Status filter button; `Todos` or absent means everything.
    pub estado: Option<String>,
    /// Free-text search over name and description.
    pub q: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Order list page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub employee: CurrentEmployee,
    pub orders: Vec<CanonicalOrder>,
    pub filter: String,
    pub search: String,
    pub error: Option<String>,
}

/// One status filter button.
pub struct FilterButton {
    pub label: &'static str,
    pub active: bool,
}

impl OrdersIndexTemplate {
    /// Status filter buttons, in workflow order, with the active one marked.
    #[must_use]
    pub fn filter_buttons(&self) -> Vec<FilterButton> {
        std::iter::once(FILTER_ALL)
            .chain(OrderStatus::ALL.iter().map(|status| status.as_str()))
            .map(|label| FilterButton {
                label,
                active: self.filter.eq_ignore_ascii_case(label),
            })
            .collect()
    }
}

/// Order detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderDetailTemplate {
    pub employee: CurrentEmployee,
    pub order: CanonicalOrder,
    pub next: Option<WorkflowStep>,
    /// Whether the advance action is shown. Hidden, not disabled, for
    /// unauthorized roles; administrators always pass.
    pub can_advance: bool,
    /// Whether the start-workflow action is shown (administrators, on paid
    /// orders that have not entered the pipeline yet).
    pub can_start: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the order list, filtered and searched.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(employee): RequireAuth,
    Query(query): Query<OrdersQuery>,
) -> impl IntoResponse {
    let filter = query
        .estado
        .filter(|estado| !estado.is_empty())
        .unwrap_or_else(|| FILTER_ALL.to_owned());
    let statuses: Vec<OrderStatus> = OrderStatus::parse(&filter).into_iter().collect();
    let search = query.q.unwrap_or_default();

    match state.backend().list_orders(&statuses, None, None).await {
        Ok(mut orders) => {
            if !search.is_empty() {
                let needle = search.to_lowercase();
                orders.retain(|order| {
                    order.display_name().to_lowercase().contains(&needle)
                        || order.description.to_lowercase().contains(&needle)
                });
            }
            OrdersIndexTemplate {
                employee,
                orders,
                filter,
                search,
                error: None,
            }
        }
        Err(err) => OrdersIndexTemplate {
            employee,
            orders: Vec::new(),
            filter,
            search,
            error: Some(err.to_string()),
        },
    }
}

/// Display one order.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(employee): RequireAuth,
    Path(uuid): Path<String>,
) -> Response {
    detail_response(&state, employee, &OrderUuid::new(uuid), None, None).await
}

/// Confirm the next workflow step for an order.
///
/// The confirmation is awaited before the state is re-fetched, and the
/// fresh state is rendered directly. A step the backend reports as already
/// processed is treated as recovered, not fatal.
pub async fn advance(
    State(state): State<AppState>,
    RequireAuth(employee): RequireAuth,
    Path(uuid): Path<String>,
) -> Response {
    let uuid = OrderUuid::new(uuid);
    let order = match state.backend().get_order(&uuid, None).await {
        Ok(order) => order,
        Err(err) => return AppError::from(err).into_response(),
    };

    let Some(step) = next_step(order.backend_status.as_deref()) else {
        return AppError::BadRequest("El pedido no tiene un siguiente paso".to_owned())
            .into_response();
    };

    if !employee.role.may_confirm(step.step) {
        return AppError::Unauthorized("Tu rol no puede confirmar este paso".to_owned())
            .into_response();
    }

    match state
        .backend()
        .confirm_step(&order, step.step, &employee.employee_id)
        .await
    {
        Ok(()) => {
            tracing::info!(uuid = %uuid, step = %step.step, "workflow step confirmed");
            let notice = Some(format!(
                "Paso confirmado. El pedido pasa a {}.",
                step.resulting_status
            ));
            detail_response(&state, employee, &uuid, notice, None).await
        }
        Err(err @ BackendError::AlreadyProcessed) => {
            tracing::warn!(uuid = %uuid, step = %step.step, "step already processed, re-fetching");
            let notice = Some(format!("{err}. Mostrando el estado actual."));
            detail_response(&state, employee, &uuid, notice, None).await
        }
        Err(err) => {
            let error = Some(err.to_string());
            detail_response(&state, employee, &uuid, None, error).await
        }
    }
}

/// Start the workflow for a paid order. Administrators only.
pub async fn start(
    State(state): State<AppState>,
    RequireAuth(employee): RequireAuth,
    Path(uuid): Path<String>,
) -> Response {
    if !employee.role.is_admin() {
        return AppError::Unauthorized("Solo administradores pueden iniciar el workflow".to_owned())
            .into_response();
    }

    let uuid = OrderUuid::new(uuid);
    let order = match state.backend().get_order(&uuid, None).await {
        Ok(order) => order,
        Err(err) => return AppError::from(err).into_response(),
    };

    match state.backend().start_workflow(&order).await {
        Ok(()) => {
            tracing::info!(uuid = %uuid, "workflow started");
            let notice = Some("Workflow iniciado.".to_owned());
            detail_response(&state, employee, &uuid, notice, None).await
        }
        Err(err) => {
            let error = Some(err.to_string());
            detail_response(&state, employee, &uuid, None, error).await
        }
    }
}

/// Fetch an order and render the detail page.
async fn detail_response(
    state: &AppState,
    employee: CurrentEmployee,
    uuid: &OrderUuid,
    notice: Option<String>,
    error: Option<String>,
) -> Response {
    match state.backend().get_order(uuid, None).await {
        Ok(order) => {
            let next = next_step(order.backend_status.as_deref());
            let can_advance = next.is_some_and(|ws| employee.role.may_confirm(ws.step));
            let can_start =
                employee.role.is_admin() && order.status() == Some(OrderStatus::Pagado);

            OrderDetailTemplate {
                employee,
                order,
                next,
                can_advance,
                can_start,
                notice,
                error,
            }
            .into_response()
        }
        Err(BackendError::OrderNotFound) => {
            AppError::NotFound(format!("Pedido {uuid} no encontrado")).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
