//! Sales dashboard route handlers.
//!
//! All aggregates come precomputed from the backend; this page only fetches
//! and lays them out, with simple page-windowing over the longer reports.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::backend::SalesRow;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentEmployee;
use crate::state::AppState;

/// Rows shown per report section.
const ITEMS_PER_PAGE: usize = 6;

/// Query parameters: one page number per paginated section.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub clientes: Option<usize>,
    pub combos: Option<usize>,
    pub restaurantes: Option<usize>,
}

/// One page window over a report.
pub struct Paginated {
    pub rows: Vec<SalesRow>,
    pub page: usize,
    pub total_pages: usize,
}

impl Paginated {
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub employee: CurrentEmployee,
    pub sales_by_status: Vec<SalesRow>,
    pub sales_by_customer: Paginated,
    pub sales_by_combo: Paginated,
    pub margins_by_tenant: Paginated,
    pub error: Option<String>,
}

/// Display the sales dashboard.
///
/// Report sections degrade independently: a failing report leaves its
/// section empty and surfaces one error banner, the rest still render.
pub async fn home(
    State(state): State<AppState>,
    RequireAuth(employee): RequireAuth,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let backend = state.backend();
    let mut error = None;

    let sales_by_status = backend.sales_by_status().await.unwrap_or_else(|err| {
        error.get_or_insert(err.to_string());
        Vec::new()
    });
    let sales_by_customer = backend.sales_by_customer().await.unwrap_or_else(|err| {
        error.get_or_insert(err.to_string());
        Vec::new()
    });
    let sales_by_combo = backend.sales_by_combo().await.unwrap_or_else(|err| {
        error.get_or_insert(err.to_string());
        Vec::new()
    });
    let margins_by_tenant = backend.margins_by_tenant().await.unwrap_or_else(|err| {
        error.get_or_insert(err.to_string());
        Vec::new()
    });

    HomeTemplate {
        employee,
        sales_by_status,
        sales_by_customer: paginate(sales_by_customer, query.clientes.unwrap_or(1)),
        sales_by_combo: paginate(sales_by_combo, query.combos.unwrap_or(1)),
        margins_by_tenant: paginate(margins_by_tenant, query.restaurantes.unwrap_or(1)),
        error,
    }
}

/// Clamp the page into range and cut the window.
fn paginate(rows: Vec<SalesRow>, page: usize) -> Paginated {
    let total_pages = rows.len().div_ceil(ITEMS_PER_PAGE).max(1);
    let page = page.clamp(1, total_pages);
    let rows = rows
        .into_iter()
        .skip((page - 1) * ITEMS_PER_PAGE)
        .take(ITEMS_PER_PAGE)
        .collect();

    Paginated {
        rows,
        page,
        total_pages,
    }
}
