//! Raw order normalization.
//!
//! The order service is not contractually stable in its response shape: the
//! same order arrives with different field names and nesting depending on
//! which endpoint produced it. [`normalize`] absorbs that drift into one
//! canonical, UI-ready view-model. It is total - every branch has a terminal
//! fallback, and malformed or missing fields degrade to defaults instead of
//! failing.
//!
//! Each canonical field is computed by one ordered-fallback resolver (first
//! defined value wins) rather than ad-hoc chains at call sites; the resolver
//! is the single documented home for that field's wire variants.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{DeliveryType, OrderStatus, TenantId};
use crate::workflow::display_status;

/// Placeholder description when an order carries no recognizable items.
pub const GENERIC_DESCRIPTION: &str = "Pedido personalizado";

/// Estimated time shown when the status is absent or unrecognized.
pub const DEFAULT_ESTIMATED_TIME: &str = "30-45 min";

/// Abbreviated Spanish month names, as the es-ES locale renders them.
const SPANISH_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Canonical, UI-ready representation of a backend order record.
///
/// Constructed fresh on every fetch or refresh; never patched in place. A
/// state change (e.g. after confirming a workflow step) is reflected by
/// re-running [`normalize`] on a freshly fetched record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalOrder {
    /// Order identifier: `uuid`, falling back to `id`, then `id_pedido`.
    /// Empty when the record carries none of them.
    pub id: String,
    /// Tenant the order belongs to, when reported.
    pub tenant_id: Option<TenantId>,
    /// Upper-cased status for display; `"Unknown"` when absent.
    pub display_status: String,
    /// Status token exactly as the backend reported it.
    pub backend_status: Option<String>,
    /// Estimated time label for the current stage.
    pub estimated_time: String,
    /// Delivery vs pickup, from the truthiness of the `delivery` field.
    pub delivery_type: DeliveryType,
    /// Order date rendered as `day month year, HH:MM` (es-ES).
    pub formatted_date: String,
    /// Comma-joined combo names, or a placeholder.
    pub description: String,
    /// Sum of item prices times quantities, or the flat `precio`, or 0.
    pub total_price: f64,
    /// Loyalty points: rounded price times multiplier, or flat `puntos`, or 0.
    pub loyalty_points: i64,
    /// Customer email, needed to build workflow payloads.
    pub customer_email: Option<String>,
    /// Points multiplier as reported, passed through for display.
    pub points_multiplier: Option<f64>,
    /// Delivery origin address, when the record carries delivery detail.
    pub origin_address: Option<String>,
    /// Delivery destination address.
    pub destination_address: Option<String>,
    /// Courier name.
    pub courier_name: Option<String>,
    /// Courier identifier.
    pub courier_id: Option<String>,
}

impl CanonicalOrder {
    /// Short display name: `Pedido <first 8 chars of the id>...`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.id.is_empty() {
            return "Pedido N/A".to_owned();
        }
        if self.id.chars().count() > 8 {
            let prefix: String = self.id.chars().take(8).collect();
            return format!("Pedido {prefix}...");
        }
        format!("Pedido {}", self.id)
    }

    /// Parsed backend status, when it is one of the five known stages.
    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        self.backend_status.as_deref().and_then(OrderStatus::parse)
    }
}

/// Normalize a raw backend order record into a [`CanonicalOrder`].
///
/// Total function: never fails, for any input including `{}`. The current
/// time is used only as the date fallback when no date field parses.
#[must_use]
pub fn normalize(raw: &Value) -> CanonicalOrder {
    normalize_at(raw, Utc::now().naive_utc())
}

/// [`normalize`] with an explicit clock, for deterministic tests.
#[must_use]
pub fn normalize_at(raw: &Value, now: NaiveDateTime) -> CanonicalOrder {
    let id = string_field(raw, &["uuid", "id", "id_pedido"]);
    let backend_status = string_field(raw, &["estado_pedido", "estado", "status"]);
    let total_price = resolve_total_price(raw);
    let (origin_address, destination_address, courier_name, courier_id) = delivery_detail(raw);

    CanonicalOrder {
        description: resolve_description(raw, id.as_deref()),
        display_status: display_status(backend_status.as_deref()),
        estimated_time: resolve_estimated_time(backend_status.as_deref()),
        delivery_type: resolve_delivery_type(raw),
        formatted_date: format_date(resolve_date(raw, now)),
        loyalty_points: resolve_loyalty_points(raw, total_price),
        total_price,
        tenant_id: string_field(raw, &["tenant_id"]).map(TenantId::new),
        customer_email: string_field(raw, &["cliente_email"]),
        points_multiplier: number_field(raw, &["multiplicador_de_puntos"]),
        id: id.unwrap_or_default(),
        backend_status,
        origin_address,
        destination_address,
        courier_name,
        courier_id,
    }
}

// =============================================================================
// Per-field resolvers
// =============================================================================

/// First key whose value is a non-empty string or a number, as a string.
fn string_field(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// First key whose value is numeric.
fn number_field(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| raw.get(*key).and_then(Value::as_f64))
}

/// Wire truthiness: null, `false`, `0` and `""` are falsy; objects and
/// arrays (empty included) are truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Description: combo names across the `elementos` sequence, legacy
/// single-object combos, or a placeholder.
fn resolve_description(raw: &Value, id: Option<&str>) -> String {
    match raw.get("elementos") {
        Some(Value::Array(items)) if !items.is_empty() => {
            let names: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("combo"))
                .filter_map(Value::as_array)
                .flatten()
                .filter_map(Value::as_str)
                .collect();
            if names.is_empty() {
                GENERIC_DESCRIPTION.to_owned()
            } else {
                names.join(", ")
            }
        }
        Some(Value::Object(elementos)) if elementos.get("combo").is_some_and(is_truthy) => {
            legacy_description(elementos)
        }
        _ => fallback_description(id),
    }
}

/// Legacy shape: `elementos` is a single object with `combo` (objects with
/// `nombre`/`descripcion`) and optionally `productos.hamburguesa`.
fn legacy_description(elementos: &serde_json::Map<String, Value>) -> String {
    let combos: Vec<&str> = elementos
        .get("combo")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|combo| {
            combo
                .get("nombre")
                .and_then(Value::as_str)
                .or_else(|| combo.get("descripcion").and_then(Value::as_str))
        })
        .collect();
    if !combos.is_empty() {
        return combos.join(", ");
    }

    let hamburguesas: Vec<&str> = elementos
        .get("productos")
        .and_then(|p| p.get("hamburguesa"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|h| h.get("nombre").and_then(Value::as_str))
        .collect();
    if hamburguesas.is_empty() {
        GENERIC_DESCRIPTION.to_owned()
    } else {
        hamburguesas.join(", ")
    }
}

fn fallback_description(id: Option<&str>) -> String {
    id.map_or_else(|| GENERIC_DESCRIPTION.to_owned(), |id| format!("Pedido {id}"))
}

/// Total price: per-item `precio * cantidad_combo` over the sequence, or the
/// flat `precio`, or 0. A zero or absent quantity counts as 1.
fn resolve_total_price(raw: &Value) -> f64 {
    match raw.get("elementos") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                let precio = item.get("precio").and_then(Value::as_f64).unwrap_or(0.0);
                let cantidad = item
                    .get("cantidad_combo")
                    .and_then(Value::as_f64)
                    .filter(|qty| *qty != 0.0)
                    .unwrap_or(1.0);
                precio * cantidad
            })
            .sum(),
        _ => number_field(raw, &["precio"]).unwrap_or(0.0),
    }
}

/// Loyalty points: `round(total * multiplicador_de_puntos)` when both are
/// non-zero, else the flat `puntos`, else 0. Rounding is half-away-from-zero.
fn resolve_loyalty_points(raw: &Value, total_price: f64) -> i64 {
    if total_price != 0.0 {
        if let Some(multiplier) = number_field(raw, &["multiplicador_de_puntos"])
            .filter(|m| *m != 0.0)
        {
            return round_points(total_price * multiplier);
        }
    }
    number_field(raw, &["puntos"]).map_or(0, round_points)
}

#[allow(clippy::cast_possible_truncation)] // point totals are far below i64 range
fn round_points(value: f64) -> i64 {
    value.round() as i64
}

fn resolve_delivery_type(raw: &Value) -> DeliveryType {
    if raw.get("delivery").is_some_and(is_truthy) {
        DeliveryType::Delivery
    } else {
        DeliveryType::Pickup
    }
}

fn resolve_estimated_time(backend_status: Option<&str>) -> String {
    backend_status
        .and_then(OrderStatus::parse)
        .map_or(DEFAULT_ESTIMATED_TIME, OrderStatus::estimated_time)
        .to_owned()
}

/// Delivery detail fields from the `delivery` object, when present.
fn delivery_detail(raw: &Value) -> (Option<String>, Option<String>, Option<String>, Option<String>) {
    match raw.get("delivery") {
        Some(detail @ Value::Object(_)) => (
            string_field(detail, &["origen"]),
            string_field(detail, &["destino"]),
            string_field(detail, &["repartidor"]),
            string_field(detail, &["id_repartidor"]),
        ),
        _ => (None, None, None, None),
    }
}

// =============================================================================
// Dates
// =============================================================================

/// First of `fecha_pedido`, `fecha_creacion`, `fecha` that parses; `now`
/// when none do.
fn resolve_date(raw: &Value, now: NaiveDateTime) -> NaiveDateTime {
    ["fecha_pedido", "fecha_creacion", "fecha"]
        .iter()
        .filter_map(|key| raw.get(*key))
        .find_map(parse_date)
        .unwrap_or(now)
}

fn parse_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let ts = n.as_i64()?;
            // Millisecond timestamps are 13 digits for contemporary dates
            let secs = if ts.abs() >= 100_000_000_000 { ts / 1000 } else { ts };
            DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Render as the es-ES locale does: `5 ago 2026, 14:30`.
fn format_date(dt: NaiveDateTime) -> String {
    let month = SPANISH_MONTHS
        .get(dt.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!(
        "{} {} {}, {:02}:{:02}",
        dt.day(),
        month,
        dt.year(),
        dt.hour(),
        dt.minute()
    )
}
