//! Sales report endpoints.
//!
//! The aggregates are computed entirely by the backend; the portal only
//! fetches and displays them. Endpoint paths and row shapes are inherited
//! as-is, inconsistent casing included.

use serde_json::Value;

use super::{BackendClient, BackendError};

/// One row of a sales report.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    /// What the row aggregates over (a status, customer, combo or tenant).
    pub label: String,
    /// Total sales amount.
    pub total_sales: f64,
    /// Units sold, where the report carries it.
    pub units: Option<u64>,
    /// Order count, where the report carries it.
    pub order_count: Option<u64>,
}

impl BackendClient {
    /// Sales totals grouped by order status.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn sales_by_status(&self) -> Result<Vec<SalesRow>, BackendError> {
        self.report(
            "Ventas_por_Estado",
            "ventas_por_estado",
            &["estado_pedido", "estado", "Estado"],
            "Estado",
        )
        .await
    }

    /// Sales totals grouped by customer.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn sales_by_customer(&self) -> Result<Vec<SalesRow>, BackendError> {
        self.report(
            "ventas_por_segmentos",
            "ventas_por_cliente",
            &["cliente_email", "cliente"],
            "Cliente",
        )
        .await
    }

    /// Sales totals grouped by combo.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn sales_by_combo(&self) -> Result<Vec<SalesRow>, BackendError> {
        self.report(
            "Ventas_por_Combinacion",
            "ventas_por_combo",
            &["combo", "combinacion"],
            "Combo",
        )
        .await
    }

    /// Sales totals and order counts grouped by restaurant.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn margins_by_tenant(&self) -> Result<Vec<SalesRow>, BackendError> {
        self.report(
            "margenes_por_ganancia",
            "ventas_por_tenant",
            &["tenant_id", "restaurante"],
            "Restaurante",
        )
        .await
    }

    async fn report(
        &self,
        endpoint: &str,
        envelope_key: &str,
        label_keys: &[&str],
        default_label: &str,
    ) -> Result<Vec<SalesRow>, BackendError> {
        let url = format!("{}/recursos/{endpoint}", self.config().employees_url);
        let payload = self.get_json(&url).await?;
        Ok(report_rows(&payload, envelope_key, label_keys, default_label))
    }
}

/// Rows from a keyed envelope or a bare array; anything else is empty.
fn report_rows(
    payload: &Value,
    envelope_key: &str,
    label_keys: &[&str],
    default_label: &str,
) -> Vec<SalesRow> {
    let rows = payload
        .get(envelope_key)
        .and_then(Value::as_array)
        .or_else(|| payload.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    rows.iter()
        .map(|item| SalesRow {
            label: label_keys
                .iter()
                .find_map(|key| item.get(*key).and_then(Value::as_str))
                .unwrap_or(default_label)
                .to_owned(),
            total_sales: ["total_ventas", "totalVentas", "ventas", "Ventas", "total"]
                .iter()
                .find_map(|key| item.get(*key).and_then(Value::as_f64))
                .unwrap_or(0.0),
            units: item.get("cantidad_vendida").and_then(Value::as_u64),
            order_count: item.get("cantidad_pedidos").and_then(Value::as_u64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyed_envelope() {
        let rows = report_rows(
            &json!({"ventas_por_estado": [
                {"estado_pedido": "COCINA", "total_ventas": 120.5},
                {"estado": "DELIVERY", "total": 80}
            ]}),
            "ventas_por_estado",
            &["estado_pedido", "estado"],
            "Estado",
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "COCINA");
        assert!((rows[0].total_sales - 120.5).abs() < f64::EPSILON);
        assert_eq!(rows[1].label, "DELIVERY");
        assert!((rows[1].total_sales - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bare_array() {
        let rows = report_rows(
            &json!([{"combo": "Duo Bravazo", "totalVentas": 45, "cantidad_vendida": 3}]),
            "ventas_por_combo",
            &["combo"],
            "Combo",
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].units, Some(3));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let rows = report_rows(
            &json!([{}]),
            "ventas_por_combo",
            &["combo"],
            "Combo",
        );
        assert_eq!(rows[0].label, "Combo");
        assert!((rows[0].total_sales - 0.0).abs() < f64::EPSILON);
        assert_eq!(rows[0].units, None);
        assert_eq!(rows[0].order_count, None);
    }

    #[test]
    fn test_unrecognized_payload_is_empty() {
        assert!(report_rows(&json!("nope"), "k", &["x"], "X").is_empty());
        assert!(report_rows(&json!({"otra_clave": 1}), "k", &["x"], "X").is_empty());
    }
}
