//! Workflow transition endpoints.

use serde_json::{Map, Value, json};

use brasa_core::{CanonicalOrder, EmployeeId, StepId};

use super::{BackendClient, BackendError};

/// Origin address used when an order carries none.
pub const DEFAULT_ORIGIN: &str = "LIMA - CENTRO, Av. Arequipa 123, Lima";
/// Destination used when an order carries none.
pub const DEFAULT_DESTINATION: &str = "MENDRANO SILVA";
/// Courier name used when an order carries none.
const DEFAULT_COURIER_NAME: &str = "Repartidor Default";
/// Courier id used when an order carries none.
const DEFAULT_COURIER_ID: &str = "REP-001";

impl BackendClient {
    /// Confirm a workflow step for an order.
    ///
    /// Identifier checks happen client-side before any network call: the
    /// tenant and uuid must come from the order, and the kitchen/packaging
    /// steps additionally need the session's employee id.
    ///
    /// # Errors
    ///
    /// [`BackendError::MissingIdentifier`] before the call,
    /// [`BackendError::AlreadyProcessed`] when the transition already
    /// happened server-side (callers re-fetch instead of failing), or the
    /// transport/API error otherwise.
    pub async fn confirm_step(
        &self,
        order: &CanonicalOrder,
        step: StepId,
        employee_id: &EmployeeId,
    ) -> Result<(), BackendError> {
        let body = confirm_payload(order, step, employee_id)?;
        let url = format!("{}/workflow/confirmar", self.config().workflow_url);
        self.post_json(&url, &Value::Object(body)).await.map(drop)
    }

    /// Start the workflow for a paid order.
    ///
    /// Only ever invoked explicitly, never automatically, and only exposed
    /// to administrators in the UI. A second start for the same order while
    /// one is in flight fails immediately with
    /// [`BackendError::WorkflowInProgress`]; starts for different orders do
    /// not block each other.
    ///
    /// # Errors
    ///
    /// See [`BackendClient::confirm_step`] for the identifier checks.
    pub async fn start_workflow(&self, order: &CanonicalOrder) -> Result<(), BackendError> {
        let tenant = required_tenant(order)?;
        if order.id.is_empty() {
            return Err(BackendError::MissingIdentifier("uuid"));
        }

        let _guard = self.begin_workflow_start(&order.id)?;

        let body = json!({
            "tenant_id": tenant,
            "uuid": order.id,
            "cliente_email": order.customer_email.as_deref().unwrap_or_default(),
            "origen": order.origin_address.as_deref().unwrap_or(DEFAULT_ORIGIN),
            "destino": order.destination_address.as_deref().unwrap_or(DEFAULT_DESTINATION),
        });
        let url = format!("{}/workflow/iniciar", self.config().workflow_url);
        self.post_json(&url, &body).await.map(drop)
    }
}

fn required_tenant(order: &CanonicalOrder) -> Result<&str, BackendError> {
    order
        .tenant_id
        .as_ref()
        .map(brasa_core::TenantId::as_str)
        .filter(|tenant| !tenant.is_empty())
        .ok_or(BackendError::MissingIdentifier("tenant_id"))
}

/// Build the confirmation payload: `{tenant_id, uuid, paso}` plus the
/// step-specific required fields.
fn confirm_payload(
    order: &CanonicalOrder,
    step: StepId,
    employee_id: &EmployeeId,
) -> Result<Map<String, Value>, BackendError> {
    let tenant = required_tenant(order)?;
    if order.id.is_empty() {
        return Err(BackendError::MissingIdentifier("uuid"));
    }
    if step.needs_employee_id() && employee_id.is_empty() {
        return Err(BackendError::MissingIdentifier("id_empleado"));
    }

    let mut body = Map::new();
    body.insert("tenant_id".to_owned(), json!(tenant));
    body.insert("uuid".to_owned(), json!(order.id));
    body.insert("paso".to_owned(), json!(step));

    match step {
        StepId::CocinaLista => {
            body.insert("id_empleado".to_owned(), json!(employee_id));
        }
        StepId::EmpaquetamientoListo => {
            body.insert("id_empleado".to_owned(), json!(employee_id));
            insert_delivery_fields(&mut body, order);
        }
        StepId::DeliveryEntregado => {
            insert_delivery_fields(&mut body, order);
            body.insert(
                "repartidor".to_owned(),
                json!(order.courier_name.as_deref().unwrap_or(DEFAULT_COURIER_NAME)),
            );
            body.insert(
                "id_repartidor".to_owned(),
                json!(order.courier_id.as_deref().unwrap_or(DEFAULT_COURIER_ID)),
            );
        }
    }

    Ok(body)
}

fn insert_delivery_fields(body: &mut Map<String, Value>, order: &CanonicalOrder) {
    body.insert(
        "cliente_email".to_owned(),
        json!(order.customer_email.as_deref().unwrap_or_default()),
    );
    body.insert(
        "origen".to_owned(),
        json!(order.origin_address.as_deref().unwrap_or(DEFAULT_ORIGIN)),
    );
    body.insert(
        "destino".to_owned(),
        json!(order.destination_address.as_deref().unwrap_or(DEFAULT_DESTINATION)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use brasa_core::normalize_at;
    use chrono::NaiveDate;
    use serde_json::json;

    fn order(raw: serde_json::Value) -> CanonicalOrder {
        let noon = NaiveDate::from_ymd_opt(2026, 8, 5)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time");
        normalize_at(&raw, noon)
    }

    fn kitchen_order() -> CanonicalOrder {
        order(json!({
            "uuid": "abc-123",
            "tenant_id": "restaurante_central_01",
            "estado_pedido": "COCINA",
            "cliente_email": "ana@mail.com"
        }))
    }

    #[test]
    fn test_cocina_payload_carries_employee_and_no_delivery_fields() {
        let body = confirm_payload(
            &kitchen_order(),
            StepId::CocinaLista,
            &EmployeeId::new("EMP-1"),
        )
        .expect("payload");

        assert_eq!(body.get("tenant_id"), Some(&json!("restaurante_central_01")));
        assert_eq!(body.get("uuid"), Some(&json!("abc-123")));
        assert_eq!(body.get("paso"), Some(&json!("cocina-lista")));
        assert_eq!(body.get("id_empleado"), Some(&json!("EMP-1")));
        assert!(body.get("cliente_email").is_none());
        assert!(body.get("repartidor").is_none());
    }

    #[test]
    fn test_empaquetamiento_payload_fields() {
        let body = confirm_payload(
            &kitchen_order(),
            StepId::EmpaquetamientoListo,
            &EmployeeId::new("EMP-1"),
        )
        .expect("payload");

        assert_eq!(body.get("id_empleado"), Some(&json!("EMP-1")));
        assert_eq!(body.get("cliente_email"), Some(&json!("ana@mail.com")));
        assert_eq!(body.get("origen"), Some(&json!(DEFAULT_ORIGIN)));
        assert_eq!(body.get("destino"), Some(&json!(DEFAULT_DESTINATION)));
        assert!(body.get("repartidor").is_none());
    }

    #[test]
    fn test_delivery_payload_has_courier_but_no_employee() {
        let raw = json!({
            "uuid": "abc-123",
            "tenant_id": "restaurante_central_01",
            "estado_pedido": "DELIVERY",
            "delivery": {
                "origen": "Av. Brasil 500",
                "destino": "Calle Lima 42",
                "repartidor": "Jorge",
                "id_repartidor": "REP-7"
            }
        });
        let body = confirm_payload(&order(raw), StepId::DeliveryEntregado, &EmployeeId::new(""))
            .expect("payload");

        assert!(body.get("id_empleado").is_none());
        assert_eq!(body.get("origen"), Some(&json!("Av. Brasil 500")));
        assert_eq!(body.get("destino"), Some(&json!("Calle Lima 42")));
        assert_eq!(body.get("repartidor"), Some(&json!("Jorge")));
        assert_eq!(body.get("id_repartidor"), Some(&json!("REP-7")));
    }

    #[test]
    fn test_missing_tenant_blocks_before_network() {
        let result = confirm_payload(
            &order(json!({"uuid": "abc"})),
            StepId::CocinaLista,
            &EmployeeId::new("EMP-1"),
        );
        assert!(matches!(
            result,
            Err(BackendError::MissingIdentifier("tenant_id"))
        ));
    }

    #[test]
    fn test_missing_uuid_blocks_before_network() {
        let result = confirm_payload(
            &order(json!({"tenant_id": "t"})),
            StepId::CocinaLista,
            &EmployeeId::new("EMP-1"),
        );
        assert!(matches!(result, Err(BackendError::MissingIdentifier("uuid"))));
    }

    #[test]
    fn test_kitchen_order_advances_end_to_end() {
        use brasa_core::{EmployeeRole, OrderStatus, next_step};

        let order = kitchen_order();
        let ws = next_step(order.backend_status.as_deref()).expect("next step");
        assert_eq!(ws.step, StepId::CocinaLista);
        assert_eq!(ws.resulting_status, OrderStatus::Empaquetamiento);
        assert!(EmployeeRole::Cocinero.may_confirm(ws.step));
        assert!(!EmployeeRole::Repartidor.may_confirm(ws.step));

        let body = confirm_payload(&order, ws.step, &EmployeeId::new("EMP-1")).expect("payload");
        assert!(body.contains_key("id_empleado"));
        assert!(!body.contains_key("repartidor"));
        assert!(!body.contains_key("cliente_email"));
    }

    #[test]
    fn test_missing_employee_blocks_kitchen_steps_only() {
        let nobody = EmployeeId::new("");
        assert!(matches!(
            confirm_payload(&kitchen_order(), StepId::CocinaLista, &nobody),
            Err(BackendError::MissingIdentifier("id_empleado"))
        ));
        assert!(matches!(
            confirm_payload(&kitchen_order(), StepId::EmpaquetamientoListo, &nobody),
            Err(BackendError::MissingIdentifier("id_empleado"))
        ));
        assert!(confirm_payload(&kitchen_order(), StepId::DeliveryEntregado, &nobody).is_ok());
    }
}
