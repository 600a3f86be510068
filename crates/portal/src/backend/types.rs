//! Wire types for the restaurant backend.
//!
//! Field names mirror the backend's Spanish wire vocabulary; everything is
//! optional because the service omits fields freely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use brasa_core::EmployeeRole;

/// Order list response: `{"pedidos": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OrdersEnvelope {
    Wrapped {
        #[serde(default)]
        pedidos: Vec<Value>,
    },
    Bare(Vec<Value>),
}

impl OrdersEnvelope {
    /// The raw order records, whatever the wrapping.
    #[must_use]
    pub fn into_orders(self) -> Vec<Value> {
        match self {
            Self::Wrapped { pedidos } => pedidos,
            Self::Bare(orders) => orders,
        }
    }
}

/// Flatten a detail response into one raw order record.
///
/// The detail endpoint returns either a bare order or an envelope
/// `{pedido, cocina, empaquetamiento, delivery}` where the delivery detail
/// lives next to the order rather than inside it. When both exist, the
/// envelope-level detail wins.
#[must_use]
pub fn merge_detail(response: Value) -> Value {
    let Some(envelope) = response.as_object() else {
        return response;
    };
    let Some(pedido) = envelope.get("pedido").filter(|p| p.is_object()) else {
        return response;
    };

    let mut merged = pedido.clone();
    if let (Some(fields), Some(detail)) = (merged.as_object_mut(), envelope.get("delivery")) {
        if detail.is_object() {
            fields.insert("delivery".to_owned(), detail.clone());
        }
    }
    merged
}

/// Response from the employee login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub id_empleado: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
}

impl LoginResponse {
    /// Employee id: `id_empleado` falling back to `id`.
    #[must_use]
    pub fn employee_id(&self) -> Option<&str> {
        self.id_empleado.as_deref().or(self.id.as_deref())
    }

    /// Auth token: `token` falling back to `access_token`.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.token.as_deref().or(self.access_token.as_deref())
    }
}

/// Payload for registering a new employee.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub gmail: String,
    pub nombre: String,
    pub apellidos: String,
    pub tipo_documento: String,
    pub documento: String,
    pub numero: String,
    pub fecha_nacimiento: String,
    pub rol: EmployeeRole,
    pub password: String,
}

/// Employee profile as the backend reports it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeProfile {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellidos: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub gmail: Option<String>,
    #[serde(default)]
    pub rol: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl EmployeeProfile {
    /// Phone number: `numero` falling back to `telefono`.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.numero.as_deref().or(self.telefono.as_deref())
    }

    /// Contact email: `gmail` falling back to the tenant id, which is the
    /// employee's login email.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.gmail.as_deref().or(self.tenant_id.as_deref())
    }

    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        let mut parts = Vec::new();
        if let Some(nombre) = self.nombre.as_deref() {
            parts.push(nombre);
        }
        if let Some(apellidos) = self.apellidos.as_deref() {
            parts.push(apellidos);
        }
        parts.join(" ")
    }
}

/// Editable subset of the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_orders_envelope_wrapped() {
        let envelope: OrdersEnvelope =
            serde_json::from_value(json!({"cantidad": 1, "pedidos": [{"uuid": "a"}]}))
                .expect("parse");
        assert_eq!(envelope.into_orders().len(), 1);
    }

    #[test]
    fn test_orders_envelope_bare_array() {
        let envelope: OrdersEnvelope =
            serde_json::from_value(json!([{"uuid": "a"}, {"uuid": "b"}])).expect("parse");
        assert_eq!(envelope.into_orders().len(), 2);
    }

    #[test]
    fn test_orders_envelope_object_without_pedidos() {
        let envelope: OrdersEnvelope = serde_json::from_value(json!({"otra": true})).expect("parse");
        assert!(envelope.into_orders().is_empty());
    }

    #[test]
    fn test_merge_detail_bare_order_passes_through() {
        let raw = json!({"uuid": "a", "estado_pedido": "COCINA"});
        assert_eq!(merge_detail(raw.clone()), raw);
    }

    #[test]
    fn test_merge_detail_unwraps_pedido_and_overlays_delivery() {
        let merged = merge_detail(json!({
            "pedido": {"uuid": "a", "estado_pedido": "DELIVERY"},
            "cocina": {"listo": true},
            "delivery": {"origen": "LIMA", "destino": "SURCO"}
        }));
        assert_eq!(merged.get("uuid").and_then(Value::as_str), Some("a"));
        assert_eq!(
            merged.pointer("/delivery/destino").and_then(Value::as_str),
            Some("SURCO")
        );
        assert!(merged.get("cocina").is_none());
    }

    #[test]
    fn test_login_response_fallbacks() {
        let response: LoginResponse = serde_json::from_value(json!({
            "access_token": "tok",
            "id": "EMP-9"
        }))
        .expect("parse");
        assert_eq!(response.auth_token(), Some("tok"));
        assert_eq!(response.employee_id(), Some("EMP-9"));
    }

    #[test]
    fn test_profile_phone_fallback() {
        let profile: EmployeeProfile =
            serde_json::from_value(json!({"telefono": "999111222"})).expect("parse");
        assert_eq!(profile.phone(), Some("999111222"));

        let profile: EmployeeProfile =
            serde_json::from_value(json!({"numero": "111", "telefono": "222"})).expect("parse");
        assert_eq!(profile.phone(), Some("111"));
    }

    #[test]
    fn test_profile_update_skips_absent_fields() {
        let update = ProfileUpdate {
            nombre: Some("Ana".to_owned()),
            ..ProfileUpdate::default()
        };
        let value = serde_json::to_value(&update).expect("serialize");
        assert_eq!(value, json!({"nombre": "Ana"}));
    }
}
