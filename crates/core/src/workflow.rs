//! Order-status workflow.
//!
//! An order moves through a fixed linear pipeline:
//!
//! ```text
//! PAGADO -> COCINA -> EMPAQUETAMIENTO -> DELIVERY -> ENTREGADO
//! ```
//!
//! Each transition is performed by confirming a named step against the
//! workflow service. Exactly one step leaves each non-terminal status;
//! `ENTREGADO` has no outgoing step. All functions here are pure - the
//! transition itself only happens when the backend accepts the confirmation.

use serde::{Deserialize, Serialize};

use crate::types::{EmployeeRole, OrderStatus};

/// Display token for a status the backend never defined.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// A named workflow step advancing an order to the next status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    /// Kitchen finished; confirmed by `cocinero`.
    CocinaLista,
    /// Packaging finished; confirmed by `empaque`.
    EmpaquetamientoListo,
    /// Order handed to the customer; confirmed by `repartidor`.
    DeliveryEntregado,
}

impl StepId {
    /// Wire name sent to the workflow service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CocinaLista => "cocina-lista",
            Self::EmpaquetamientoListo => "empaquetamiento-listo",
            Self::DeliveryEntregado => "delivery-entregado",
        }
    }

    /// The role allowed to confirm this step.
    ///
    /// `administrador` is additionally allowed to confirm every step; use
    /// [`EmployeeRole::may_confirm`] for the full check.
    #[must_use]
    pub const fn authorized_role(self) -> EmployeeRole {
        match self {
            Self::CocinaLista => EmployeeRole::Cocinero,
            Self::EmpaquetamientoListo => EmployeeRole::Empaque,
            Self::DeliveryEntregado => EmployeeRole::Repartidor,
        }
    }

    /// Step-specific payload fields the confirmation call must carry.
    ///
    /// Every payload additionally carries `tenant_id`, `uuid` and `paso`
    /// unconditionally.
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::CocinaLista => &["id_empleado"],
            Self::EmpaquetamientoListo => &["id_empleado", "cliente_email", "origen", "destino"],
            Self::DeliveryEntregado => {
                &["cliente_email", "origen", "destino", "repartidor", "id_repartidor"]
            }
        }
    }

    /// Whether confirming this step needs the session's employee id.
    #[must_use]
    pub const fn needs_employee_id(self) -> bool {
        matches!(self, Self::CocinaLista | Self::EmpaquetamientoListo)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EmployeeRole {
    /// Whether this role may confirm the given step.
    ///
    /// The portal consults this before exposing the advance action; the
    /// workflow service re-checks on its side.
    #[must_use]
    pub fn may_confirm(self, step: StepId) -> bool {
        self.is_admin() || self == step.authorized_role()
    }
}

/// A transition descriptor: the step to confirm and the status it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Step to send to the workflow service.
    pub step: StepId,
    /// Status the order will be in once the step is accepted.
    pub resulting_status: OrderStatus,
}

/// Map a backend status token to its display form.
///
/// Empty or absent input maps to [`UNKNOWN_STATUS`]; anything else is
/// upper-cased unchanged. Display and backend status share the same
/// vocabulary - this is a normalization point, not a translation table.
#[must_use]
pub fn display_status(backend: Option<&str>) -> String {
    match backend {
        Some(token) if !token.is_empty() => token.to_uppercase(),
        _ => UNKNOWN_STATUS.to_owned(),
    }
}

/// Map a display status token back to its backend form.
///
/// Inverse of [`display_status`] by construction: `None` for empty/absent
/// input, upper-cased otherwise.
#[must_use]
pub fn backend_status(display: Option<&str>) -> Option<String> {
    match display {
        Some(token) if !token.is_empty() => Some(token.to_uppercase()),
        _ => None,
    }
}

/// Next workflow step for an order in the given backend status.
///
/// Case-insensitive on the input token. Returns `None` for the terminal
/// `ENTREGADO` status, for absent input, and for any unrecognized token.
#[must_use]
pub fn next_step(current: Option<&str>) -> Option<WorkflowStep> {
    let (step, resulting_status) = match OrderStatus::parse(current?)? {
        OrderStatus::Pagado => (StepId::CocinaLista, OrderStatus::Cocina),
        OrderStatus::Cocina => (StepId::CocinaLista, OrderStatus::Empaquetamiento),
        OrderStatus::Empaquetamiento => (StepId::EmpaquetamientoListo, OrderStatus::Delivery),
        OrderStatus::Delivery => (StepId::DeliveryEntregado, OrderStatus::Entregado),
        OrderStatus::Entregado => return None,
    };

    Some(WorkflowStep {
        step,
        resulting_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_step_table() {
        let cases = [
            ("PAGADO", StepId::CocinaLista, OrderStatus::Cocina),
            ("COCINA", StepId::CocinaLista, OrderStatus::Empaquetamiento),
            ("EMPAQUETAMIENTO", StepId::EmpaquetamientoListo, OrderStatus::Delivery),
            ("DELIVERY", StepId::DeliveryEntregado, OrderStatus::Entregado),
        ];

        for (status, step, resulting) in cases {
            let ws = next_step(Some(status)).expect(status);
            assert_eq!(ws.step, step);
            assert_eq!(ws.resulting_status, resulting);
        }
    }

    #[test]
    fn test_next_step_is_case_insensitive() {
        assert_eq!(next_step(Some("cocina")), next_step(Some("COCINA")));
        assert_eq!(next_step(Some("Pagado")), next_step(Some("PAGADO")));
    }

    #[test]
    fn test_next_step_terminal_and_unknown() {
        assert_eq!(next_step(Some("ENTREGADO")), None);
        assert_eq!(next_step(Some("entregado")), None);
        assert_eq!(next_step(None), None);
        assert_eq!(next_step(Some("bogus")), None);
        assert_eq!(next_step(Some("")), None);
    }

    #[test]
    fn test_display_status() {
        assert_eq!(display_status(Some("cocina")), "COCINA");
        assert_eq!(display_status(Some("COCINA")), "COCINA");
        assert_eq!(display_status(Some("")), UNKNOWN_STATUS);
        assert_eq!(display_status(None), UNKNOWN_STATUS);
    }

    #[test]
    fn test_display_status_is_idempotent() {
        for token in ["pagado", "COCINA", "Delivery", "bogus"] {
            let once = display_status(Some(token));
            assert_eq!(display_status(Some(&once)), once);
        }
    }

    #[test]
    fn test_backend_status() {
        assert_eq!(backend_status(Some("cocina")).as_deref(), Some("COCINA"));
        assert_eq!(backend_status(Some("")), None);
        assert_eq!(backend_status(None), None);
    }

    #[test]
    fn test_authorized_roles() {
        assert!(EmployeeRole::Cocinero.may_confirm(StepId::CocinaLista));
        assert!(EmployeeRole::Empaque.may_confirm(StepId::EmpaquetamientoListo));
        assert!(EmployeeRole::Repartidor.may_confirm(StepId::DeliveryEntregado));

        assert!(!EmployeeRole::Empaque.may_confirm(StepId::CocinaLista));
        assert!(!EmployeeRole::Repartidor.may_confirm(StepId::CocinaLista));
        assert!(!EmployeeRole::Cocinero.may_confirm(StepId::DeliveryEntregado));
    }

    #[test]
    fn test_administrador_confirms_everything() {
        for step in [
            StepId::CocinaLista,
            StepId::EmpaquetamientoListo,
            StepId::DeliveryEntregado,
        ] {
            assert!(EmployeeRole::Administrador.may_confirm(step));
        }
    }

    #[test]
    fn test_required_fields_per_step() {
        assert_eq!(StepId::CocinaLista.required_fields(), &["id_empleado"]);
        assert_eq!(
            StepId::EmpaquetamientoListo.required_fields(),
            &["id_empleado", "cliente_email", "origen", "destino"]
        );
        assert_eq!(
            StepId::DeliveryEntregado.required_fields(),
            &["cliente_email", "origen", "destino", "repartidor", "id_repartidor"]
        );
        assert!(!StepId::DeliveryEntregado.needs_employee_id());
    }

    #[test]
    fn test_step_wire_names() {
        let json = serde_json::to_string(&StepId::EmpaquetamientoListo).expect("serialize");
        assert_eq!(json, "\"empaquetamiento-listo\"");
        assert_eq!(StepId::CocinaLista.as_str(), "cocina-lista");
    }
}
