//! Employee roles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Employee role with different workflow permissions.
///
/// Roles gate which workflow step an employee may confirm from the portal.
/// The check is advisory: the workflow service is the final authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Confirms orders out of the kitchen.
    Cocinero,
    /// Confirms packaging and hands orders to delivery.
    Empaque,
    /// Confirms final delivery to the customer.
    Repartidor,
    /// May confirm any step and start workflows.
    Administrador,
}

/// Error parsing an employee role token.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid employee role: {0}")]
pub struct InvalidRole(pub String);

impl EmployeeRole {
    /// Wire token for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cocinero => "cocinero",
            Self::Empaque => "empaque",
            Self::Repartidor => "repartidor",
            Self::Administrador => "administrador",
        }
    }

    /// Whether this role bypasses all per-step checks.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Administrador)
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EmployeeRole {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cocinero" => Ok(Self::Cocinero),
            "empaque" => Ok(Self::Empaque),
            "repartidor" => Ok(Self::Repartidor),
            "administrador" => Ok(Self::Administrador),
            _ => Err(InvalidRole(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for role in [
            EmployeeRole::Cocinero,
            EmployeeRole::Empaque,
            EmployeeRole::Repartidor,
            EmployeeRole::Administrador,
        ] {
            assert_eq!(role.as_str().parse::<EmployeeRole>(), Ok(role));
        }
    }

    #[test]
    fn test_invalid_role() {
        assert_eq!(
            "gerente".parse::<EmployeeRole>(),
            Err(InvalidRole("gerente".to_owned()))
        );
    }

    #[test]
    fn test_only_administrador_is_admin() {
        assert!(EmployeeRole::Administrador.is_admin());
        assert!(!EmployeeRole::Cocinero.is_admin());
        assert!(!EmployeeRole::Empaque.is_admin());
        assert!(!EmployeeRole::Repartidor.is_admin());
    }
}
