//! Newtype IDs for type-safe entity references.
//!
//! Backend identifiers are opaque strings (the tenant id is the employee's
//! email, order uuids come from the order service). Use the `define_id!`
//! macro to create type-safe wrappers that prevent accidentally mixing them.

/// Macro to define a type-safe ID wrapper around an opaque backend string.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `is_empty()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use brasa_core::define_id;
/// define_id!(TenantId);
/// define_id!(OrderUuid);
///
/// let tenant = TenantId::new("restaurante_central_01");
/// let order = OrderUuid::new("9f0c2a1e");
///
/// // These are different types, so this won't compile:
/// // let _: TenantId = order;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the ID is the empty string.
            ///
            /// The backend hands out empty identifiers when a session field
            /// was never populated; callers must treat those as absent.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(TenantId);
define_id!(EmployeeId);
define_id!(OrderUuid);
define_id!(CourierId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let tenant = TenantId::new("restaurante_central_01");
        assert_eq!(tenant.as_str(), "restaurante_central_01");
        assert_eq!(tenant.to_string(), "restaurante_central_01");
        assert_eq!(String::from(tenant), "restaurante_central_01");
    }

    #[test]
    fn test_empty_id_is_absent() {
        assert!(EmployeeId::new("").is_empty());
        assert!(!EmployeeId::new("EMP-001").is_empty());
    }

    #[test]
    fn test_serde_transparent() {
        let uuid = OrderUuid::new("9f0c2a1e-5b7d-4c3a-9e1f-000000000001");
        let json = serde_json::to_string(&uuid).expect("serialize");
        assert_eq!(json, "\"9f0c2a1e-5b7d-4c3a-9e1f-000000000001\"");
    }
}
