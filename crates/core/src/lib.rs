//! Brasa Core - Shared types and order-workflow logic.
//!
//! This crate provides the common vocabulary used by the Brasa employee
//! portal. The restaurant backend owns all state; everything here is derived
//! from its responses.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, order statuses, employee roles
//! - [`workflow`] - Status mapping and the fixed order-status transition table
//! - [`order`] - Normalization of raw backend order records into [`order::CanonicalOrder`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod order;
pub mod types;
pub mod workflow;

pub use order::{CanonicalOrder, normalize, normalize_at};
pub use types::*;
pub use workflow::{StepId, WorkflowStep, backend_status, display_status, next_step};
