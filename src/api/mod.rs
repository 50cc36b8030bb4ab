//! # API Module
//!
//! Business logic for the vaccine certificate backend.
//!
//! ## Modules
//!
//! - [`pet`] - Read-only pet directory with its display ordering policy
//! - [`vaccine`] - Vaccine record listing, creation and certificate analysis

pub mod pet;
pub mod vaccine;
