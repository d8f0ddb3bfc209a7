//! Household Tax Engine for Australian earners
//!
//! This crate calculates income tax, the Medicare levy, Division 293 tax,
//! superannuation contributions and the tax benefit of negatively geared
//! investments for a household of one or two earners.
//!
//! The pipeline in [`calculation`] is pure and deterministic: one
//! [`models::HouseholdInput`] and one [`config::TaxConfig`] in, one
//! [`models::HouseholdCalculation`] out. The [`api`] module exposes it over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
