//! HealthChain Client Test Suite
//!
//! End-to-end tests for the client core against the scripted gateway:
//! - Role resolution order and failure degradation
//! - Session supersession on account switch and disconnect
//! - Access-code countdown lifecycle, expiry confirmation, cancellation
//! - Route guard decisions per page requirement
//! - Configuration loading and the configured admin set
//! - Dashboard operations: registration, lookup, record update, routing

pub mod support;

pub mod config;
pub mod operations;
pub mod roles;
