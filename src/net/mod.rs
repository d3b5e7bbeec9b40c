//! Networking modules for the course platform REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls, `error` normalizes failures into a single
//! shape the stores can turn into display strings, and `types` defines the
//! shared wire schema.

pub mod api;
pub mod error;
pub mod types;
