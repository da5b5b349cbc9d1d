//! Internal modules for the tournament records client.
//!
//! This library provides the HTTP API client used by the pt_client binary.

pub mod api_client;
