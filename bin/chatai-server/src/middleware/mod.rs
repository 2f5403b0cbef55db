//! HTTP middleware stack: caller identity, per-request trace span, CORS.

pub mod auth;
pub mod cors;
pub mod trace;
