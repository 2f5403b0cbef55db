//! Request-independent operations shared by the route handlers.

pub mod chat;
pub mod files;
pub mod project;
