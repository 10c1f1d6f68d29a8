//! HTTP API server

pub mod routes;
pub mod server;
pub mod validate;

pub use server::*;
