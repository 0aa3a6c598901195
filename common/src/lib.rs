//! Shared building blocks for the integration service.
//!
//! - `models`: wire models and the integration view mapper/validator
//! - `errors`: application error type and HTTP mapping
//! - `config`: environment-driven configuration
//! - `response`: unified response envelope
//! - `middleware`: request tracing middleware

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;

pub use errors::{AppError, AppResult};
