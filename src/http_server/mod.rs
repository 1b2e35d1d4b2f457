//! # rollbook HTTP Server Module
//!
//! Combines the record-service router with health checks, CORS and request
//! tracing into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/students` - Student records

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use observability_routes::HealthResponse;
pub use server::HttpServer;
