//! # HTTP Server Module
//!
//! JSON-over-HTTP surface of the service, built on axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/heroes`, `/heroes/{id}` - Hero CRUD
//! - `/powers`, `/powers/{id}` - Power CRUD
//! - `/hero_powers`, `/hero_powers/{id}` - Link CRUD and filtered listing
//! - `/search` - Free-text search across entity classes
//! - `/stats` - Totals and rankings

pub mod config;
pub mod errors;
pub mod hero_power_routes;
pub mod hero_routes;
pub mod observability_routes;
pub mod params;
pub mod power_routes;
pub mod response;
pub mod search_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
pub use state::AppState;
