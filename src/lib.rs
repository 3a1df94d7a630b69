//! superheroes - a REST service for heroes, powers, and the powers each
//! hero wields
//!
//! Layers, leaf to root: `model`, `validation`, `store`, `http_server`.
//! `config`, `observability` and `cli` wire them into a process.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod store;
pub mod validation;
