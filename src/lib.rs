//! pokedex - a CRUD API for Pokemon records over a single-table key-value store
//!
//! The same resource handler serves two transports: a local loopback server
//! with an in-memory store, and a function deployment backed by DynamoDB.

pub mod api;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod lambda;
pub mod logging;
pub mod model;
pub mod seed;
pub mod store;
