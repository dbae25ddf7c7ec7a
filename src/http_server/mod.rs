//! # Local HTTP Server
//!
//! Serves the Pokemon API on a loopback address with an in-memory store,
//! mirroring the gateway deployment route for route.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/pokemons` - List and create
//! - `/pokemons/{id}` - Get, update, delete

pub mod server;

pub use server::HttpServer;
