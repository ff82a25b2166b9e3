//! A shopping cart item service.
//!
//! Items are stored in Postgres and exposed over a small CRUD HTTP API
//! built with [`axum`].

pub mod feature;
pub mod infra;
pub mod server;
