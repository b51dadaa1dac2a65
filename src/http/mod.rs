//! Browser dashboard and JSON API

pub mod handler;
pub mod server;

pub use server::{build_router, HttpServer};
