// subscope-api: Async Rust client for the subscope backend HTTP API.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod auth;
mod domains;
mod profile;
mod search;

pub use client::ApiClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
