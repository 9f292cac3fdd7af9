// panodiff-api: Async Rust client for the PAN-OS Panorama XML API

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ConfigKind, PanoramaClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
