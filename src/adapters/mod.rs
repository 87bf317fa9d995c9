//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `omise` - HTTP and mock transports for the Omise API

pub mod omise;

pub use omise::{HttpTransport, MockTransport, TransportConfig};
