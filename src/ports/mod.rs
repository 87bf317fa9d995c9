//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Transport` - Issues one request against the payment API

mod transport;

pub use transport::{ApiRequest, Method, Transport};
