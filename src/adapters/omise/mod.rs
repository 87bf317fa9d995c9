//! Omise API transport adapters.
//!
//! Implements the `Transport` port for the Omise REST API:
//! - `HttpTransport` - reqwest client with basic auth and version pinning
//! - `MockTransport` - in-memory fixtures and call log for tests
//!
//! # Security
//!
//! - The secret key is held in a `secrecy::SecretString` and only exposed
//!   when building the `Authorization` header

mod http_transport;
mod mock_transport;
mod query;

pub use http_transport::{HttpTransport, TransportConfig, API_VERSION_HEADER, DEFAULT_API_URL};
pub use mock_transport::{MockTransport, RecordedCall};
pub use query::flatten_params;
