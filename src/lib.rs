//! Omise - typed resource client for the Omise payment API
//!
//! Wraps the REST API in resource types (customers, cards, charges, refunds
//! and transactions) that carry their raw JSON attributes, know their own
//! location, and lazily expand references to related resources.
//!
//! ```no_run
//! use omise::{params, Client, Customer};
//! use omise::adapters::omise::TransportConfig;
//! use omise::adapters::HttpTransport;
//! use serde_json::json;
//!
//! # async fn run() -> omise::Result<()> {
//! let transport = HttpTransport::new(TransportConfig::new("skey_test_xxx"))?;
//! let client = Client::new(transport);
//!
//! let mut customer = Customer::retrieve(&client, "cust_test_1", params(json!({}))).await?;
//! if let Some(card) = customer.default_card(params(json!({}))).await? {
//!     println!("{:?}", card.last_digits());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use client::Client;
pub use domain::{
    params, Attributes, Card, CardList, Charge, ChargeStatus, Customer, Direction, Endpoint, List,
    OmiseError, OmiseErrorCode, OmiseObject, Order, Refund, RefundList, Resource, Result,
    SearchResult, SearchScope, Transaction,
};
