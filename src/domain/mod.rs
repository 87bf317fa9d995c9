//! Domain layer - typed facades over API resources.
//!
//! Every entity is an attribute bag plus a [`Client`](crate::Client) handle,
//! so it can reload, mutate and expand itself. Nothing here knows about HTTP;
//! requests go through the [`Transport`](crate::ports::Transport) port.

mod card;
mod charge;
mod customer;
mod errors;
mod list;
mod object;
mod refund;
mod search;
mod transaction;

pub use card::{Card, CardList};
pub use charge::{Charge, ChargeStatus};
pub use customer::Customer;
pub use errors::{OmiseError, OmiseErrorCode, Result};
pub use list::{List, Order, DEFAULT_LIMIT};
pub use object::{location, params, Attributes, Endpoint, OmiseObject, Resource};
pub use refund::{Refund, RefundList};
pub use search::{SearchResult, SearchScope, SEARCH_ENDPOINT};
pub use transaction::{Direction, Transaction};
