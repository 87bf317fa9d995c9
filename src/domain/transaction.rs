//! Balance transactions.

use serde::{Deserialize, Serialize};

use crate::client::Client;

use super::errors::Result;
use super::list::List;
use super::object::{self, Attributes, Endpoint, OmiseObject, Resource};

/// Whether a transaction adds to or takes from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Credit,
    Debit,
}

/// A movement on the account balance.
#[derive(Debug, Clone)]
pub struct Transaction {
    inner: OmiseObject,
}

impl Resource for Transaction {
    const OBJECT: &'static str = "transaction";

    fn from_object(object: OmiseObject) -> Self {
        Self { inner: object }
    }

    fn as_object(&self) -> &OmiseObject {
        &self.inner
    }
}

impl Endpoint for Transaction {
    const ENDPOINT: &'static str = "/transactions";
}

impl Transaction {
    /// `GET /transactions/{id}`.
    pub async fn retrieve(client: &Client, id: &str, params: Attributes) -> Result<Self> {
        object::retrieve(client, id, params).await
    }

    /// `GET /transactions`.
    pub async fn list(client: &Client, params: Attributes) -> Result<List<Self>> {
        let attributes = client.get(Self::ENDPOINT, params).await?;
        List::from_attributes(client, attributes)
    }

    /// Amount in the smallest currency unit.
    pub fn amount(&self) -> Option<i64> {
        self.inner.i64_attr("amount")
    }

    pub fn currency(&self) -> Option<&str> {
        self.inner.str_attr("currency")
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.inner.str_attr("direction").or_else(|| self.inner.str_attr("type")) {
            Some("credit") => Some(Direction::Credit),
            Some("debit") => Some(Direction::Debit),
            _ => None,
        }
    }

    /// `GET` on the transaction's location.
    pub async fn reload(&mut self, params: Attributes) -> Result<&mut Self> {
        let location = self.inner.location(Some(Self::ENDPOINT))?;
        let attributes = self.inner.client().get(&location, params).await?;
        self.inner.replace_attributes(attributes);
        Ok(self)
    }
}
