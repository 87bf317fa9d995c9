//! Charges.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;

use super::card::Card;
use super::customer::Customer;
use super::errors::Result;
use super::list::List;
use super::object::{self, expand_attribute, typecast, Attributes, Endpoint, OmiseObject, Resource};
use super::refund::RefundList;
use super::search::SearchScope;
use super::transaction::Transaction;

/// Charge status as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    Pending,
    Successful,
    Failed,
    Reversed,
    Expired,

    /// Unknown status from the API.
    Unknown,
}

impl ChargeStatus {
    fn parse(s: &str) -> Self {
        match s {
            "pending" => ChargeStatus::Pending,
            "successful" => ChargeStatus::Successful,
            "failed" => ChargeStatus::Failed,
            "reversed" => ChargeStatus::Reversed,
            "expired" => ChargeStatus::Expired,
            _ => ChargeStatus::Unknown,
        }
    }
}

/// A charge against a card or customer.
#[derive(Debug, Clone)]
pub struct Charge {
    inner: OmiseObject,
    customer: Option<Customer>,
    transaction: Option<Transaction>,
    refunds: Option<RefundList>,
}

impl Resource for Charge {
    const OBJECT: &'static str = "charge";

    fn from_object(object: OmiseObject) -> Self {
        Self {
            inner: object,
            customer: None,
            transaction: None,
            refunds: None,
        }
    }

    fn as_object(&self) -> &OmiseObject {
        &self.inner
    }
}

impl Endpoint for Charge {
    const ENDPOINT: &'static str = "/charges";
}

impl Charge {
    /// `GET /charges/{id}`.
    pub async fn retrieve(client: &Client, id: &str, params: Attributes) -> Result<Self> {
        object::retrieve(client, id, params).await
    }

    /// `GET /charges`.
    pub async fn list(client: &Client, params: Attributes) -> Result<List<Self>> {
        let attributes = client.get(Self::ENDPOINT, params).await?;
        List::from_attributes(client, attributes)
    }

    /// `POST /charges`.
    pub async fn create(client: &Client, params: Attributes) -> Result<Self> {
        object::create(client, params).await
    }

    /// Search scope over the account's charges.
    pub fn search(client: &Client) -> SearchScope<Self> {
        SearchScope::new(client, "charge")
    }

    /// Amount in the smallest currency unit.
    pub fn amount(&self) -> Option<i64> {
        self.inner.i64_attr("amount")
    }

    pub fn currency(&self) -> Option<&str> {
        self.inner.str_attr("currency")
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.str_attr("description")
    }

    pub fn status(&self) -> Option<ChargeStatus> {
        self.inner.str_attr("status").map(ChargeStatus::parse)
    }

    pub fn paid(&self) -> bool {
        self.inner.bool_attr("paid")
    }

    pub fn authorized(&self) -> bool {
        self.inner.bool_attr("authorized")
    }

    pub fn reversed(&self) -> bool {
        self.inner.bool_attr("reversed")
    }

    /// Total amount refunded so far.
    pub fn refunded_amount(&self) -> i64 {
        self.inner.i64_attr("refunded").unwrap_or(0)
    }

    /// The charged card. Cards are always embedded in charges.
    pub fn card(&self) -> Result<Option<Card>> {
        match self.inner.get("card") {
            Some(Value::Object(card)) => typecast(self.inner.client(), card.clone()).map(Some),
            _ => Ok(None),
        }
    }

    /// `GET` on the charge's location.
    pub async fn reload(&mut self, params: Attributes) -> Result<&mut Self> {
        let location = self.location()?;
        let attributes = self.inner.client().get(&location, params).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// `PATCH` on the charge's location, e.g. to change its description.
    pub async fn update(&mut self, params: Attributes) -> Result<&mut Self> {
        let location = self.location()?;
        let attributes = self.inner.client().patch(&location, params).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// `POST /charges/{id}/capture` for a charge created without capture.
    pub async fn capture(&mut self) -> Result<&mut Self> {
        let path = format!("{}/capture", self.location()?);
        let attributes = self.inner.client().post(&path, Attributes::new()).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// `POST /charges/{id}/reverse` to release an uncaptured charge.
    pub async fn reverse(&mut self) -> Result<&mut Self> {
        let path = format!("{}/reverse", self.location()?);
        let attributes = self.inner.client().post(&path, Attributes::new()).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// The charged customer; may issue `GET /customers/{customer_id}`.
    pub async fn customer(&mut self, params: Attributes) -> Result<Option<&Customer>> {
        expand_attribute(&self.inner, &mut self.customer, "customer", params).await
    }

    /// The balance transaction; may issue `GET /transactions/{transaction_id}`.
    pub async fn transaction(&mut self, params: Attributes) -> Result<Option<&Transaction>> {
        expand_attribute(&self.inner, &mut self.transaction, "transaction", params).await
    }

    /// Refunds of this charge, built from the embedded `refunds` list.
    ///
    /// Without an embedded list an empty page addressed at
    /// `/charges/{id}/refunds` is returned.
    pub fn refunds(&mut self) -> Result<&RefundList> {
        let refunds = match self.refunds.take() {
            Some(refunds) => refunds,
            None => match self.inner.get("refunds") {
                Some(Value::Object(list)) => {
                    let fallback = self.location().ok().map(|loc| format!("{}/refunds", loc));
                    List::from_attributes(self.inner.client(), list.clone())?
                        .with_fallback_location(fallback)
                }
                _ => {
                    let fallback = format!("{}/refunds", self.location()?);
                    List::empty(self.inner.client(), fallback)
                }
            },
        };
        Ok(self.refunds.insert(refunds))
    }

    fn location(&self) -> Result<String> {
        self.inner.location(Some(Self::ENDPOINT))
    }

    fn assign_attributes(&mut self, attributes: Attributes) -> &mut Self {
        self.customer = None;
        self.transaction = None;
        self.refunds = None;
        self.inner.replace_attributes(attributes);
        self
    }
}
