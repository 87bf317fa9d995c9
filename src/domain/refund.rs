//! Refunds.
//!
//! A refund returns all or part of a charge. Refunds live under their charge
//! (`/charges/{charge_id}/refunds/{id}`); the top-level `/refunds` endpoint
//! only lists them, so a refund is always reloaded through its `location`.
//!
//! The charge and transaction a refund refers to come back as ids unless the
//! refund was fetched with `expand`. [`Refund::charge`] and
//! [`Refund::transaction`] typecast the embedded object when present and
//! otherwise issue a single `GET` the first time they are called.

use serde_json::Value;

use crate::client::Client;

use super::charge::Charge;
use super::errors::Result;
use super::list::List;
use super::object::{expand_attribute, Attributes, OmiseObject, Resource};
use super::search::SearchScope;
use super::transaction::Transaction;

/// Refunds of one charge, addressed at `/charges/{id}/refunds`.
pub type RefundList = List<Refund>;

/// A refund of a charge.
#[derive(Debug, Clone)]
pub struct Refund {
    inner: OmiseObject,
    charge: Option<Charge>,
    transaction: Option<Transaction>,
}

impl Resource for Refund {
    const OBJECT: &'static str = "refund";

    fn from_object(object: OmiseObject) -> Self {
        Self {
            inner: object,
            charge: None,
            transaction: None,
        }
    }

    fn as_object(&self) -> &OmiseObject {
        &self.inner
    }
}

impl Refund {
    /// Path listing every refund of the account.
    pub const ENDPOINT: &'static str = "/refunds";

    /// Search scope over the account's refunds.
    ///
    /// ```ignore
    /// let results = Refund::search(&client)
    ///     .filter("card_last_digits", "4242")
    ///     .execute()
    ///     .await?;
    /// ```
    pub fn search(client: &Client) -> SearchScope<Self> {
        SearchScope::new(client, "refund")
    }

    /// `GET /refunds`.
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

    pub fn voided(&self) -> bool {
        self.inner.bool_attr("voided")
    }

    pub fn charge_id(&self) -> Option<&str> {
        reference_id(self.inner.get("charge"))
    }

    pub fn transaction_id(&self) -> Option<&str> {
        reference_id(self.inner.get("transaction"))
    }

    /// `GET` on the refund's location, `/charges/{charge_id}/refunds/{id}`.
    pub async fn reload(&mut self, params: Attributes) -> Result<&mut Self> {
        let location = self.inner.location(None)?;
        let attributes = self.inner.client().get(&location, params).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// The refunded charge; may issue `GET /charges/{charge_id}`.
    pub async fn charge(&mut self, params: Attributes) -> Result<Option<&Charge>> {
        expand_attribute(&self.inner, &mut self.charge, "charge", params).await
    }

    /// The balance transaction; may issue `GET /transactions/{transaction_id}`.
    pub async fn transaction(&mut self, params: Attributes) -> Result<Option<&Transaction>> {
        expand_attribute(&self.inner, &mut self.transaction, "transaction", params).await
    }

    fn assign_attributes(&mut self, attributes: Attributes) -> &mut Self {
        self.charge = None;
        self.transaction = None;
        self.inner.replace_attributes(attributes);
        self
    }
}

fn reference_id(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(id)) => Some(id.as_str()),
        Some(Value::Object(embedded)) => embedded.get("id").and_then(Value::as_str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::omise::MockTransport;
    use crate::domain::object::{params, typecast};
    use crate::ports::Method;
    use serde_json::json;

    const LOCATION: &str = "/charges/chrg_1/refunds/rfnd_1";

    fn refund_json(amount: i64, charge: Value, transaction: Value) -> Value {
        json!({
            "object": "refund",
            "id": "rfnd_1",
            "location": LOCATION,
            "amount": amount,
            "currency": "thb",
            "voided": false,
            "charge": charge,
            "transaction": transaction,
            "created": "2015-01-26T16:19:15Z"
        })
    }

    fn setup(value: Value) -> (MockTransport, Refund) {
        let mock = MockTransport::new();
        let refund = typecast(&Client::new(mock.clone()), params(value)).unwrap();
        (mock, refund)
    }

    #[tokio::test]
    async fn reload_uses_nested_charge_location() {
        let (mock, mut refund) = setup(refund_json(10000, json!("chrg_1"), json!("trxn_1")));
        mock.on(Method::Get, LOCATION, refund_json(5000, json!("chrg_1"), json!("trxn_1")));

        refund.reload(Attributes::new()).await.unwrap();

        assert!(mock.was_called(Method::Get, LOCATION));
        assert_eq!(refund.amount(), Some(5000));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn charge_expands_id_once() {
        let (mock, mut refund) = setup(refund_json(10000, json!("chrg_1"), json!("trxn_1")));
        mock.on(
            Method::Get,
            "/charges/chrg_1",
            json!({ "object": "charge", "id": "chrg_1", "amount": 100000 }),
        );

        refund.charge(Attributes::new()).await.unwrap();
        let charge = refund.charge(Attributes::new()).await.unwrap().unwrap();

        assert_eq!(charge.id(), Some("chrg_1"));
        assert_eq!(charge.amount(), Some(100000));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn transaction_expands_id() {
        let (mock, mut refund) = setup(refund_json(10000, json!("chrg_1"), json!("trxn_1")));
        mock.on(
            Method::Get,
            "/transactions/trxn_1",
            json!({ "object": "transaction", "id": "trxn_1", "amount": 10000 }),
        );

        let transaction = refund.transaction(Attributes::new()).await.unwrap().unwrap();

        assert_eq!(transaction.amount(), Some(10000));
        assert!(mock.was_called(Method::Get, "/transactions/trxn_1"));
    }

    #[tokio::test]
    async fn expand_params_are_forwarded() {
        let (mock, mut refund) = setup(refund_json(10000, json!("chrg_1"), json!("trxn_1")));
        mock.on(Method::Get, "/charges/chrg_1", json!({ "object": "charge", "id": "chrg_1" }));

        refund
            .charge(params(json!({ "expand": true })))
            .await
            .unwrap();

        assert_eq!(mock.last_call().unwrap().params.get("expand"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn embedded_charge_is_typecast_without_request() {
        let (mock, mut refund) = setup(refund_json(
            10000,
            json!({ "object": "charge", "id": "chrg_1", "amount": 100000 }),
            json!("trxn_1"),
        ));

        let charge = refund.charge(Attributes::new()).await.unwrap().unwrap();

        assert_eq!(charge.amount(), Some(100000));
        assert_eq!(refund.charge_id(), Some("chrg_1"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn embedded_object_of_wrong_type_is_an_error() {
        let (_, mut refund) = setup(refund_json(
            10000,
            json!({ "object": "customer", "id": "cust_1" }),
            json!("trxn_1"),
        ));

        assert!(refund.charge(Attributes::new()).await.is_err());
    }

    #[tokio::test]
    async fn missing_references_expand_to_none() {
        let (mock, mut refund) = setup(json!({ "object": "refund", "id": "rfnd_1" }));

        assert!(refund.charge(Attributes::new()).await.unwrap().is_none());
        assert!(refund.transaction(Attributes::new()).await.unwrap().is_none());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn reload_drops_expanded_charge() {
        let (mock, mut refund) = setup(refund_json(10000, json!("chrg_1"), json!("trxn_1")));
        mock.on(Method::Get, "/charges/chrg_1", json!({ "object": "charge", "id": "chrg_1" }));
        mock.on(Method::Get, LOCATION, refund_json(10000, json!("chrg_1"), json!("trxn_1")));

        refund.charge(Attributes::new()).await.unwrap();
        refund.reload(Attributes::new()).await.unwrap();
        refund.charge(Attributes::new()).await.unwrap();

        assert_eq!(mock.calls_to(Method::Get, "/charges/chrg_1"), 2);
    }

    #[tokio::test]
    async fn list_gets_all_refunds() {
        let mock = MockTransport::new();
        mock.on(
            Method::Get,
            "/refunds",
            json!({
                "object": "list",
                "location": "/refunds",
                "total": 1,
                "data": [refund_json(10000, json!("chrg_1"), json!("trxn_1"))]
            }),
        );
        let client = Client::new(mock.clone());

        let refunds = Refund::list(&client, Attributes::new()).await.unwrap();

        assert_eq!(refunds.len(), 1);
        assert_eq!(refunds.data()[0].transaction_id(), Some("trxn_1"));
    }

    #[test]
    fn search_scope_is_refund() {
        let client = Client::new(MockTransport::new());
        assert_eq!(Refund::search(&client).scope(), "refund");
    }
}
