//! Customers.
//!
//! A customer keeps a list of cards and may point at one of them as its
//! default. Both relationships are resolved lazily and cached on the
//! instance until its attributes are reassigned.

use serde_json::Value;

use crate::client::Client;

use super::card::{Card, CardList};
use super::errors::Result;
use super::list::List;
use super::object::{self, typecast, Attributes, Endpoint, OmiseObject, Resource};
use super::search::SearchScope;

/// A customer record.
#[derive(Debug, Clone)]
pub struct Customer {
    inner: OmiseObject,
    default_card: Option<Card>,
    cards: Option<CardList>,
}

impl Resource for Customer {
    const OBJECT: &'static str = "customer";

    fn from_object(object: OmiseObject) -> Self {
        Self {
            inner: object,
            default_card: None,
            cards: None,
        }
    }

    fn as_object(&self) -> &OmiseObject {
        &self.inner
    }
}

impl Endpoint for Customer {
    const ENDPOINT: &'static str = "/customers";
}

impl Customer {
    /// `GET /customers/{id}`.
    pub async fn retrieve(client: &Client, id: &str, params: Attributes) -> Result<Self> {
        object::retrieve(client, id, params).await
    }

    /// `GET /customers`.
    pub async fn list(client: &Client, params: Attributes) -> Result<List<Self>> {
        let attributes = client.get(Self::ENDPOINT, params).await?;
        List::from_attributes(client, attributes)
    }

    /// `POST /customers`.
    pub async fn create(client: &Client, params: Attributes) -> Result<Self> {
        object::create(client, params).await
    }

    /// Search scope over the account's customers.
    pub fn search(client: &Client) -> SearchScope<Self> {
        SearchScope::new(client, "customer")
    }

    pub fn email(&self) -> Option<&str> {
        self.inner.str_attr("email")
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.str_attr("description")
    }

    pub fn metadata(&self) -> Option<&Attributes> {
        self.inner.get("metadata").and_then(Value::as_object)
    }

    /// Id of the default card, whether it is referenced or embedded.
    pub fn default_card_id(&self) -> Option<&str> {
        match self.inner.get("default_card") {
            Some(Value::String(id)) => Some(id.as_str()),
            Some(Value::Object(card)) => card.get("id").and_then(Value::as_str),
            _ => None,
        }
    }

    /// `GET` on the customer's location.
    pub async fn reload(&mut self, params: Attributes) -> Result<&mut Self> {
        let location = self.location()?;
        let attributes = self.inner.client().get(&location, params).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// `PATCH` on the customer's location.
    pub async fn update(&mut self, params: Attributes) -> Result<&mut Self> {
        let location = self.location()?;
        let attributes = self.inner.client().patch(&location, params).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// `DELETE` on the customer's location.
    pub async fn destroy(&mut self) -> Result<&mut Self> {
        let location = self.location()?;
        let attributes = self.inner.client().delete(&location).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// The default card, if the customer has one.
    ///
    /// An embedded card, or one already present in the embedded card list,
    /// is returned without a request. Otherwise the card is fetched once with
    /// `GET /customers/{id}/cards/{card_id}` and cached.
    pub async fn default_card(&mut self, params: Attributes) -> Result<Option<&Card>> {
        if self.default_card.is_none() {
            self.default_card = match self.inner.get("default_card").cloned() {
                Some(Value::String(id)) => {
                    let embedded = self
                        .cards()?
                        .iter()
                        .find(|card| card.id() == Some(id.as_str()))
                        .cloned();
                    match embedded {
                        Some(card) => Some(card),
                        None => {
                            tracing::debug!(customer_id = ?self.inner.id(), card_id = %id, "Expanding default card");
                            Some(self.cards()?.retrieve(&id, params).await?)
                        }
                    }
                }
                Some(Value::Object(card)) => Some(typecast(self.inner.client(), card)?),
                _ => None,
            };
        }
        Ok(self.default_card.as_ref())
    }

    /// The customer's cards, built from the embedded `cards` list.
    ///
    /// When the response did not embed the list, an empty page addressed at
    /// `/customers/{id}/cards` is returned so it can still be paged or used
    /// to retrieve and create cards.
    pub fn cards(&mut self) -> Result<&CardList> {
        let cards = match self.cards.take() {
            Some(cards) => cards,
            None => match self.inner.get("cards") {
                Some(Value::Object(list)) => {
                    let fallback = self.location().ok().map(|loc| format!("{}/cards", loc));
                    List::from_attributes(self.inner.client(), list.clone())?
                        .with_fallback_location(fallback)
                }
                _ => {
                    let fallback = format!("{}/cards", self.location()?);
                    List::empty(self.inner.client(), fallback)
                }
            },
        };
        Ok(self.cards.insert(cards))
    }

    fn location(&self) -> Result<String> {
        self.inner.location(Some(Self::ENDPOINT))
    }

    fn assign_attributes(&mut self, attributes: Attributes) -> &mut Self {
        self.cleanup();
        self.inner.replace_attributes(attributes);
        self
    }

    fn cleanup(&mut self) {
        self.default_card = None;
        self.cards = None;
    }
}
