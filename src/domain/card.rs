//! Cards attached to a customer.
//!
//! Cards only exist under a customer, so they have no top-level endpoint and
//! every operation goes through the card's `location`
//! (`/customers/{customer_id}/cards/{card_id}`).

use super::errors::Result;
use super::list::List;
use super::object::{Attributes, OmiseObject, Resource};

/// Cards of one customer, addressed at `/customers/{id}/cards`.
pub type CardList = List<Card>;

/// A stored card.
#[derive(Debug, Clone)]
pub struct Card {
    inner: OmiseObject,
}

impl Resource for Card {
    const OBJECT: &'static str = "card";

    fn from_object(object: OmiseObject) -> Self {
        Self { inner: object }
    }

    fn as_object(&self) -> &OmiseObject {
        &self.inner
    }
}

impl Card {
    pub fn brand(&self) -> Option<&str> {
        self.inner.str_attr("brand")
    }

    pub fn last_digits(&self) -> Option<&str> {
        self.inner.str_attr("last_digits")
    }

    /// Cardholder name.
    pub fn name(&self) -> Option<&str> {
        self.inner.str_attr("name")
    }

    pub fn expiration_month(&self) -> Option<i64> {
        self.inner.i64_attr("expiration_month")
    }

    pub fn expiration_year(&self) -> Option<i64> {
        self.inner.i64_attr("expiration_year")
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.inner.str_attr("fingerprint")
    }

    pub fn country(&self) -> Option<&str> {
        self.inner.str_attr("country")
    }

    pub fn financing(&self) -> Option<&str> {
        self.inner.str_attr("financing")
    }

    pub fn security_code_check(&self) -> bool {
        self.inner.bool_attr("security_code_check")
    }

    /// `GET` on the card's location.
    pub async fn reload(&mut self, params: Attributes) -> Result<&mut Self> {
        let location = self.inner.location(None)?;
        let attributes = self.inner.client().get(&location, params).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// `PATCH` on the card's location, e.g. to change the cardholder name.
    pub async fn update(&mut self, params: Attributes) -> Result<&mut Self> {
        let location = self.inner.location(None)?;
        let attributes = self.inner.client().patch(&location, params).await?;
        Ok(self.assign_attributes(attributes))
    }

    /// `DELETE` on the card's location.
    pub async fn destroy(&mut self) -> Result<&mut Self> {
        let location = self.inner.location(None)?;
        let attributes = self.inner.client().delete(&location).await?;
        Ok(self.assign_attributes(attributes))
    }

    fn assign_attributes(&mut self, attributes: Attributes) -> &mut Self {
        self.inner.replace_attributes(attributes);
        self
    }
}
