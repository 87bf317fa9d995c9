//! Paginated list responses.
//!
//! A list object looks like:
//!
//! ```text
//! { "object": "list", "from": "...", "to": "...", "offset": 0, "limit": 20,
//!   "total": 42, "order": "chronological", "location": "/customers",
//!   "data": [ { "object": "customer", ... }, ... ] }
//! ```
//!
//! Pages are fetched again from the list's own location with `offset` and
//! `limit` adjusted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;

use super::errors::{OmiseError, Result};
use super::object::{location, typecast, Attributes, OmiseObject, Resource};

/// Limit the API applies when none is given.
pub const DEFAULT_LIMIT: i64 = 20;

const LIST_OBJECT: &str = "list";

/// Sort order of a list or search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Chronological,
    ReverseChronological,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Chronological => "chronological",
            Order::ReverseChronological => "reverse_chronological",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "chronological" => Some(Order::Chronological),
            "reverse_chronological" => Some(Order::ReverseChronological),
            _ => None,
        }
    }
}

/// One page of resources of type `T`.
#[derive(Debug, Clone)]
pub struct List<T> {
    object: OmiseObject,
    data: Vec<T>,
    fallback_location: Option<String>,
}

impl<T: Resource> List<T> {
    /// Build a list from a list response, typecasting each item.
    pub(crate) fn from_attributes(client: &Client, attributes: Attributes) -> Result<Self> {
        if let Some(tag) = attributes.get("object").and_then(Value::as_str) {
            if tag != LIST_OBJECT {
                return Err(OmiseError::unexpected_object(LIST_OBJECT, tag));
            }
        }

        let data = match attributes.get("data") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => typecast::<T>(client, map.clone()),
                    _ => Err(OmiseError::decode("list item is not an object")),
                })
                .collect::<Result<Vec<T>>>()?,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => return Err(OmiseError::decode("list data is not an array")),
        };

        Ok(Self {
            object: OmiseObject::new(client.clone(), attributes),
            data,
            fallback_location: None,
        })
    }

    /// An empty list addressed at `location`, for parents that did not embed one.
    pub(crate) fn empty(client: &Client, location: String) -> Self {
        Self {
            object: OmiseObject::new(client.clone(), Attributes::new()),
            data: Vec::new(),
            fallback_location: Some(location),
        }
    }

    /// Location to use when the response carries none.
    pub(crate) fn with_fallback_location(mut self, location: Option<String>) -> Self {
        self.fallback_location = location;
        self
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn attributes(&self) -> &Attributes {
        self.object.attributes()
    }

    pub(crate) fn client(&self) -> &Client {
        self.object.client()
    }

    pub fn total(&self) -> i64 {
        self.object.i64_attr("total").unwrap_or(self.data.len() as i64)
    }

    pub fn limit(&self) -> i64 {
        self.object
            .i64_attr("limit")
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.object.i64_attr("offset").unwrap_or(0)
    }

    pub fn order(&self) -> Option<Order> {
        self.object.str_attr("order").and_then(Order::parse)
    }

    pub fn from(&self) -> Option<DateTime<Utc>> {
        self.timestamp("from")
    }

    pub fn to(&self) -> Option<DateTime<Utc>> {
        self.timestamp("to")
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.object
            .str_attr(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Path the list was fetched from.
    pub fn location(&self) -> Result<String> {
        self.object
            .str_attr("location")
            .map(str::to_string)
            .or_else(|| self.fallback_location.clone())
            .ok_or_else(|| OmiseError::missing_attribute("location"))
    }

    /// 1-based index of this page.
    pub fn current_page(&self) -> i64 {
        (self.offset() / self.limit()).saturating_add(1)
    }

    pub fn total_pages(&self) -> i64 {
        let (total, limit) = (self.total(), self.limit());
        if total <= 0 {
            1
        } else {
            total / limit + i64::from(total % limit != 0)
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.offset().saturating_add(self.limit()) < self.total()
    }

    pub fn has_previous_page(&self) -> bool {
        self.offset() > 0
    }

    /// Fetch the following page, or `None` on the last page.
    pub async fn next_page(&self, params: Attributes) -> Result<Option<Self>> {
        if !self.has_next_page() {
            return Ok(None);
        }
        self.fetch_at(self.offset().saturating_add(self.limit()), params)
            .await
            .map(Some)
    }

    /// Fetch the preceding page, or `None` on the first page.
    pub async fn previous_page(&self, params: Attributes) -> Result<Option<Self>> {
        if !self.has_previous_page() {
            return Ok(None);
        }
        let offset = self.offset().saturating_sub(self.limit()).max(0);
        self.fetch_at(offset, params).await.map(Some)
    }

    pub async fn last_page(&self, params: Attributes) -> Result<Self> {
        let offset = (self.total_pages() - 1).saturating_mul(self.limit());
        self.fetch_at(offset, params).await
    }

    /// Fetch page `number`, counting from 1.
    pub async fn page(&self, number: i64, params: Attributes) -> Result<Self> {
        let offset = (number.max(1) - 1).saturating_mul(self.limit());
        self.fetch_at(offset, params).await
    }

    /// `GET {location}/{id}` for a member of this collection.
    pub async fn retrieve(&self, id: &str, params: Attributes) -> Result<T> {
        let path = location(&self.location()?, Some(id));
        let attributes = self.client().get(&path, params).await?;
        typecast(self.client(), attributes)
    }

    /// `POST {location}` to add a member to this collection.
    pub async fn create(&self, params: Attributes) -> Result<T> {
        let attributes = self.client().post(&self.location()?, params).await?;
        typecast(self.client(), attributes)
    }

    /// Refetch the current page in place.
    pub async fn reload(&mut self, params: Attributes) -> Result<&mut Self> {
        *self = self.fetch_at(self.offset(), params).await?;
        Ok(self)
    }

    async fn fetch_at(&self, offset: i64, mut params: Attributes) -> Result<Self> {
        let location = self.location()?;
        params.insert("offset".into(), offset.into());
        params
            .entry("limit")
            .or_insert_with(|| self.limit().into());

        let attributes = self.client().get(&location, params).await?;
        Ok(Self::from_attributes(self.client(), attributes)?
            .with_fallback_location(self.fallback_location.clone()))
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
