//! Search across an account's resources.
//!
//! ```ignore
//! let results = Refund::search(&client)
//!     .filter("card_last_digits", "4242")
//!     .execute()
//!     .await?;
//! ```

use std::marker::PhantomData;

use serde_json::Value;

use crate::client::Client;

use super::errors::{OmiseError, Result};
use super::list::Order;
use super::object::{typecast, Attributes, OmiseObject, Resource};

/// Path of the search endpoint.
pub const SEARCH_ENDPOINT: &str = "/search";

const SEARCH_OBJECT: &str = "search";

/// Pending search over one scope, built up before [`execute`](Self::execute).
#[derive(Debug)]
pub struct SearchScope<T> {
    client: Client,
    scope: String,
    query: Option<String>,
    filters: Attributes,
    order: Option<Order>,
    page: Option<i64>,
    per_page: Option<i64>,
    _marker: PhantomData<fn() -> T>,
}

// Manual impl: cloning a scope never requires cloning a `T`.
impl<T> Clone for SearchScope<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            scope: self.scope.clone(),
            query: self.query.clone(),
            filters: self.filters.clone(),
            order: self.order,
            page: self.page,
            per_page: self.per_page,
            _marker: PhantomData,
        }
    }
}

impl<T: Resource> SearchScope<T> {
    pub fn new(client: &Client, scope: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            scope: scope.into(),
            query: None,
            filters: Attributes::new(),
            order: None,
            page: None,
            per_page: None,
            _marker: PhantomData,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Add one filter. Later values for the same key replace earlier ones.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Merge a set of filters.
    pub fn filters(mut self, filters: Attributes) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Free-text query.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Page to fetch, counting from 1.
    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn per_page(mut self, per_page: i64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Request parameters for `GET /search`.
    pub fn to_params(&self) -> Attributes {
        let mut params = Attributes::new();
        params.insert("scope".into(), self.scope.clone().into());
        if let Some(query) = &self.query {
            params.insert("query".into(), query.clone().into());
        }
        if !self.filters.is_empty() {
            params.insert("filters".into(), Value::Object(self.filters.clone()));
        }
        if let Some(order) = self.order {
            params.insert("order".into(), order.as_str().into());
        }
        if let Some(page) = self.page {
            params.insert("page".into(), page.into());
        }
        if let Some(per_page) = self.per_page {
            params.insert("per_page".into(), per_page.into());
        }
        params
    }

    /// Run the search with a single `GET /search`.
    pub async fn execute(&self) -> Result<SearchResult<T>> {
        let attributes = self.client.get(SEARCH_ENDPOINT, self.to_params()).await?;
        SearchResult::from_attributes(self.clone(), attributes)
    }
}

/// One page of search results.
#[derive(Debug, Clone)]
pub struct SearchResult<T> {
    object: OmiseObject,
    data: Vec<T>,
    scope: SearchScope<T>,
}

impl<T: Resource> SearchResult<T> {
    fn from_attributes(scope: SearchScope<T>, attributes: Attributes) -> Result<Self> {
        if let Some(tag) = attributes.get("object").and_then(Value::as_str) {
            if tag != SEARCH_OBJECT {
                return Err(OmiseError::unexpected_object(SEARCH_OBJECT, tag));
            }
        }

        let data = match attributes.get("data") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => typecast::<T>(&scope.client, map.clone()),
                    _ => Err(OmiseError::decode("search item is not an object")),
                })
                .collect::<Result<Vec<T>>>()?,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => return Err(OmiseError::decode("search data is not an array")),
        };

        Ok(Self {
            object: OmiseObject::new(scope.client.clone(), attributes),
            data,
            scope,
        })
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

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn attributes(&self) -> &Attributes {
        self.object.attributes()
    }

    pub fn page(&self) -> i64 {
        self.object.i64_attr("page").unwrap_or(1)
    }

    pub fn per_page(&self) -> Option<i64> {
        self.object.i64_attr("per_page")
    }

    pub fn total(&self) -> i64 {
        self.object.i64_attr("total").unwrap_or(self.data.len() as i64)
    }

    pub fn total_pages(&self) -> i64 {
        self.object.i64_attr("total_pages").unwrap_or(1)
    }

    pub fn query(&self) -> Option<&str> {
        self.object.str_attr("query")
    }

    pub fn filters(&self) -> Option<&Attributes> {
        self.object.get("filters").and_then(Value::as_object)
    }

    pub fn scope(&self) -> &SearchScope<T> {
        &self.scope
    }

    pub fn has_next_page(&self) -> bool {
        self.page() < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page() > 1
    }

    /// Re-run the search one page further, or `None` on the last page.
    pub async fn next_page(&self) -> Result<Option<Self>> {
        if !self.has_next_page() {
            return Ok(None);
        }
        self.scope.clone().page(self.page().saturating_add(1)).execute().await.map(Some)
    }

    /// Re-run the search one page back, or `None` on the first page.
    pub async fn previous_page(&self) -> Result<Option<Self>> {
        if !self.has_previous_page() {
            return Ok(None);
        }
        self.scope.clone().page(self.page().saturating_sub(1)).execute().await.map(Some)
    }
}

impl<T> IntoIterator for SearchResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::omise::MockTransport;
    use crate::domain::Refund;
    use crate::ports::Method;
    use serde_json::json;

    fn results(page: i64, total_pages: i64) -> Value {
        json!({
            "object": "search",
            "scope": "refund",
            "query": "",
            "filters": { "card_last_digits": "4242" },
            "page": page,
            "per_page": 30,
            "total": 31,
            "total_pages": total_pages,
            "data": [{ "object": "refund", "id": "rfnd_1" }]
        })
    }

    #[test]
    fn builds_search_params() {
        let client = Client::new(MockTransport::new());
        let params = SearchScope::<Refund>::new(&client, "refund")
            .filter("card_last_digits", "4242")
            .filter("amount", 1000)
            .query("refund")
            .order(Order::ReverseChronological)
            .page(2)
            .per_page(10)
            .to_params();

        assert_eq!(params.get("scope"), Some(&json!("refund")));
        assert_eq!(params.get("query"), Some(&json!("refund")));
        assert_eq!(
            params.get("filters"),
            Some(&json!({ "card_last_digits": "4242", "amount": 1000 }))
        );
        assert_eq!(params.get("order"), Some(&json!("reverse_chronological")));
        assert_eq!(params.get("page"), Some(&json!(2)));
        assert_eq!(params.get("per_page"), Some(&json!(10)));
    }

    #[test]
    fn empty_scope_sends_only_scope() {
        let client = Client::new(MockTransport::new());
        let params = SearchScope::<Refund>::new(&client, "refund").to_params();
        assert_eq!(params.len(), 1);
    }

    #[tokio::test]
    async fn execute_issues_single_get_to_search() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/search", results(1, 2));
        let client = Client::new(mock.clone());

        let found = SearchScope::<Refund>::new(&client, "refund")
            .filter("card_last_digits", "4242")
            .execute()
            .await
            .unwrap();

        assert_eq!(mock.call_count(), 1);
        assert!(mock.was_called(Method::Get, "/search"));
        assert_eq!(found.len(), 1);
        assert_eq!(found.total(), 31);
        assert_eq!(found.per_page(), Some(30));
        assert!(found.has_next_page());
        assert_eq!(
            found.filters().and_then(|f| f.get("card_last_digits")),
            Some(&json!("4242"))
        );
    }

    #[tokio::test]
    async fn next_page_saturates_at_max_page() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/search", results(i64::MAX - 1, i64::MAX));
        let client = Client::new(mock.clone());
        let found = SearchScope::<Refund>::new(&client, "refund")
            .execute()
            .await
            .unwrap();

        mock.on(Method::Get, "/search", results(i64::MAX, i64::MAX));
        let last = found.next_page().await.unwrap().unwrap();

        assert_eq!(mock.last_call().unwrap().params.get("page"), Some(&json!(i64::MAX)));
        assert!(!last.has_next_page());
        assert!(last.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn next_page_keeps_filters_and_moves_page() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/search", results(1, 2));
        let client = Client::new(mock.clone());
        let first = SearchScope::<Refund>::new(&client, "refund")
            .filter("card_last_digits", "4242")
            .execute()
            .await
            .unwrap();

        mock.on(Method::Get, "/search", results(2, 2));
        let second = first.next_page().await.unwrap().unwrap();

        let call = mock.last_call().unwrap();
        assert_eq!(call.params.get("page"), Some(&json!(2)));
        assert_eq!(
            call.params.get("filters"),
            Some(&json!({ "card_last_digits": "4242" }))
        );
        assert!(second.next_page().await.unwrap().is_none());
        assert_eq!(mock.call_count(), 2);
    }
}
