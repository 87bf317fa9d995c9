//! Generic typed REST resource.
//!
//! Every API entity is a flat attribute bag ([`OmiseObject`]) wrapped by a
//! typed facade implementing [`Resource`]. The facade decides which keys get
//! typed accessors and which references can be expanded.
//!
//! # Locations
//!
//! The API reports each object's path in its `location` attribute. Objects
//! reached through a parent (a refund under a charge, a card under a
//! customer) carry their nested path there, so operations always prefer it
//! over rebuilding `endpoint/id`.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::client::Client;

use super::errors::{OmiseError, Result};

/// Attribute bag of a resource, exactly as returned by the API.
pub type Attributes = serde_json::Map<String, Value>;

/// Turn a JSON value into request parameters.
///
/// Anything other than a JSON object yields empty parameters.
pub fn params(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        _ => Attributes::new(),
    }
}

/// Join an endpoint and an optional id into a path.
pub fn location(endpoint: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{}/{}", endpoint.trim_end_matches('/'), id),
        None => endpoint.to_string(),
    }
}

/// Untyped API object: the client it was fetched through plus its attributes.
#[derive(Debug, Clone)]
pub struct OmiseObject {
    client: Client,
    attributes: Attributes,
}

impl OmiseObject {
    pub fn new(client: Client, attributes: Attributes) -> Self {
        Self { client, attributes }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Replace all attributes with a fresh server response.
    pub(crate) fn replace_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn str_attr(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn i64_attr(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn bool_attr(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_attr("id")
    }

    /// The `object` type tag, e.g. `customer`.
    pub fn object(&self) -> Option<&str> {
        self.str_attr("object")
    }

    pub fn livemode(&self) -> bool {
        self.bool_attr("livemode")
    }

    /// True once the server has acknowledged a delete.
    pub fn deleted(&self) -> bool {
        self.bool_attr("deleted")
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.str_attr("created")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// The object's path.
    ///
    /// Uses the `location` attribute when present, else `endpoint/id`.
    pub fn location(&self, endpoint: Option<&str>) -> Result<String> {
        if let Some(location) = self.str_attr("location") {
            return Ok(location.to_string());
        }
        match (endpoint, self.id()) {
            (Some(endpoint), Some(id)) => Ok(location(endpoint, Some(id))),
            (_, None) => Err(OmiseError::missing_attribute("id")),
            (None, Some(_)) => Err(OmiseError::missing_attribute("location")),
        }
    }
}

/// Typed facade over an [`OmiseObject`].
pub trait Resource: Sized + Send + Sync {
    /// The `object` tag the API uses for this type.
    const OBJECT: &'static str;

    fn from_object(object: OmiseObject) -> Self;

    fn as_object(&self) -> &OmiseObject;

    fn id(&self) -> Option<&str> {
        self.as_object().id()
    }

    fn attributes(&self) -> &Attributes {
        self.as_object().attributes()
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().get(key)
    }

    fn livemode(&self) -> bool {
        self.as_object().livemode()
    }

    fn deleted(&self) -> bool {
        self.as_object().deleted()
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.as_object().created()
    }
}

/// A resource addressable at a fixed top-level endpoint.
pub trait Endpoint: Resource {
    /// Collection path, e.g. `/customers`.
    const ENDPOINT: &'static str;
}

/// Map raw attributes onto `T`, checking the `object` tag when present.
pub(crate) fn typecast<T: Resource>(client: &Client, attributes: Attributes) -> Result<T> {
    match attributes.get("object").and_then(Value::as_str) {
        Some(tag) if tag != T::OBJECT => Err(OmiseError::unexpected_object(T::OBJECT, tag)),
        _ => Ok(T::from_object(OmiseObject::new(client.clone(), attributes))),
    }
}

/// `GET {endpoint}/{id}`.
pub(crate) async fn retrieve<T: Endpoint>(
    client: &Client,
    id: &str,
    params: Attributes,
) -> Result<T> {
    let attributes = client.get(&location(T::ENDPOINT, Some(id)), params).await?;
    typecast(client, attributes)
}

/// `POST {endpoint}`.
pub(crate) async fn create<T: Endpoint>(client: &Client, params: Attributes) -> Result<T> {
    let attributes = client.post(T::ENDPOINT, params).await?;
    typecast(client, attributes)
}

/// Typecast or expand the reference stored under `key`.
///
/// A string id is fetched once with `GET {T::ENDPOINT}/{id}` and kept in
/// `cache`; an embedded object is typecast without a request. The cache is
/// only filled while empty, so repeated calls are free until the owner
/// reassigns its attributes and clears it.
pub(crate) async fn expand_attribute<'a, T: Endpoint>(
    object: &OmiseObject,
    cache: &'a mut Option<T>,
    key: &str,
    params: Attributes,
) -> Result<Option<&'a T>> {
    if cache.is_none() {
        *cache = match object.get(key) {
            Some(Value::String(id)) => {
                tracing::debug!(key, id = %id, endpoint = T::ENDPOINT, "Expanding attribute");
                Some(retrieve(object.client(), id, params).await?)
            }
            Some(Value::Object(embedded)) => Some(typecast(object.client(), embedded.clone())?),
            _ => None,
        };
    }
    Ok(cache.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::omise::MockTransport;
    use serde_json::json;

    fn object(value: Value) -> OmiseObject {
        OmiseObject::new(Client::new(MockTransport::new()), params(value))
    }

    #[test]
    fn location_joins_endpoint_and_id() {
        assert_eq!(location("/customers", Some("cust_1")), "/customers/cust_1");
        assert_eq!(location("/customers/", Some("cust_1")), "/customers/cust_1");
        assert_eq!(location("/customers", None), "/customers");
    }

    #[test]
    fn location_attribute_wins_over_endpoint() {
        let obj = object(json!({
            "id": "rfnd_1",
            "location": "/charges/chrg_1/refunds/rfnd_1"
        }));
        assert_eq!(
            obj.location(Some("/refunds")).unwrap(),
            "/charges/chrg_1/refunds/rfnd_1"
        );
    }

    #[test]
    fn location_falls_back_to_endpoint_and_id() {
        let obj = object(json!({ "id": "cust_1" }));
        assert_eq!(obj.location(Some("/customers")).unwrap(), "/customers/cust_1");
    }

    #[test]
    fn location_without_id_is_an_error() {
        let err = object(json!({})).location(Some("/customers")).unwrap_err();
        assert!(err.message.contains("id"));
    }

    #[test]
    fn typed_attribute_accessors() {
        let obj = object(json!({
            "id": "cust_1",
            "object": "customer",
            "livemode": true,
            "created": "2014-10-02T07:56:48Z",
            "amount": 10000
        }));
        assert_eq!(obj.id(), Some("cust_1"));
        assert_eq!(obj.object(), Some("customer"));
        assert!(obj.livemode());
        assert!(!obj.deleted());
        assert_eq!(obj.i64_attr("amount"), Some(10000));
        assert_eq!(obj.created().unwrap().timestamp(), 1412236608);
    }

    #[test]
    fn params_ignores_non_objects() {
        assert!(params(json!([1, 2])).is_empty());
        assert_eq!(params(json!({ "a": 1 })).len(), 1);
    }
}
