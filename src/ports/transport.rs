//! Transport port for the remote payment API.
//!
//! The domain never talks HTTP directly. Every resource operation is turned
//! into a single [`ApiRequest`] and handed to a [`Transport`], which returns
//! the decoded JSON object from the response body.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Attributes, OmiseError};

/// Port for issuing requests against the API.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the response body as a JSON object.
    ///
    /// Non-success responses, network failures and bodies that are not a
    /// JSON object all surface as [`OmiseError`].
    async fn send(&self, request: ApiRequest) -> Result<Attributes, OmiseError>;
}

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Whether parameters travel in the query string rather than the body.
    pub fn uses_query(&self) -> bool {
        matches!(self, Method::Get | Method::Delete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request against an API path.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,

    /// Path relative to the API base URL, e.g. `/customers/cust_123`.
    pub path: String,

    /// Request parameters. Sent as query string for GET/DELETE and as a
    /// JSON body for POST/PATCH.
    pub params: Attributes,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>, params: Attributes) -> Self {
        Self {
            method,
            path: path.into(),
            params,
        }
    }
}
