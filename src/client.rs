//! API client handle.
//!
//! A [`Client`] is a cheap-to-clone handle around a [`Transport`]. Every
//! resource carries one so it can reload, update or expand itself.

use std::fmt;
use std::sync::Arc;

use crate::adapters::omise::{HttpTransport, TransportConfig};
use crate::config::ApiConfig;
use crate::domain::{Attributes, Result};
use crate::ports::{ApiRequest, Method, Transport};

/// Handle used by resources to reach the API.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client over any transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client sharing an existing transport.
    pub fn from_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create an HTTP client from loaded configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(TransportConfig::from(config))?;
        Ok(Self::new(transport))
    }

    pub async fn get(&self, path: &str, params: Attributes) -> Result<Attributes> {
        self.request(Method::Get, path, params).await
    }

    pub async fn post(&self, path: &str, params: Attributes) -> Result<Attributes> {
        self.request(Method::Post, path, params).await
    }

    pub async fn patch(&self, path: &str, params: Attributes) -> Result<Attributes> {
        self.request(Method::Patch, path, params).await
    }

    pub async fn delete(&self, path: &str) -> Result<Attributes> {
        self.request(Method::Delete, path, Attributes::new()).await
    }

    async fn request(&self, method: Method, path: &str, params: Attributes) -> Result<Attributes> {
        self.transport
            .send(ApiRequest::new(method, path, params))
            .await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
