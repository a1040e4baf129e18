//! Per-token client cache
//!
//! Applications talking to the same API on behalf of several users keep one
//! authenticated [`HttpClient`] per access token. The registry is an ordinary
//! value owned by the application, so tests and separate tenants can each
//! build their own.

use super::client::{HttpClient, HttpClientConfig};
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Cache of bearer-authenticated clients keyed by access token
#[derive(Debug)]
pub struct ClientRegistry {
    config: HttpClientConfig,
    clients: RwLock<HashMap<String, Arc<HttpClient>>>,
}

impl ClientRegistry {
    /// Create an empty registry; new clients are built from `config`
    pub fn new(config: HttpClientConfig) -> Self {
        Self {
            config,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Get the client for a token, building and caching it on first use
    pub fn client_for(&self, token: &str) -> Result<Arc<HttpClient>> {
        if token.is_empty() {
            return Err(Error::invalid_argument("access token cannot be empty"));
        }

        if let Some(client) = self.read()?.get(token) {
            return Ok(Arc::clone(client));
        }

        let mut clients = self.write()?;
        // Another caller may have inserted it between the two locks
        if let Some(client) = clients.get(token) {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(HttpClient::with_auth(
            self.config.clone(),
            AuthConfig::bearer(token),
        )?);
        clients.insert(token.to_string(), Arc::clone(&client));
        debug!("Registered client #{}", clients.len());
        Ok(client)
    }

    /// Drop the cached client for a token. Returns whether one was cached.
    pub fn evict(&self, token: &str) -> Result<bool> {
        Ok(self.write()?.remove(token).is_some())
    }

    /// Drop all cached clients
    pub fn clear(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }

    /// Number of cached clients
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Check if no clients are cached
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Arc<HttpClient>>>> {
        self.clients
            .read()
            .map_err(|_| Error::Other("client registry lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<HttpClient>>>> {
        self.clients
            .write()
            .map_err(|_| Error::Other("client registry lock poisoned".to_string()))
    }
}
