//! Cached GraphQL clients.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use catalog_core::{CatalogConfig, Collection, ConfigError, EndpointConfig, Service};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::cache::{CacheStats, CacheStatus, ResponseCache};
use crate::query::{Operation, Query};
use crate::response::decode_response;
use crate::transport::{ReqwestTransport, Transport};
use crate::FetchError;

/// A client bound to one endpoint and credential, with its own response cache.
///
/// Cloning shares the transport and the cache.
#[derive(Clone)]
pub struct GraphClient {
    service: Service,
    endpoint: Url,
    transport: Arc<dyn Transport>,
    cache: Arc<Mutex<ResponseCache>>,
}

impl fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphClient")
            .field("service", &self.service)
            .field("host", &self.endpoint.host_str())
            .finish_non_exhaustive()
    }
}

impl GraphClient {
    pub fn new(
        service: Service,
        endpoint: &EndpointConfig,
        transport: Arc<dyn Transport>,
        cache_capacity: usize,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            service,
            endpoint: endpoint.url()?,
            transport,
            cache: Arc::new(Mutex::new(ResponseCache::new(cache_capacity))),
        })
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }

    pub fn cached_entries(&self) -> usize {
        self.lock_cache().len()
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a query and return its `data` object.
    ///
    /// Successful responses are cached by (operation, variables); failures
    /// are never cached and never retried.
    pub async fn execute(&self, query: &Query) -> Result<Arc<Value>, FetchError> {
        let operation = query.operation();
        if operation.service() != self.service {
            return Err(FetchError::Misrouted {
                operation: operation.name(),
                expected: operation.service(),
                actual: self.service,
            });
        }

        let key = query.cache_key();
        let cached = self.lock_cache().get(&key);
        if let Some(data) = cached {
            debug!(
                operation = %operation,
                endpoint = %self.service,
                cache = %CacheStatus::Hit,
                "Query served from cache"
            );
            return Ok(data);
        }

        let started = Utc::now();
        let result = match self.transport.post_json(&self.endpoint, &query.body()).await {
            Ok(response) => decode_response(response),
            Err(e) => Err(e),
        };
        let elapsed_ms = (Utc::now() - started).num_milliseconds();

        match result {
            Ok(data) => {
                let data = Arc::new(data);
                self.lock_cache().insert(key, Arc::clone(&data));
                info!(
                    operation = %operation,
                    endpoint = %self.service,
                    cache = %CacheStatus::Miss,
                    elapsed_ms,
                    "Query completed"
                );
                Ok(data)
            }
            Err(e) => {
                warn!(
                    operation = %operation,
                    endpoint = %self.service,
                    kind = %e.kind(),
                    elapsed_ms,
                    error = %e,
                    "Query failed"
                );
                Err(e)
            }
        }
    }

    /// Run a query and decode its root `{ total, items }` collection.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Collection<T>, FetchError> {
        let data = self.execute(query).await?;
        decode_collection(query.operation(), &data)
    }
}

fn decode_collection<T: DeserializeOwned>(
    operation: Operation,
    data: &Value,
) -> Result<Collection<T>, FetchError> {
    match data.get(operation.root_field()) {
        None => Err(FetchError::Decode(format!(
            "Missing field {} in {} response",
            operation.root_field(),
            operation
        ))),
        Some(Value::Null) => Ok(Collection::default()),
        Some(field) => Ok(serde_json::from_value(field.clone())?),
    }
}

/// The two clients every view needs.
#[derive(Debug, Clone)]
pub struct CatalogClients {
    pub content: GraphClient,
    pub dam: GraphClient,
}

impl CatalogClients {
    /// Build both clients over a shared transport. Caches stay separate.
    pub fn new(config: &CatalogConfig, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        Ok(Self {
            content: GraphClient::new(
                Service::Content,
                config.endpoint(Service::Content),
                Arc::clone(&transport),
                config.cache_capacity,
            )?,
            dam: GraphClient::new(
                Service::Dam,
                config.endpoint(Service::Dam),
                transport,
                config.cache_capacity,
            )?,
        })
    }

    /// Build both clients over HTTP.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        Self::new(config, Arc::new(ReqwestTransport::new()))
    }

    /// The client serving an operation.
    pub fn client_for(&self, operation: Operation) -> &GraphClient {
        match operation.service() {
            Service::Content => &self.content,
            Service::Dam => &self.dam,
        }
    }

    pub async fn execute(&self, query: &Query) -> Result<Arc<Value>, FetchError> {
        self.client_for(query.operation()).execute(query).await
    }

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Collection<T>, FetchError> {
        self.client_for(query.operation()).fetch(query).await
    }
}
