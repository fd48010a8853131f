//! GraphQL access for the asset catalog.
//!
//! Two remote endpoints serve the catalog: the content graph (products) and
//! the DAM (image assets). Each gets its own [`GraphClient`] with its own
//! credential and its own bounded response cache.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_core::{CatalogConfig, Product};
//! use catalog_graph::{CatalogClients, Query};
//!
//! let config = CatalogConfig::from_env()?;
//! let clients = CatalogClients::from_config(&config)?;
//!
//! let products = clients.fetch::<Product>(&Query::all_products()).await?;
//! for product in &products.items {
//!     println!("{}", product.title);
//! }
//! ```

mod cache;
mod client;
mod error;
mod query;
mod response;
mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub use cache::{CacheKey, CacheStats, CacheStatus, ResponseCache};
pub use client::{CatalogClients, GraphClient};
pub use error::FetchError;
pub use query::{Operation, Query};
pub use response::{decode_response, GraphError, GraphResponse, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
