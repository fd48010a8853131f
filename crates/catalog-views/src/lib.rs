//! View models for the asset catalog.
//!
//! Each screen pairs its queries with presentation state and derives a
//! single render-ready state value:
//! - [`CatalogListView`] - all products (`/`)
//! - [`ProductDetailView`] - product, then its cover image (`/product/:ContentGuid`)
//! - [`AssetSearchView`] - label search over image assets (`/search-dam`)
//! - [`AssetDetailView`] - one asset plus related products (`/dam-image/:imageId`)
//!
//! View models never perform I/O on their own. `activate` hands out the
//! queries to run; `apply` takes results back and drops any that belong to a
//! superseded activation. `load` does both against [`CatalogClients`].
//!
//! [`CatalogClients`]: catalog_graph::CatalogClients

mod asset;
mod catalog;
mod gallery;
mod product;
mod remote;
mod route;
mod search;

pub use asset::{AssetDetail, AssetDetailState, AssetDetailView, AssetQueries, RelatedProducts};
pub use catalog::{CatalogListView, CatalogState, ProductCard};
pub use gallery::{alt_text, RenditionGallery};
pub use product::{ImageStage, ProductDetail, ProductDetailState, ProductDetailView};
pub use remote::{Activation, ActivationCounter, RemoteData};
pub use route::Route;
pub use search::{AssetCard, AssetSearchView, SearchRequest, SearchState, SEARCH_PLACEHOLDER};
