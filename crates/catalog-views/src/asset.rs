//! Asset detail: one image plus the products that use it as a cover.

use catalog_core::{AssetId, Collection, ImageAsset, Product};
use catalog_graph::{CatalogClients, FetchError, Query};
use serde::Serialize;
use tracing::warn;

use crate::catalog::ProductCard;
use crate::gallery::RenditionGallery;
use crate::remote::{Activation, ActivationCounter, RemoteData};

/// Products whose cover is the viewed asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelatedProducts {
    pub total: u64,
    pub products: Vec<ProductCard>,
}

impl RelatedProducts {
    pub fn from_collection(products: &Collection<Product>) -> Self {
        Self {
            total: products.total_or_len(),
            products: products.items.iter().map(ProductCard::from_product).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `"Found N products"`, or `"No products found"`.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            "No products found".to_string()
        } else {
            format!("Found {} products", self.total)
        }
    }
}

/// Everything the ready screen needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetDetail {
    pub asset: ImageAsset,
    pub gallery: RenditionGallery,
    pub format: String,
    pub resolution: Option<String>,
    /// The selected rendition's URL.
    pub download_url: Option<String>,
    /// Still pending, or resolved. Failures are already folded into empty.
    pub related: RemoteData<RelatedProducts>,
}

impl AssetDetail {
    pub fn alt_text(&self) -> String {
        self.gallery.alt_text(&self.asset.title)
    }
}

/// What the asset screen shows. Only the primary fetch decides it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum AssetDetailState {
    Loading,
    Error(String),
    NotFound,
    Ready(AssetDetail),
}

/// The two independent queries for one activation.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetQueries {
    pub activation: Activation,
    pub asset: Query,
    pub related: Query,
}

/// View model for `/dam-image/:imageId`.
#[derive(Debug, Clone, Default)]
pub struct AssetDetailView {
    asset_id: Option<AssetId>,
    asset: RemoteData<Option<ImageAsset>>,
    related: RemoteData<RelatedProducts>,
    gallery: RenditionGallery,
    activations: ActivationCounter,
}

impl AssetDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset_id(&self) -> Option<&AssetId> {
        self.asset_id.as_ref()
    }

    /// Begin loading an asset. Both returned queries may run concurrently.
    /// Switching to another asset resets the gallery selection.
    pub fn activate(&mut self, id: AssetId) -> AssetQueries {
        let queries = AssetQueries {
            activation: self.activations.begin(),
            asset: Query::image(&id),
            related: Query::products_by_cover(&id),
        };
        if self.asset_id.as_ref() != Some(&id) {
            self.gallery = RenditionGallery::default();
        }
        self.asset_id = Some(id);
        self.asset = RemoteData::Pending;
        self.related = RemoteData::Pending;
        queries
    }

    /// Apply the primary result. Returns `false` if stale.
    pub fn apply_asset(
        &mut self,
        activation: Activation,
        result: Result<Collection<ImageAsset>, FetchError>,
    ) -> bool {
        if !self.activations.is_current(activation) {
            return false;
        }
        self.asset = result.map(Collection::into_first).into();
        let renditions = match &self.asset {
            RemoteData::Success(Some(asset)) => asset.renditions.clone(),
            _ => Vec::new(),
        };
        self.gallery.replace_renditions(renditions);
        true
    }

    /// Apply the related-products result. A failure degrades to an empty
    /// list and never affects the main state.
    pub fn apply_related(
        &mut self,
        activation: Activation,
        result: Result<Collection<Product>, FetchError>,
    ) -> bool {
        if !self.activations.is_current(activation) {
            return false;
        }
        let related = match result {
            Ok(products) => RelatedProducts::from_collection(&products),
            Err(e) => {
                warn!(
                    asset = ?self.asset_id.as_ref().map(AssetId::as_str),
                    kind = %e.kind(),
                    error = %e,
                    "Related products unavailable"
                );
                RelatedProducts::default()
            }
        };
        self.related = RemoteData::Success(related);
        true
    }

    /// Activate and run both queries concurrently to completion.
    pub async fn load(&mut self, clients: &CatalogClients, id: AssetId) {
        let queries = self.activate(id);
        let (asset, related) = futures::join!(
            clients.fetch::<ImageAsset>(&queries.asset),
            clients.fetch::<Product>(&queries.related)
        );
        self.apply_asset(queries.activation, asset);
        self.apply_related(queries.activation, related);
    }

    pub fn gallery(&self) -> &RenditionGallery {
        &self.gallery
    }

    pub fn select_rendition(&mut self, index: usize) -> Option<usize> {
        self.gallery.select(index)
    }

    pub fn open_modal(&mut self) -> bool {
        self.gallery.open_modal()
    }

    pub fn close_modal(&mut self) {
        self.gallery.close_modal()
    }

    pub fn state(&self) -> AssetDetailState {
        match &self.asset {
            RemoteData::Pending => AssetDetailState::Loading,
            RemoteData::Failure(message) => AssetDetailState::Error(message.clone()),
            RemoteData::Success(None) => AssetDetailState::NotFound,
            RemoteData::Success(Some(asset)) => AssetDetailState::Ready(AssetDetail {
                asset: asset.clone(),
                gallery: self.gallery.clone(),
                format: self.gallery.format(),
                resolution: self.gallery.resolution(),
                download_url: self.gallery.selected().map(|r| r.url.clone()),
                related: self.related.clone(),
            }),
        }
    }
}
