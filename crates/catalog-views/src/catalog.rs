//! Catalog list: every product as a navigable card.

use catalog_core::{
    format_price, format_publish_date, image_url, render_description, Collection, ContentGuid,
    Product,
};
use catalog_graph::{CatalogClients, FetchError, Query};
use serde::Serialize;

use crate::remote::{Activation, ActivationCounter, RemoteData};
use crate::route::Route;

/// Render-ready product summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub guid: ContentGuid,
    pub href: String,
    pub title: String,
    pub price: String,
    pub publish_date: String,
    /// Sanitized markup.
    pub description_html: String,
    /// Derived from the cover asset id; no query is issued for it.
    pub image_url: Option<String>,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        Self {
            guid: product.content_guid.clone(),
            href: Route::Product(product.content_guid.clone()).path(),
            title: product.title.clone(),
            price: format_price(product.price),
            publish_date: format_publish_date(&product.publish_date),
            description_html: render_description(&product.description),
            image_url: product.cover_asset().map(image_url),
        }
    }
}

/// What the catalog screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum CatalogState {
    Loading,
    Error(String),
    /// Ready with zero products.
    Empty,
    Ready(Vec<ProductCard>),
}

/// View model for `/`.
#[derive(Debug, Clone, Default)]
pub struct CatalogListView {
    products: RemoteData<Collection<Product>>,
    activations: ActivationCounter,
}

impl CatalogListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new activation and return the query to run for it.
    pub fn activate(&mut self) -> (Activation, Query) {
        self.products = RemoteData::Pending;
        (self.activations.begin(), Query::all_products())
    }

    /// Apply a result. Returns `false` if it belongs to a superseded activation.
    pub fn apply(
        &mut self,
        activation: Activation,
        result: Result<Collection<Product>, FetchError>,
    ) -> bool {
        if !self.activations.is_current(activation) {
            return false;
        }
        self.products = result.into();
        true
    }

    /// Activate and run the query to completion.
    pub async fn load(&mut self, clients: &CatalogClients) {
        let (activation, query) = self.activate();
        let result = clients.fetch::<Product>(&query).await;
        self.apply(activation, result);
    }

    pub fn products(&self) -> &RemoteData<Collection<Product>> {
        &self.products
    }

    pub fn state(&self) -> CatalogState {
        match &self.products {
            RemoteData::Pending => CatalogState::Loading,
            RemoteData::Failure(message) => CatalogState::Error(message.clone()),
            RemoteData::Success(products) if products.is_empty() => CatalogState::Empty,
            RemoteData::Success(products) => {
                CatalogState::Ready(products.items.iter().map(ProductCard::from_product).collect())
            }
        }
    }
}
