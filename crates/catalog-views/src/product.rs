//! Product detail: product first, then its cover image.
//!
//! The image query depends on the cover asset id and is never issued when
//! the product has none.

use catalog_core::{Collection, ContentGuid, ImageAsset, Product};
use catalog_graph::{CatalogClients, FetchError, Query};
use serde::Serialize;
use tracing::debug;

use crate::catalog::ProductCard;
use crate::gallery::RenditionGallery;
use crate::remote::{Activation, ActivationCounter, RemoteData};

/// Progress of the dependent image fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageStage {
    /// The product has not resolved yet.
    #[default]
    Waiting,
    /// The product has no cover asset id; no request was made.
    Skipped,
    Pending,
    /// First match, if any.
    Resolved(Option<ImageAsset>),
    Failed(String),
}

/// Everything the ready screen needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product: ProductCard,
    /// Absent when the cover is missing or matched nothing.
    pub image: Option<ImageAsset>,
    pub gallery: RenditionGallery,
}

impl ProductDetail {
    /// Alt text for the selected rendition.
    pub fn alt_text(&self) -> String {
        self.gallery.alt_text(&self.product.title)
    }
}

/// What the product screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ProductDetailState {
    Loading,
    Error(String),
    NotFound,
    Ready(ProductDetail),
}

/// View model for `/product/:ContentGuid`.
#[derive(Debug, Clone, Default)]
pub struct ProductDetailView {
    guid: Option<ContentGuid>,
    product: RemoteData<Option<Product>>,
    image: ImageStage,
    gallery: RenditionGallery,
    activations: ActivationCounter,
}

impl ProductDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guid(&self) -> Option<&ContentGuid> {
        self.guid.as_ref()
    }

    pub fn image_stage(&self) -> &ImageStage {
        &self.image
    }

    /// Begin resolving a product. A different product starts from a fresh
    /// gallery; refetching the same one keeps the selection, clamped.
    pub fn activate(&mut self, guid: ContentGuid) -> (Activation, Query) {
        let query = Query::product(&guid);
        if self.guid.as_ref() != Some(&guid) {
            self.gallery = RenditionGallery::default();
        }
        self.guid = Some(guid);
        self.product = RemoteData::Pending;
        self.image = ImageStage::Waiting;
        (self.activations.begin(), query)
    }

    /// Apply the product result. Returns the image query to run next, if any.
    pub fn apply_product(
        &mut self,
        activation: Activation,
        result: Result<Collection<Product>, FetchError>,
    ) -> Option<Query> {
        if !self.activations.is_current(activation) {
            return None;
        }

        let product = match result {
            Ok(products) => products.into_first(),
            Err(e) => {
                self.product = RemoteData::Failure(e.message());
                return None;
            }
        };

        let next = match product.as_ref() {
            None => None,
            Some(product) => match product.cover_asset() {
                Some(asset) => {
                    self.image = ImageStage::Pending;
                    Some(Query::image(asset))
                }
                None => {
                    debug!(guid = %product.content_guid, "Product has no cover, skipping image");
                    self.image = ImageStage::Skipped;
                    self.gallery.replace_renditions(Vec::new());
                    None
                }
            },
        };

        self.product = RemoteData::Success(product);
        next
    }

    /// Apply the image result. Returns `false` if stale.
    pub fn apply_image(
        &mut self,
        activation: Activation,
        result: Result<Collection<ImageAsset>, FetchError>,
    ) -> bool {
        if !self.activations.is_current(activation) || self.image != ImageStage::Pending {
            return false;
        }

        match result {
            Ok(images) => {
                let image = images.into_first();
                self.gallery.replace_renditions(
                    image
                        .as_ref()
                        .map(|image| image.renditions.clone())
                        .unwrap_or_default(),
                );
                self.image = ImageStage::Resolved(image);
            }
            Err(e) => self.image = ImageStage::Failed(e.message()),
        }
        true
    }

    /// Activate and run both stages to completion.
    pub async fn load(&mut self, clients: &CatalogClients, guid: ContentGuid) {
        let (activation, query) = self.activate(guid);
        let result = clients.fetch::<Product>(&query).await;
        if let Some(image_query) = self.apply_product(activation, result) {
            let result = clients.fetch::<ImageAsset>(&image_query).await;
            self.apply_image(activation, result);
        }
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

    /// Product errors win over image errors; both win over loading.
    pub fn state(&self) -> ProductDetailState {
        if let Some(message) = self.product.error() {
            return ProductDetailState::Error(message.to_string());
        }
        if let ImageStage::Failed(message) = &self.image {
            return ProductDetailState::Error(message.clone());
        }

        let product = match &self.product {
            RemoteData::Success(Some(product)) => product,
            RemoteData::Success(None) => return ProductDetailState::NotFound,
            _ => return ProductDetailState::Loading,
        };

        let image = match &self.image {
            ImageStage::Waiting | ImageStage::Pending => return ProductDetailState::Loading,
            ImageStage::Skipped => None,
            ImageStage::Resolved(image) => image.clone(),
            ImageStage::Failed(_) => None,
        };

        ProductDetailState::Ready(ProductDetail {
            product: ProductCard::from_product(product),
            image,
            gallery: self.gallery.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{AssetId, Cover, Rendition};
    use catalog_graph::Operation;

    fn product(cover: Option<&str>) -> Product {
        Product {
            content_guid: ContentGuid::new("p1"),
            id: 1,
            price: 5.0,
            title: "Boot".to_string(),
            description: String::new(),
            publish_date: String::new(),
            cover: cover.map(|id| Cover {
                asset_guid: Some(AssetId::new(id)),
                asset_type: None,
            }),
        }
    }

    fn image(renditions: usize) -> ImageAsset {
        ImageAsset {
            id: AssetId::new("img"),
            title: "Boot photo".to_string(),
            url: None,
            renditions: (0..renditions)
                .map(|i| Rendition {
                    name: format!("r{}.jpg", i),
                    url: format!("https://r/{}", i),
                    width: 10,
                    height: 10,
                })
                .collect(),
            labels: Vec::new(),
            mime_type: None,
            library_path: None,
            tags: Vec::new(),
        }
    }

    // === Staging Tests ===

    #[test]
    fn test_image_query_follows_cover() {
        let mut view = ProductDetailView::new();
        let (activation, query) = view.activate(ContentGuid::new("p1"));
        assert_eq!(query.variable("ContentGuid"), Some("p1"));

        let next = view
            .apply_product(activation, Ok(Collection::new(vec![product(Some("img"))])))
            .unwrap();
        assert_eq!(next.operation(), Operation::GetImage);
        assert_eq!(next.variable("assetGuid"), Some("img"));
        assert_eq!(view.state(), ProductDetailState::Loading);

        view.apply_image(activation, Ok(Collection::new(vec![image(2)])));
        match view.state() {
            ProductDetailState::Ready(detail) => {
                assert_eq!(detail.gallery.len(), 2);
                assert_eq!(detail.alt_text(), "Boot - r0.jpg");
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_no_cover_skips_image() {
        let mut view = ProductDetailView::new();
        let (activation, _) = view.activate(ContentGuid::new("p1"));

        let next = view.apply_product(activation, Ok(Collection::new(vec![product(None)])));

        assert!(next.is_none());
        assert_eq!(view.image_stage(), &ImageStage::Skipped);
        assert!(matches!(view.state(), ProductDetailState::Ready(d) if d.image.is_none()));
    }

    #[test]
    fn test_zero_matches_is_not_found() {
        let mut view = ProductDetailView::new();
        let (activation, _) = view.activate(ContentGuid::new("missing"));
        assert!(view.apply_product(activation, Ok(Collection::default())).is_none());
        assert_eq!(view.state(), ProductDetailState::NotFound);
    }

    #[test]
    fn test_image_without_match_renders_no_renditions() {
        let mut view = ProductDetailView::new();
        let (activation, _) = view.activate(ContentGuid::new("p1"));
        view.apply_product(activation, Ok(Collection::new(vec![product(Some("img"))])));
        view.apply_image(activation, Ok(Collection::default()));

        match view.state() {
            ProductDetailState::Ready(detail) => {
                assert!(detail.image.is_none());
                assert!(detail.gallery.is_empty());
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    // === Error Tests ===

    #[test]
    fn test_product_error() {
        let mut view = ProductDetailView::new();
        let (activation, _) = view.activate(ContentGuid::new("p1"));
        view.apply_product(activation, Err(FetchError::Transport("offline".to_string())));
        assert_eq!(view.state(), ProductDetailState::Error("offline".to_string()));
    }

    #[test]
    fn test_image_error() {
        let mut view = ProductDetailView::new();
        let (activation, _) = view.activate(ContentGuid::new("p1"));
        view.apply_product(activation, Ok(Collection::new(vec![product(Some("img"))])));
        view.apply_image(
            activation,
            Err(FetchError::Remote {
                messages: vec!["Bad asset".to_string()],
            }),
        );
        assert_eq!(view.state(), ProductDetailState::Error("Bad asset".to_string()));
    }

    // === Activation Tests ===

    #[test]
    fn test_stale_image_discarded() {
        let mut view = ProductDetailView::new();
        let (first, _) = view.activate(ContentGuid::new("p1"));
        view.apply_product(first, Ok(Collection::new(vec![product(Some("img"))])));

        let (second, _) = view.activate(ContentGuid::new("p2"));
        assert!(!view.apply_image(first, Ok(Collection::new(vec![image(3)]))));
        assert!(view.apply_product(second, Ok(Collection::default())).is_none());
        assert_eq!(view.state(), ProductDetailState::NotFound);
    }

    #[test]
    fn test_gallery_clamps_across_refetch() {
        let mut view = ProductDetailView::new();
        let (first, _) = view.activate(ContentGuid::new("p1"));
        view.apply_product(first, Ok(Collection::new(vec![product(Some("img"))])));
        view.apply_image(first, Ok(Collection::new(vec![image(4)])));
        view.select_rendition(3);

        let (second, _) = view.activate(ContentGuid::new("p1"));
        view.apply_product(second, Ok(Collection::new(vec![product(Some("img"))])));
        view.apply_image(second, Ok(Collection::new(vec![image(2)])));

        assert_eq!(view.gallery().selected_index(), Some(1));
    }

    #[test]
    fn test_new_product_resets_gallery() {
        let mut view = ProductDetailView::new();
        let (first, _) = view.activate(ContentGuid::new("p1"));
        view.apply_product(first, Ok(Collection::new(vec![product(Some("img"))])));
        view.apply_image(first, Ok(Collection::new(vec![image(4)])));
        view.select_rendition(3);
        view.open_modal();

        let (second, _) = view.activate(ContentGuid::new("p2"));
        assert!(view.gallery().is_empty());
        assert!(!view.gallery().is_modal_open());

        view.apply_product(second, Ok(Collection::new(vec![product(Some("img"))])));
        view.apply_image(second, Ok(Collection::new(vec![image(4)])));
        assert_eq!(view.gallery().selected_index(), Some(0));
    }
}
