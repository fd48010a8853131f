//! Terminal rendering of view states.
//!
//! In JSON mode the state itself is printed. Error and not-found states are
//! returned as [`ScreenError`]s so the process exits non-zero.

use anyhow::{bail, Result};
use catalog_core::{plain_text, ErrorKind, Rendition};
use catalog_views::{
    AssetCard, AssetDetailState, CatalogState, ProductCard, ProductDetailState, RenditionGallery,
    Route, SearchState,
};
use console::style;
use thiserror::Error;

use crate::output::Output;

/// Why a screen could not be shown.
#[derive(Error, Debug, PartialEq)]
pub enum ScreenError {
    /// The screen's request failed; the view's message is kept verbatim.
    #[error("{0}")]
    Failed(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("No screen matches '{0}'")]
    UnknownPath(String),
}

impl ScreenError {
    /// Value of the `kind` field in JSON error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ScreenError::Failed(_) => "request",
            ScreenError::NotFound(_) => ErrorKind::NotFound.as_str(),
            ScreenError::UnknownPath(_) => "usage",
        }
    }
}

pub fn catalog(out: &Output, state: &CatalogState) -> Result<()> {
    if out.is_json() {
        out.json(state);
    }
    match state {
        CatalogState::Loading => out.info("Loading..."),
        CatalogState::Error(message) => bail!(ScreenError::Failed(message.clone())),
        CatalogState::Empty => out.info("No products found"),
        CatalogState::Ready(cards) => {
            out.header(Route::Catalog.title());
            for card in cards {
                product_card(out, card);
            }
        }
    }
    Ok(())
}

pub fn product(out: &Output, state: &ProductDetailState) -> Result<()> {
    if out.is_json() {
        out.json(state);
    }
    let detail = match state {
        ProductDetailState::Loading => {
            out.info("Loading...");
            return Ok(());
        }
        ProductDetailState::Error(message) => bail!(ScreenError::Failed(message.clone())),
        ProductDetailState::NotFound => bail!(ScreenError::NotFound("Product")),
        ProductDetailState::Ready(detail) => detail,
    };

    let card = &detail.product;
    out.header(&card.title);
    out.kv("Price", &card.price);
    out.kv("Published", &card.publish_date);
    gallery(out, &detail.gallery, &card.title);
    out.header("Description");
    out.text(&plain_text(&card.description_html));
    back_link(out, &Route::Product(card.guid.clone()));
    Ok(())
}

pub fn asset(out: &Output, state: &AssetDetailState) -> Result<()> {
    if out.is_json() {
        out.json(state);
    }
    let detail = match state {
        AssetDetailState::Loading => {
            out.info("Loading...");
            return Ok(());
        }
        AssetDetailState::Error(message) => bail!(ScreenError::Failed(message.clone())),
        AssetDetailState::NotFound => bail!(ScreenError::NotFound("Image")),
        AssetDetailState::Ready(detail) => detail,
    };

    out.header(&detail.asset.title);
    out.kv("ID", detail.asset.id.as_str());
    out.kv("Format", &detail.format);
    if let Some(url) = &detail.download_url {
        out.kv("Download", url);
    }
    gallery(out, &detail.gallery, &detail.asset.title);

    out.header("Products Using This Image");
    match detail.related.value() {
        None => out.info("Loading..."),
        Some(related) => {
            out.info(&related.summary());
            for card in &related.products {
                let title = style(&card.title).bold();
                out.list_item(&format!("{} {}", title, style(&card.href).dim()));
            }
        }
    }
    back_link(out, &Route::Asset(detail.asset.id.clone()));
    Ok(())
}

pub fn search(out: &Output, term: &str, state: &SearchState) -> Result<()> {
    if out.is_json() {
        out.json(state);
    }
    out.header(Route::AssetSearch.title());
    if !term.is_empty() {
        out.kv("Label", term);
    }
    match state {
        SearchState::Loading => out.info("Loading..."),
        SearchState::Error(message) => bail!(ScreenError::Failed(message.clone())),
        SearchState::Empty => out.info("No images found"),
        SearchState::Ready(cards) => {
            for card in cards {
                asset_card(out, card);
            }
        }
    }
    Ok(())
}

fn product_card(out: &Output, card: &ProductCard) {
    out.list_item(&format!("{} {}", style(&card.title).bold(), style(&card.price).green()));
    out.kv("Published", &card.publish_date);
    out.kv("Link", &card.href);
    if let Some(url) = &card.image_url {
        out.kv("Image", url);
    }
}

fn asset_card(out: &Output, card: &AssetCard) {
    out.list_item(&style(&card.title).bold().to_string());
    if !card.labels.is_empty() {
        out.kv("Labels", &card.labels.join(", "));
    }
    out.kv("Link", &card.href);
    if let Some(url) = &card.thumbnail_url {
        out.kv("Thumbnail", url);
    }
}

fn gallery(out: &Output, gallery: &RenditionGallery, title: &str) {
    let Some(selected) = gallery.selected() else {
        out.info("No image available");
        return;
    };
    out.kv("Image", &gallery.alt_text(title));
    out.kv("URL", &selected.url);
    out.kv("Resolution", &gallery.resolution().unwrap_or_default());
    let current = gallery.selected_index();
    for (index, rendition) in gallery.renditions().iter().enumerate() {
        out.text(&rendition_line(index, current == Some(index), rendition));
    }
}

fn back_link(out: &Output, route: &Route) {
    if let (Some(parent), Some(label)) = (route.back(), route.back_label()) {
        out.kv(label, &parent.path());
    }
}

/// One thumbnail row; the selected rendition is marked.
fn rendition_line(index: usize, selected: bool, rendition: &Rendition) -> String {
    let marker = if selected { ">" } else { " " };
    format!(
        "{} [{}] {} ({} x {})",
        marker, index, rendition.name, rendition.width, rendition.height
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ContentGuid;
    use catalog_views::ProductDetail;

    fn rendition(name: &str) -> Rendition {
        Rendition {
            name: name.to_string(),
            url: format!("https://r/{}", name),
            width: 640,
            height: 480,
        }
    }

    fn quiet() -> Output {
        Output::new(false, true)
    }

    // === Rendition Line Tests ===

    #[test]
    fn test_rendition_line_marks_selection() {
        assert_eq!(rendition_line(1, true, &rendition("a.jpg")), "> [1] a.jpg (640 x 480)");
        assert_eq!(rendition_line(0, false, &rendition("b.png")), "  [0] b.png (640 x 480)");
    }

    // === State Tests ===

    #[test]
    fn test_error_states_fail() {
        let err = catalog(&quiet(), &CatalogState::Error("offline".to_string())).unwrap_err();
        assert_eq!(err.to_string(), "offline");

        let err = product(&quiet(), &ProductDetailState::NotFound).unwrap_err();
        assert_eq!(err.to_string(), "Product not found");

        let err = asset(&quiet(), &AssetDetailState::NotFound).unwrap_err();
        assert_eq!(err.to_string(), "Image not found");
    }

    #[test]
    fn test_error_states_are_typed() {
        let err = search(&quiet(), "x", &SearchState::Error("down".to_string())).unwrap_err();
        let screen = err.downcast_ref::<ScreenError>().unwrap();
        assert_eq!(screen, &ScreenError::Failed("down".to_string()));
        assert_eq!(screen.kind(), "request");

        let err = product(&quiet(), &ProductDetailState::NotFound).unwrap_err();
        assert_eq!(err.downcast_ref::<ScreenError>().map(ScreenError::kind), Some("not_found"));
    }

    #[test]
    fn test_ready_states_succeed() {
        assert!(catalog(&quiet(), &CatalogState::Empty).is_ok());
        assert!(search(&quiet(), "", &SearchState::Empty).is_ok());

        let detail = ProductDetail {
            product: ProductCard {
                guid: ContentGuid::new("p1"),
                href: "/product/p1".to_string(),
                title: "Boot".to_string(),
                price: "$1.00".to_string(),
                publish_date: "1/1/2024".to_string(),
                description_html: "<p>Warm</p>".to_string(),
                image_url: None,
            },
            image: None,
            gallery: RenditionGallery::new(vec![rendition("a.jpg")]),
        };
        assert!(product(&quiet(), &ProductDetailState::Ready(detail)).is_ok());
    }
}
