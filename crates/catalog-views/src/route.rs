//! Navigation between the four screens.

use std::fmt;

use catalog_core::{AssetId, ContentGuid};
use serde::Serialize;

/// A screen and the identifier it carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "screen", content = "id", rename_all = "snake_case")]
pub enum Route {
    /// `/`
    Catalog,
    /// `/product/:ContentGuid`
    Product(ContentGuid),
    /// `/search-dam`
    AssetSearch,
    /// `/dam-image/:imageId`
    Asset(AssetId),
}

impl Route {
    /// Match a path exactly. Query strings and fragments are ignored, as is a
    /// single trailing slash. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.strip_prefix('/')?;
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };

        let segments: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        match segments.as_slice() {
            [] => Some(Route::Catalog),
            ["product", guid] if !guid.is_empty() => Some(Route::Product(ContentGuid::new(*guid))),
            ["search-dam"] => Some(Route::AssetSearch),
            ["dam-image", id] if !id.is_empty() => Some(Route::Asset(AssetId::new(*id))),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Catalog => "/".to_string(),
            Route::Product(guid) => format!("/product/{}", guid),
            Route::AssetSearch => "/search-dam".to_string(),
            Route::Asset(id) => format!("/dam-image/{}", id),
        }
    }

    /// Where the back link leads.
    pub fn back(&self) -> Option<Route> {
        match self {
            Route::Catalog => None,
            Route::Product(_) | Route::AssetSearch => Some(Route::Catalog),
            Route::Asset(_) => Some(Route::AssetSearch),
        }
    }

    /// Label for the back link.
    pub fn back_label(&self) -> Option<&'static str> {
        match self {
            Route::Catalog => None,
            Route::Product(_) | Route::AssetSearch => Some("Back to Home"),
            Route::Asset(_) => Some("Back to Gallery"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Catalog => "Products",
            Route::Product(_) => "Product Details",
            Route::AssetSearch => "Digital Asset Gallery",
            Route::Asset(_) => "Image Details",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
