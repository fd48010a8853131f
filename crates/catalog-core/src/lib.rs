//! Core types for the asset catalog.
//!
//! This crate provides:
//! - `ContentGuid` / `AssetId` - Newtype identifiers for products and assets
//! - `Product`, `ImageAsset`, `Rendition` - Read-only records from the content graph and DAM
//! - `CatalogConfig` - Endpoint credentials and cache sizing
//! - `image_url`, `rendition_format` - Pure media derivations
//! - `render_description` - Sanitized product description markup
//! - `logging` - Subscriber setup for native binaries

mod config;
mod error;
mod format;
mod ids;
mod markup;
mod media;
mod model;

pub mod logging;

pub use config::*;
pub use error::*;
pub use format::*;
pub use ids::*;
pub use markup::*;
pub use media::*;
pub use model::*;
