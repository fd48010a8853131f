//! Records returned by the content graph and the DAM.
//!
//! Field names follow the remote schemas (`ContentGuid`, `productTitle`,
//! `Renditions`, ...). Remote services may send `null` for any scalar, so
//! most fields fall back to their default instead of failing the decode.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{AssetId, ContentGuid};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A remote collection: `{ total, items }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    /// Total match count, when the query selects it.
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            total: None,
            items: Vec::new(),
        }
    }
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { total: None, items }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// The first item. Remote uniqueness is not assumed, so extra matches are ignored.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn into_first(self) -> Option<T> {
        self.items.into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `total` if the remote reported it, otherwise the item count.
    pub fn total_or_len(&self) -> u64 {
        self.total.unwrap_or(self.items.len() as u64)
    }
}

/// Weak reference from a product to its cover image asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cover {
    #[serde(rename = "assetGuid", default)]
    pub asset_guid: Option<AssetId>,
    #[serde(rename = "assetType", default)]
    pub asset_type: Option<String>,
}

/// A product from the `ECProducts_V1` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "ContentGuid")]
    pub content_guid: ContentGuid,
    /// Numeric id, only used for default ordering.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(rename = "productTitle", default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Pre-formatted markup.
    #[serde(rename = "productDescription", default, deserialize_with = "null_as_default")]
    pub description: String,
    /// ISO date string.
    #[serde(rename = "publishDate", default, deserialize_with = "null_as_default")]
    pub publish_date: String,
    #[serde(default)]
    pub cover: Option<Cover>,
}

impl Product {
    /// The cover asset id, if the product has a non-blank one.
    pub fn cover_asset(&self) -> Option<&AssetId> {
        self.cover
            .as_ref()
            .and_then(|cover| cover.asset_guid.as_ref())
            .filter(|id| !id.is_blank())
    }
}

/// A size/format variant of an image asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Url", default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "Width", default, deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(rename = "Height", default, deserialize_with = "null_as_default")]
    pub height: u32,
}

/// Id/name pair used by label groups and label values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRef {
    #[serde(rename = "Id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A label group with its selected values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    #[serde(rename = "Group", default, deserialize_with = "null_as_default")]
    pub group: LabelRef,
    #[serde(rename = "Values", default, deserialize_with = "null_as_default")]
    pub values: Vec<LabelRef>,
}

/// Free-form tag, only selected by the unfiltered search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "Guid", default)]
    pub guid: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// An image asset from the `PublicImageAsset` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(rename = "Id")]
    pub id: AssetId,
    #[serde(rename = "Title", default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "Url", default)]
    pub url: Option<String>,
    /// In remote order; never re-sorted locally.
    #[serde(rename = "Renditions", default, deserialize_with = "null_as_default")]
    pub renditions: Vec<Rendition>,
    #[serde(rename = "Labels", default, deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    #[serde(rename = "MimeType", default)]
    pub mime_type: Option<String>,
    #[serde(rename = "LibraryPath", default)]
    pub library_path: Option<String>,
    #[serde(rename = "Tags", default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

impl ImageAsset {
    /// Label group names, in remote order.
    pub fn label_groups(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| label.group.name.as_str())
    }
}
