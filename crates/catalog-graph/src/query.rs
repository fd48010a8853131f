//! The fixed catalog of GraphQL operations.
//!
//! Documents are sent verbatim. Variables are forwarded as given, without
//! local validation; malformed identifiers surface as remote errors.

use std::fmt;

use catalog_core::{AssetId, ContentGuid, Service};
use serde_json::{json, Map, Value};

use crate::cache::CacheKey;

const GET_ALL_PRODUCTS: &str = r#"query GetAllProducts {
  ECProducts_V1(orderBy: { id: DESC }) {
    total
    items {
      ContentGuid
      id
      price
      productDescription
      productTitle
      publishDate
      cover {
        assetGuid
        assetType
      }
    }
  }
}"#;

const GET_PRODUCT: &str = r#"query GetProduct($ContentGuid: String!) {
  ECProducts_V1(where: { ContentGuid: { eq: $ContentGuid } }) {
    items {
      ContentGuid
      id
      price
      productDescription
      productTitle
      publishDate
      cover {
        assetGuid
        assetType
      }
    }
  }
}"#;

const GET_PRODUCTS_BY_COVER_GUID: &str = r#"query GetProductsByCoverGuid($ContentGuid: String!) {
  ECProducts_V1(where: { cover: { assetGuid: { eq: $ContentGuid } } }) {
    total
    items {
      ContentGuid
      id
      price
      productDescription
      productTitle
      publishDate
      cover {
        assetGuid
        assetType
      }
    }
  }
}"#;

const GET_IMAGE: &str = r#"query GetImage($assetGuid: String!) {
  PublicImageAsset(where: { Id: { eq: $assetGuid } }) {
    items {
      Id
      Title
      Url
      Renditions {
        Name
        Url
        Height
        Width
      }
    }
  }
}"#;

const SEARCH_IMAGES: &str = r#"query SearchImages($labelGroupName: String!) {
  PublicImageAsset(
    where: { Labels: { Group: { Name: { startsWith: $labelGroupName } } } }
    orderBy: { DateModified: DESC }
  ) {
    items {
      Id
      Title
      Url
      Renditions {
        Name
        Url
        Height
        Width
      }
      Labels {
        Group {
          Id
          Name
        }
        Values {
          Id
          Name
        }
      }
      MimeType
      LibraryPath
    }
  }
}"#;

const SEARCH_ALL_IMAGES: &str = r#"query SearchAllImages {
  PublicImageAsset(orderBy: { DateModified: DESC }) {
    items {
      Id
      Title
      Url
      Renditions {
        Name
        Url
        Height
        Width
      }
      Labels {
        Group {
          Id
          Name
        }
        Values {
          Id
          Name
        }
      }
      MimeType
      LibraryPath
      Tags {
        Guid
        Name
      }
    }
  }
}"#;

/// A named operation from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAllProducts,
    GetProduct,
    GetProductsByCoverGuid,
    GetImage,
    SearchImages,
    SearchAllImages,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::GetAllProducts,
        Operation::GetProduct,
        Operation::GetProductsByCoverGuid,
        Operation::GetImage,
        Operation::SearchImages,
        Operation::SearchAllImages,
    ];

    /// GraphQL operation name, also sent as `operationName`.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetAllProducts => "GetAllProducts",
            Operation::GetProduct => "GetProduct",
            Operation::GetProductsByCoverGuid => "GetProductsByCoverGuid",
            Operation::GetImage => "GetImage",
            Operation::SearchImages => "SearchImages",
            Operation::SearchAllImages => "SearchAllImages",
        }
    }

    /// Which endpoint serves this operation.
    pub fn service(&self) -> Service {
        match self {
            Operation::GetAllProducts
            | Operation::GetProduct
            | Operation::GetProductsByCoverGuid => Service::Content,
            Operation::GetImage | Operation::SearchImages | Operation::SearchAllImages => {
                Service::Dam
            }
        }
    }

    /// Top-level field holding the `{ total, items }` collection.
    pub fn root_field(&self) -> &'static str {
        match self.service() {
            Service::Content => "ECProducts_V1",
            Service::Dam => "PublicImageAsset",
        }
    }

    pub fn document(&self) -> &'static str {
        match self {
            Operation::GetAllProducts => GET_ALL_PRODUCTS,
            Operation::GetProduct => GET_PRODUCT,
            Operation::GetProductsByCoverGuid => GET_PRODUCTS_BY_COVER_GUID,
            Operation::GetImage => GET_IMAGE,
            Operation::SearchImages => SEARCH_IMAGES,
            Operation::SearchAllImages => SEARCH_ALL_IMAGES,
        }
    }

    /// Variable names the document declares.
    pub fn parameters(&self) -> &'static [&'static str] {
        match self {
            Operation::GetAllProducts | Operation::SearchAllImages => &[],
            Operation::GetProduct | Operation::GetProductsByCoverGuid => &["ContentGuid"],
            Operation::GetImage => &["assetGuid"],
            Operation::SearchImages => &["labelGroupName"],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An operation paired with its variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    operation: Operation,
    variables: Map<String, Value>,
}

impl Query {
    fn new(operation: Operation) -> Self {
        Self {
            operation,
            variables: Map::new(),
        }
    }

    fn with_variable(mut self, name: &str, value: impl Into<String>) -> Self {
        self.variables
            .insert(name.to_string(), Value::String(value.into()));
        self
    }

    /// All products, newest id first.
    pub fn all_products() -> Self {
        Self::new(Operation::GetAllProducts)
    }

    /// Exact match on `ContentGuid`.
    pub fn product(guid: &ContentGuid) -> Self {
        Self::new(Operation::GetProduct).with_variable("ContentGuid", guid.as_str())
    }

    /// Products whose cover references the asset. The remote variable keeps
    /// the name `ContentGuid` even though it carries an asset id.
    pub fn products_by_cover(asset: &AssetId) -> Self {
        Self::new(Operation::GetProductsByCoverGuid).with_variable("ContentGuid", asset.as_str())
    }

    /// Exact match on the asset `Id`.
    pub fn image(asset: &AssetId) -> Self {
        Self::new(Operation::GetImage).with_variable("assetGuid", asset.as_str())
    }

    /// Assets with a label group name starting with `term`. The term is sent as given.
    pub fn search_images(term: impl Into<String>) -> Self {
        Self::new(Operation::SearchImages).with_variable("labelGroupName", term)
    }

    /// Every asset, most recently modified first.
    pub fn all_images() -> Self {
        Self::new(Operation::SearchAllImages)
    }

    /// Pick the search operation for a committed term: blank after trimming
    /// selects [`Query::all_images`].
    pub fn search(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            Self::all_images()
        } else {
            Self::search_images(term)
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// A string variable by name.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).and_then(Value::as_str)
    }

    /// JSON request body.
    pub fn body(&self) -> Value {
        json!({
            "query": self.operation.document(),
            "variables": self.variables,
            "operationName": self.operation.name(),
        })
    }

    /// Cache key for the exact (operation, variables) pair.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.operation, &self.variables)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operation, Value::Object(self.variables.clone()))
    }
}
