//! Media derivations: public image URLs and rendition formats.

use crate::ids::AssetId;

/// Base URL of the public image CDN.
pub const IMAGE_BASE_URL: &str = "https://images.cmp.optimizely.com/";

/// Public URL for an asset. No network call and no existence check.
pub fn image_url(asset: &AssetId) -> String {
    format!("{}{}", IMAGE_BASE_URL, asset.as_str())
}

/// Display format derived from a rendition name's file extension.
///
/// `"hero.large.jpg"` yields `Some("JPG")`. Returns `None` when the name has no
/// `.` or ends with one.
pub fn rendition_format(name: &str) -> Option<String> {
    let (_, extension) = name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension.to_uppercase())
}

/// Label shown when [`rendition_format`] has nothing to offer.
pub const UNKNOWN_FORMAT: &str = "Unknown";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_concatenates() {
        let url = image_url(&AssetId::new("0f3a"));
        assert_eq!(url, "https://images.cmp.optimizely.com/0f3a");
    }

    #[test]
    fn test_image_url_forwards_as_is() {
        let url = image_url(&AssetId::new("not a guid"));
        assert_eq!(url, "https://images.cmp.optimizely.com/not a guid");
    }

    #[test]
    fn test_rendition_format_uses_last_suffix() {
        assert_eq!(rendition_format("hero.large.jpg"), Some("JPG".to_string()));
        assert_eq!(rendition_format("thumb.png"), Some("PNG".to_string()));
    }

    #[test]
    fn test_rendition_format_without_suffix() {
        assert_eq!(rendition_format("original"), None);
        assert_eq!(rendition_format("trailing."), None);
        assert_eq!(rendition_format(""), None);
    }
}
