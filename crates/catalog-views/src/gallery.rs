//! Rendition selection and zoom state for the detail views.

use catalog_core::{rendition_format, Rendition, UNKNOWN_FORMAT};
use serde::Serialize;

/// Renditions of one image plus the transient selection/zoom state.
///
/// The selected index always points into the renditions, or is absent when
/// there are none. Replacing the renditions clamps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenditionGallery {
    renditions: Vec<Rendition>,
    selected: usize,
    modal_open: bool,
}

impl RenditionGallery {
    pub fn new(renditions: Vec<Rendition>) -> Self {
        Self {
            renditions,
            selected: 0,
            modal_open: false,
        }
    }

    /// Swap in a refetched sequence, keeping the selection where possible.
    pub fn replace_renditions(&mut self, renditions: Vec<Rendition>) {
        self.renditions = renditions;
        if self.renditions.is_empty() {
            self.selected = 0;
            self.modal_open = false;
        } else {
            self.selected = self.selected.min(self.renditions.len() - 1);
        }
    }

    pub fn renditions(&self) -> &[Rendition] {
        &self.renditions
    }

    pub fn is_empty(&self) -> bool {
        self.renditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renditions.len()
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.renditions.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected(&self) -> Option<&Rendition> {
        self.renditions.get(self.selected)
    }

    /// Select a rendition; out-of-range indices clamp to the last one.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if self.renditions.is_empty() {
            return None;
        }
        self.selected = index.min(self.renditions.len() - 1);
        Some(self.selected)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Open the zoom modal. No-op without a selected rendition.
    pub fn open_modal(&mut self) -> bool {
        self.modal_open = self.selected().is_some();
        self.modal_open
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Display format of the selected rendition.
    pub fn format(&self) -> String {
        self.selected()
            .and_then(|r| rendition_format(&r.name))
            .unwrap_or_else(|| UNKNOWN_FORMAT.to_string())
    }

    /// `"W x H"` of the selected rendition.
    pub fn resolution(&self) -> Option<String> {
        self.selected().map(|r| format!("{} x {}", r.width, r.height))
    }

    /// Alt text for the selected rendition: `"{title} - {name}"`.
    pub fn alt_text(&self, title: &str) -> String {
        alt_text(title, self.selected())
    }
}

/// Alt text for a specific rendition.
pub fn alt_text(title: &str, rendition: Option<&Rendition>) -> String {
    match rendition {
        Some(r) => format!("{} - {}", title, r.name),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendition(name: &str, width: u32, height: u32) -> Rendition {
        Rendition {
            name: name.to_string(),
            url: format!("https://r/{}", name),
            width,
            height,
        }
    }

    fn renditions(n: usize) -> Vec<Rendition> {
        (0..n).map(|i| rendition(&format!("r{}.jpg", i), 100, 50)).collect()
    }

    // === Selection Tests ===

    #[test]
    fn test_defaults_to_first() {
        let gallery = RenditionGallery::new(renditions(3));
        assert_eq!(gallery.selected_index(), Some(0));
        assert!(!gallery.is_modal_open());
    }

    #[test]
    fn test_select_clamps() {
        let mut gallery = RenditionGallery::new(renditions(3));
        assert_eq!(gallery.select(1), Some(1));
        assert_eq!(gallery.select(9), Some(2));
    }

    #[test]
    fn test_replace_clamps_into_range() {
        let mut gallery = RenditionGallery::new(renditions(5));
        gallery.select(4);

        gallery.replace_renditions(renditions(2));
        assert_eq!(gallery.selected_index(), Some(1));

        gallery.replace_renditions(renditions(4));
        assert_eq!(gallery.selected_index(), Some(1));
    }

    #[test]
    fn test_replace_with_empty() {
        let mut gallery = RenditionGallery::new(renditions(2));
        gallery.select(1);
        gallery.open_modal();

        gallery.replace_renditions(Vec::new());

        assert_eq!(gallery.selected_index(), None);
        assert!(gallery.selected().is_none());
        assert!(!gallery.is_modal_open());
    }

    // === Modal Tests ===

    #[test]
    fn test_modal_needs_rendition() {
        let mut gallery = RenditionGallery::default();
        assert!(!gallery.open_modal());

        let mut gallery = RenditionGallery::new(renditions(1));
        assert!(gallery.open_modal());
        gallery.close_modal();
        assert!(!gallery.is_modal_open());
    }

    // === Display Tests ===

    #[test]
    fn test_format_and_resolution() {
        let mut gallery = RenditionGallery::new(vec![
            rendition("thumb.png", 100, 80),
            rendition("original", 1600, 1200),
        ]);
        assert_eq!(gallery.format(), "PNG");
        assert_eq!(gallery.resolution().as_deref(), Some("100 x 80"));

        gallery.select(1);
        assert_eq!(gallery.format(), "Unknown");
        assert_eq!(gallery.resolution().as_deref(), Some("1600 x 1200"));
    }

    #[test]
    fn test_alt_text() {
        let gallery = RenditionGallery::new(vec![rendition("large.jpg", 1, 1)]);
        assert_eq!(gallery.alt_text("Shoe"), "Shoe - large.jpg");
        assert_eq!(RenditionGallery::default().alt_text("Shoe"), "Shoe");
    }
}
