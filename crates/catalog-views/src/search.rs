//! Asset search: typed input, committed term, and result cards.
//!
//! Typing only updates the input. A query is issued on commit (Enter or the
//! search button), with the trimmed input as the new committed term.

use catalog_core::{AssetId, Collection, ImageAsset};
use catalog_graph::{CatalogClients, FetchError, Query};
use serde::Serialize;

use crate::remote::{Activation, ActivationCounter, RemoteData};
use crate::route::Route;

pub const SEARCH_PLACEHOLDER: &str = "Search by label or keyword...";

/// Render-ready search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetCard {
    pub id: AssetId,
    pub href: String,
    pub title: String,
    /// First rendition, in remote order.
    pub thumbnail_url: Option<String>,
    /// Label group names.
    pub labels: Vec<String>,
}

impl AssetCard {
    pub fn from_asset(asset: &ImageAsset) -> Self {
        Self {
            id: asset.id.clone(),
            href: Route::Asset(asset.id.clone()).path(),
            title: asset.title.clone(),
            thumbnail_url: asset.renditions.first().map(|r| r.url.clone()),
            labels: asset.label_groups().map(str::to_string).collect(),
        }
    }
}

/// What the search screen shows below the search bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum SearchState {
    Loading,
    Error(String),
    /// "No images found"
    Empty,
    Ready(Vec<AssetCard>),
}

/// A committed search to run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub activation: Activation,
    pub query: Query,
}

/// View model for `/search-dam`.
#[derive(Debug, Clone, Default)]
pub struct AssetSearchView {
    input: String,
    committed: String,
    results: RemoteData<Collection<ImageAsset>>,
    activations: ActivationCounter,
}

impl AssetSearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn committed_term(&self) -> &str {
        &self.committed
    }

    /// Update the input. Never issues a query.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Initial activation with the current committed term.
    pub fn activate(&mut self) -> SearchRequest {
        self.results = RemoteData::Pending;
        SearchRequest {
            activation: self.activations.begin(),
            query: Query::search(&self.committed),
        }
    }

    /// Commit the trimmed input and return the query to run. Re-committing
    /// the same term re-issues it.
    pub fn commit(&mut self) -> SearchRequest {
        self.committed = self.input.trim().to_string();
        self.activate()
    }

    /// Keyboard handler: only Enter commits.
    pub fn key_down(&mut self, key: &str) -> Option<SearchRequest> {
        if key == "Enter" {
            Some(self.commit())
        } else {
            None
        }
    }

    /// Apply a result. Returns `false` if it belongs to a superseded search.
    pub fn apply(
        &mut self,
        activation: Activation,
        result: Result<Collection<ImageAsset>, FetchError>,
    ) -> bool {
        if !self.activations.is_current(activation) {
            return false;
        }
        self.results = result.into();
        true
    }

    /// Run a request to completion.
    pub async fn run(&mut self, clients: &CatalogClients, request: SearchRequest) {
        let result = clients.fetch::<ImageAsset>(&request.query).await;
        self.apply(request.activation, result);
    }

    /// Commit the current input and run the search.
    pub async fn submit(&mut self, clients: &CatalogClients) {
        let request = self.commit();
        self.run(clients, request).await;
    }

    /// Initial load with the committed term.
    pub async fn load(&mut self, clients: &CatalogClients) {
        let request = self.activate();
        self.run(clients, request).await;
    }

    pub fn state(&self) -> SearchState {
        match &self.results {
            RemoteData::Pending => SearchState::Loading,
            RemoteData::Failure(message) => SearchState::Error(message.clone()),
            RemoteData::Success(assets) if assets.is_empty() => SearchState::Empty,
            RemoteData::Success(assets) => {
                SearchState::Ready(assets.items.iter().map(AssetCard::from_asset).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Label, LabelRef, Rendition};
    use catalog_graph::Operation;

    fn asset(id: &str) -> ImageAsset {
        ImageAsset {
            id: AssetId::new(id),
            title: format!("Asset {}", id),
            url: None,
            renditions: vec![Rendition {
                name: "thumb.png".to_string(),
                url: format!("https://r/{}", id),
                width: 10,
                height: 10,
            }],
            labels: vec![Label {
                group: LabelRef {
                    id: "g".to_string(),
                    name: "Footwear".to_string(),
                },
                values: Vec::new(),
            }],
            mime_type: None,
            library_path: None,
            tags: Vec::new(),
        }
    }

    // === Input Tests ===

    #[test]
    fn test_typing_does_not_commit() {
        let mut view = AssetSearchView::new();
        view.set_input("sho");
        view.set_input("shoes");

        assert_eq!(view.input(), "shoes");
        assert_eq!(view.committed_term(), "");
        assert!(view.key_down("s").is_none());
        assert_eq!(view.committed_term(), "");
    }

    #[test]
    fn test_enter_commits_trimmed() {
        let mut view = AssetSearchView::new();
        view.set_input("  shoes ");

        let request = view.key_down("Enter").unwrap();

        assert_eq!(view.committed_term(), "shoes");
        assert_eq!(request.query.operation(), Operation::SearchImages);
        assert_eq!(request.query.variable("labelGroupName"), Some("shoes"));
    }

    #[test]
    fn test_blank_commit_searches_all() {
        let mut view = AssetSearchView::new();
        view.set_input("   ");
        let request = view.commit();
        assert_eq!(request.query, Query::all_images());
    }

    #[test]
    fn test_recommit_issues_again() {
        let mut view = AssetSearchView::new();
        view.set_input("shoes");
        let first = view.commit();
        let second = view.commit();

        assert_eq!(first.query, second.query);
        assert_ne!(first.activation, second.activation);
    }

    // === Result Tests ===

    #[test]
    fn test_cards() {
        let mut view = AssetSearchView::new();
        let request = view.activate();
        view.apply(request.activation, Ok(Collection::new(vec![asset("a1")])));

        match view.state() {
            SearchState::Ready(cards) => {
                assert_eq!(cards[0].href, "/dam-image/a1");
                assert_eq!(cards[0].thumbnail_url.as_deref(), Some("https://r/a1"));
                assert_eq!(cards[0].labels, vec!["Footwear".to_string()]);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_empty_results() {
        let mut view = AssetSearchView::new();
        let request = view.activate();
        view.apply(request.activation, Ok(Collection::default()));
        assert_eq!(view.state(), SearchState::Empty);
    }

    #[test]
    fn test_stale_search_discarded() {
        let mut view = AssetSearchView::new();
        view.set_input("old");
        let old = view.commit();
        view.set_input("new");
        let new = view.commit();

        assert!(view.apply(new.activation, Ok(Collection::default())));
        assert!(!view.apply(old.activation, Ok(Collection::new(vec![asset("stale")]))));
        assert_eq!(view.state(), SearchState::Empty);
    }
}
