//! Routed screens.
//!
//! Each page owns its view model in a signal. Fetches run on the local
//! executor and hand results back through the model's `apply*` methods,
//! which drop anything belonging to a superseded activation.

use catalog_core::{AssetId, ContentGuid, ImageAsset, Product};
use catalog_graph::CatalogClients;
use catalog_views::{
    AssetDetailState, AssetDetailView, AssetSearchView, CatalogListView, CatalogState,
    ProductDetailState, ProductDetailView, Route as Screen, SearchRequest, SearchState,
    SEARCH_PLACEHOLDER,
};
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;

use crate::components::{AssetTile, BackLink, ErrorMessage, Loading, ProductTile, RenditionViewer};

// ============================================================================
// Catalog
// ============================================================================

#[component]
pub fn CatalogPage() -> impl IntoView {
    let clients = expect_context::<CatalogClients>();
    let mut initial = CatalogListView::new();
    let (activation, query) = initial.activate();
    let model = RwSignal::new(initial);

    spawn_local(async move {
        let result = clients.fetch::<Product>(&query).await;
        model.try_update(|m| m.apply(activation, result));
    });

    view! {
        <Title text=Screen::Catalog.title()/>
        <h1>{Screen::Catalog.title()}</h1>
        {move || match model.with(CatalogListView::state) {
            CatalogState::Loading => view! { <Loading/> }.into_any(),
            CatalogState::Error(message) => view! { <ErrorMessage message/> }.into_any(),
            CatalogState::Empty => view! { <p>"No products found"</p> }.into_any(),
            CatalogState::Ready(cards) => view! {
                <div class="products">
                    {cards
                        .into_iter()
                        .map(|card| view! { <ProductTile card/> })
                        .collect::<Vec<_>>()}
                </div>
            }
            .into_any(),
        }}
    }
}

// ============================================================================
// Product Detail
// ============================================================================

#[component]
pub fn ProductPage() -> impl IntoView {
    let clients = expect_context::<CatalogClients>();
    let params = use_params_map();
    let model = RwSignal::new(ProductDetailView::new());

    Effect::new(move |_| {
        let guid = ContentGuid::new(params.get().get("ContentGuid").unwrap_or_default());
        let Some((activation, query)) = model.try_update(|m| m.activate(guid)) else {
            return;
        };
        let clients = clients.clone();
        spawn_local(async move {
            let result = clients.fetch::<Product>(&query).await;
            let next = model.try_update(|m| m.apply_product(activation, result)).flatten();
            if let Some(image_query) = next {
                let result = clients.fetch::<ImageAsset>(&image_query).await;
                model.try_update(|m| m.apply_image(activation, result));
            }
        });
    });

    view! {
        <Title text=Screen::Product(ContentGuid::default()).title()/>
        <BackLink screen=Screen::Product(ContentGuid::default())/>
        {move || match model.with(ProductDetailView::state) {
            ProductDetailState::Loading => view! { <Loading/> }.into_any(),
            ProductDetailState::Error(message) => view! { <ErrorMessage message/> }.into_any(),
            ProductDetailState::NotFound => view! { <p>"Product not found"</p> }.into_any(),
            ProductDetailState::Ready(detail) => {
                let card = detail.product;
                view! {
                    <div class="product-detail">
                        <RenditionViewer
                            gallery=detail.gallery
                            title=card.title.clone()
                            on_select=move |index: usize| {
                                model.update(|m| {
                                    m.select_rendition(index);
                                })
                            }
                            on_open=move |_: ()| {
                                model.update(|m| {
                                    m.open_modal();
                                })
                            }
                            on_close=move |_: ()| model.update(ProductDetailView::close_modal)
                        />
                        <div class="product-info">
                            <h1>{card.title}</h1>
                            <p class="price">{card.price}</p>
                            <p class="publish-date">"Published: " {card.publish_date}</p>
                            <div class="description" inner_html=card.description_html></div>
                        </div>
                    </div>
                }
                .into_any()
            }
        }}
    }
}

// ============================================================================
// Asset Search
// ============================================================================

fn run_search(clients: CatalogClients, model: RwSignal<AssetSearchView>, request: SearchRequest) {
    spawn_local(async move {
        let result = clients.fetch::<ImageAsset>(&request.query).await;
        model.try_update(|m| m.apply(request.activation, result));
    });
}

#[component]
pub fn AssetSearchPage() -> impl IntoView {
    let clients = StoredValue::new(expect_context::<CatalogClients>());
    let mut initial = AssetSearchView::new();
    let request = initial.activate();
    let model = RwSignal::new(initial);
    run_search(clients.get_value(), model, request);

    let submit = move || {
        if let Some(request) = model.try_update(AssetSearchView::commit) {
            run_search(clients.get_value(), model, request);
        }
    };
    let on_key = move |ev: KeyboardEvent| {
        if let Some(request) = model.try_update(|m| m.key_down(&ev.key())).flatten() {
            run_search(clients.get_value(), model, request);
        }
    };

    view! {
        <Title text=Screen::AssetSearch.title()/>
        <BackLink screen=Screen::AssetSearch/>
        <h1>{Screen::AssetSearch.title()}</h1>
        <div class="search-bar">
            <input
                type="text"
                placeholder=SEARCH_PLACEHOLDER
                prop:value=move || model.with(|m| m.input().to_string())
                on:input=move |ev| model.update(|m| m.set_input(event_target_value(&ev)))
                on:keydown=on_key
            />
            <button class="btn" on:click=move |_| submit()>"Search"</button>
        </div>
        {move || match model.with(AssetSearchView::state) {
            SearchState::Loading => view! { <Loading/> }.into_any(),
            SearchState::Error(message) => view! { <ErrorMessage message/> }.into_any(),
            SearchState::Empty => view! { <p>"No images found"</p> }.into_any(),
            SearchState::Ready(cards) => view! {
                <div class="assets">
                    {cards.into_iter().map(|card| view! { <AssetTile card/> }).collect::<Vec<_>>()}
                </div>
            }
            .into_any(),
        }}
    }
}

// ============================================================================
// Asset Detail
// ============================================================================

#[component]
pub fn AssetPage() -> impl IntoView {
    let clients = expect_context::<CatalogClients>();
    let params = use_params_map();
    let model = RwSignal::new(AssetDetailView::new());

    Effect::new(move |_| {
        let id = AssetId::new(params.get().get("imageId").unwrap_or_default());
        let Some(queries) = model.try_update(|m| m.activate(id)) else {
            return;
        };
        let activation = queries.activation;

        // The two fetches are independent; neither waits on the other.
        let asset_clients = clients.clone();
        spawn_local(async move {
            let result = asset_clients.fetch::<ImageAsset>(&queries.asset).await;
            model.try_update(|m| m.apply_asset(activation, result));
        });
        let related_clients = clients.clone();
        let related = queries.related;
        spawn_local(async move {
            let result = related_clients.fetch::<Product>(&related).await;
            model.try_update(|m| m.apply_related(activation, result));
        });
    });

    view! {
        <Title text=Screen::Asset(AssetId::default()).title()/>
        <BackLink screen=Screen::Asset(AssetId::default())/>
        {move || match model.with(AssetDetailView::state) {
            AssetDetailState::Loading => view! { <Loading/> }.into_any(),
            AssetDetailState::Error(message) => view! { <ErrorMessage message/> }.into_any(),
            AssetDetailState::NotFound => view! { <p>"Image not found"</p> }.into_any(),
            AssetDetailState::Ready(detail) => {
                let title = detail.asset.title.clone();
                let download = detail.download_url.clone().map(|url| {
                    view! { <a class="btn" href=url target="_blank" download="">"Download"</a> }
                });
                let related = match detail.related.value() {
                    None => view! { <Loading/> }.into_any(),
                    Some(related) => {
                        let summary = related.summary();
                        let cards = related
                            .products
                            .iter()
                            .cloned()
                            .map(|card| view! { <ProductTile card/> })
                            .collect::<Vec<_>>();
                        view! {
                            <p class="related-summary">{summary}</p>
                            <div class="products">{cards}</div>
                        }
                        .into_any()
                    }
                };
                view! {
                    <div class="asset-detail">
                        <RenditionViewer
                            gallery=detail.gallery
                            title=title.clone()
                            on_select=move |index: usize| {
                                model.update(|m| {
                                    m.select_rendition(index);
                                })
                            }
                            on_open=move |_: ()| {
                                model.update(|m| {
                                    m.open_modal();
                                })
                            }
                            on_close=move |_: ()| model.update(AssetDetailView::close_modal)
                        />
                        <div class="asset-info">
                            <h1>{title}</h1>
                            <div class="chips">
                                <span class="chip">"ID: " {detail.asset.id.to_string()}</span>
                                <span class="chip">{detail.resolution.unwrap_or_default()}</span>
                                <span class="chip">{detail.format}</span>
                            </div>
                            {download}
                        </div>
                    </div>
                    <section class="related-products">
                        <h2>"Products Using This Image"</h2>
                        {related}
                    </section>
                }
                .into_any()
            }
        }}
    }
}
