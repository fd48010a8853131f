//! Shared view components.

use catalog_views::{alt_text, AssetCard, ProductCard, RenditionGallery, Route as Screen};
use leptos::callback::{Callable, Callback};
use leptos::prelude::*;

// ============================================================================
// Status Components
// ============================================================================

#[component]
pub fn Loading() -> impl IntoView {
    view! { <div class="loading">"Loading..."</div> }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! { <p class="error" style="color: red;">"Error: " {message}</p> }
}

/// Link back to the screen's parent, if it has one.
#[component]
pub fn BackLink(screen: Screen) -> impl IntoView {
    let (Some(parent), Some(label)) = (screen.back(), screen.back_label()) else {
        return ().into_any();
    };
    view! { <a class="back-link" href=parent.path()>{label}</a> }.into_any()
}

// ============================================================================
// Card Components
// ============================================================================

#[component]
pub fn ProductTile(card: ProductCard) -> impl IntoView {
    let image = card.image_url.map(|url| {
        let alt = card.title.clone();
        view! { <img src=url alt=alt loading="lazy"/> }
    });

    view! {
        <a class="product-card" href=card.href>
            {image}
            <div class="product-info">
                <h3>{card.title}</h3>
                <p class="price">{card.price}</p>
                <p class="publish-date">{card.publish_date}</p>
                <div class="description" inner_html=card.description_html></div>
            </div>
        </a>
    }
}

#[component]
pub fn AssetTile(card: AssetCard) -> impl IntoView {
    let thumbnail = match card.thumbnail_url {
        Some(url) => {
            let alt = card.title.clone();
            view! { <img src=url alt=alt loading="lazy"/> }.into_any()
        }
        None => view! { <div class="no-image">"No preview"</div> }.into_any(),
    };
    let labels = card
        .labels
        .into_iter()
        .map(|label| view! { <span class="label">{label}</span> })
        .collect::<Vec<_>>();

    view! {
        <a class="asset-card" href=card.href>
            {thumbnail}
            <h3>{card.title}</h3>
            <div class="labels">{labels}</div>
        </a>
    }
}

// ============================================================================
// Gallery
// ============================================================================

/// Selected rendition, thumbnail strip and the zoom modal.
#[component]
pub fn RenditionViewer(
    gallery: RenditionGallery,
    title: String,
    #[prop(into)] on_select: Callback<usize>,
    #[prop(into)] on_open: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let Some(selected) = gallery.selected().cloned() else {
        return view! { <div class="no-image">"No image available"</div> }.into_any();
    };
    let selected_index = gallery.selected_index().unwrap_or_default();
    let alt = gallery.alt_text(&title);
    let resolution = gallery.resolution().unwrap_or_default();

    let thumbnails = gallery
        .renditions()
        .iter()
        .enumerate()
        .map(|(index, rendition)| {
            let class = if index == selected_index {
                "thumbnail selected"
            } else {
                "thumbnail"
            };
            let url = rendition.url.clone();
            let alt = alt_text(&title, Some(rendition));
            view! {
                <button class=class on:click=move |_| on_select.run(index)>
                    <img src=url alt=alt loading="lazy"/>
                </button>
            }
        })
        .collect::<Vec<_>>();

    let modal = gallery.is_modal_open().then(|| {
        let url = selected.url.clone();
        let alt = alt.clone();
        view! {
            <div class="modal" on:click=move |_| on_close.run(())>
                <img src=url alt=alt/>
            </div>
        }
    });

    view! {
        <div class="gallery">
            <button class="main-image" on:click=move |_| on_open.run(())>
                <img src=selected.url.clone() alt=alt/>
            </button>
            <div class="thumbnails">{thumbnails}</div>
            <p class="rendition-name">{selected.name}</p>
            <p class="resolution">"Resolution: " {resolution}</p>
        </div>
        {modal}
    }
    .into_any()
}
