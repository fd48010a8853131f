//! Application shell: configuration, clients and routing.

use catalog_core::CatalogConfig;
use catalog_graph::CatalogClients;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use tracing::{error, info};

use crate::pages::{AssetPage, AssetSearchPage, CatalogPage, ProductPage};

// ============================================================================
// Configuration
// ============================================================================

/// Settings are baked in at build time; the browser has no process env.
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "CG_SC_AUTH" => option_env!("CG_SC_AUTH"),
        "CG_DAM_AUTH" => option_env!("CG_DAM_AUTH"),
        "CG_BASE_URL" => option_env!("CG_BASE_URL"),
        "CG_CACHE_CAPACITY" => option_env!("CG_CACHE_CAPACITY"),
        _ => None,
    };
    value.map(str::to_string)
}

fn connect() -> Result<CatalogClients, String> {
    let config = CatalogConfig::from_lookup(build_env).map_err(|e| e.to_string())?;
    let clients = CatalogClients::from_config(&config).map_err(|e| e.to_string())?;
    info!(
        base_url = %config.content.base_url,
        cache_capacity = config.cache_capacity,
        "Catalog clients ready"
    );
    Ok(clients)
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let clients = match connect() {
        Ok(clients) => clients,
        Err(message) => {
            error!(error = %message, "Catalog configuration invalid");
            return view! { <ConfigError message/> }.into_any();
        }
    };
    provide_context(clients);

    // Unmatched paths render nothing.
    let fallback = || ();

    view! {
        <Title text="Catalog"/>

        <Router>
            <Header/>
            <main>
                <Routes fallback>
                    <Route path=path!("") view=CatalogPage/>
                    <Route path=path!("/product/:ContentGuid") view=ProductPage/>
                    <Route path=path!("/search-dam") view=AssetSearchPage/>
                    <Route path=path!("/dam-image/:imageId") view=AssetPage/>
                </Routes>
            </main>
        </Router>
    }
    .into_any()
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header() -> impl IntoView {
    view! {
        <header>
            <nav>
                <a href="/">"Products"</a>
                <a href="/search-dam">"Digital Assets"</a>
            </nav>
        </header>
    }
}

#[component]
fn ConfigError(message: String) -> impl IntoView {
    view! {
        <div class="config-error">
            <h1>"Catalog unavailable"</h1>
            <p style="color: red;">{message}</p>
        </div>
    }
}
