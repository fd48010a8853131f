//! CLI command implementations.

pub mod image;
pub mod open;
pub mod product;
pub mod products;
pub mod search;

use clap::Args;

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product content GUID.
    pub guid: String,

    /// Rendition to select (clamped to the last one).
    #[arg(short, long)]
    pub rendition: Option<usize>,
}

/// Arguments for the image command.
#[derive(Args)]
pub struct ImageArgs {
    /// Image asset id.
    pub id: String,

    /// Rendition to select (clamped to the last one).
    #[arg(short, long)]
    pub rendition: Option<usize>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Label group name. Blank lists every image.
    pub term: Option<String>,

    /// Keep prompting; each Enter runs a new search.
    #[arg(short, long)]
    pub interactive: bool,
}

/// Arguments for the open command.
#[derive(Args)]
pub struct OpenArgs {
    /// App path, e.g. `/product/abc` or `/search-dam`.
    pub path: String,
}
