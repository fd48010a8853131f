//! Product listing.

use anyhow::Result;
use catalog_views::CatalogListView;

use crate::context::Context;
use crate::render;

/// Run the products command.
pub async fn run(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading products...");
    let mut view = CatalogListView::new();
    view.load(&ctx.clients).await;
    spinner.finish_and_clear();

    render::catalog(&ctx.output, &view.state())
}
