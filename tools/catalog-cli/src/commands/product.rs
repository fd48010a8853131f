//! Product detail.

use anyhow::Result;
use catalog_core::ContentGuid;
use catalog_views::ProductDetailView;

use super::ProductArgs;
use crate::context::Context;
use crate::render;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    show(ContentGuid::new(args.guid), args.rendition, ctx).await
}

pub async fn show(guid: ContentGuid, rendition: Option<usize>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Loading product {}...", guid));
    let mut view = ProductDetailView::new();
    view.load(&ctx.clients, guid).await;
    spinner.finish_and_clear();

    if let Some(index) = rendition {
        if let Some(selected) = view.select_rendition(index) {
            if selected != index {
                ctx.output.warn(&format!("Only {} renditions, showing the last", selected + 1));
            }
        }
    }

    render::product(&ctx.output, &view.state())
}
