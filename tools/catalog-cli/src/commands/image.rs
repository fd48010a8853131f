//! Image asset detail.

use anyhow::Result;
use catalog_core::AssetId;
use catalog_views::AssetDetailView;

use super::ImageArgs;
use crate::context::Context;
use crate::render;

/// Run the image command.
pub async fn run(args: ImageArgs, ctx: &Context) -> Result<()> {
    show(AssetId::new(args.id), args.rendition, ctx).await
}

pub async fn show(id: AssetId, rendition: Option<usize>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Loading image {}...", id));
    let mut view = AssetDetailView::new();
    view.load(&ctx.clients, id).await;
    spinner.finish_and_clear();

    if let Some(index) = rendition {
        if let Some(selected) = view.select_rendition(index) {
            if selected != index {
                ctx.output.warn(&format!("Only {} renditions, showing the last", selected + 1));
            }
        }
    }

    render::asset(&ctx.output, &view.state())
}
