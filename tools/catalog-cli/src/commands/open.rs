//! Render the screen for an app path.

use anyhow::{bail, Result};
use catalog_views::Route;

use super::OpenArgs;
use crate::context::Context;
use crate::render::ScreenError;

/// Run the open command.
pub async fn run(args: OpenArgs, ctx: &Context) -> Result<()> {
    let Some(route) = Route::parse(&args.path) else {
        bail!(ScreenError::UnknownPath(args.path));
    };
    ctx.output.debug(&format!("Opening {} ({})", route.title(), route));

    match route {
        Route::Catalog => super::products::run(ctx).await,
        Route::Product(guid) => super::product::show(guid, None, ctx).await,
        Route::AssetSearch => super::search::show(ctx).await,
        Route::Asset(id) => super::image::show(id, None, ctx).await,
    }
}
