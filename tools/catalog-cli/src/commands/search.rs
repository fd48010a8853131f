//! Image asset search.

use anyhow::Result;
use catalog_views::{AssetSearchView, SearchRequest, SEARCH_PLACEHOLDER};
use dialoguer::Input;

use super::SearchArgs;
use crate::context::Context;
use crate::render;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let mut view = AssetSearchView::new();
    view.set_input(args.term.unwrap_or_default());
    let request = view.commit();
    execute(&mut view, request, ctx).await?;

    if args.interactive {
        prompt_loop(&mut view, ctx).await?;
    }
    Ok(())
}

/// Show the asset search screen with no term.
pub async fn show(ctx: &Context) -> Result<()> {
    let mut view = AssetSearchView::new();
    let request = view.activate();
    execute(&mut view, request, ctx).await
}

async fn execute(view: &mut AssetSearchView, request: SearchRequest, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Searching \"{}\"...", view.committed_term()));
    view.run(&ctx.clients, request).await;
    spinner.finish_and_clear();

    render::search(&ctx.output, view.committed_term(), &view.state())
}

/// Each line read is committed as a search. Ends on EOF.
async fn prompt_loop(view: &mut AssetSearchView, ctx: &Context) -> Result<()> {
    loop {
        let line = Input::<String>::new()
            .with_prompt(SEARCH_PLACEHOLDER)
            .with_initial_text(view.committed_term())
            .allow_empty(true)
            .interact_text();
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                ctx.output.debug(&format!("Prompt closed: {}", e));
                return Ok(());
            }
        };

        view.set_input(line);
        if let Some(request) = view.key_down("Enter") {
            // A failed search is reported and the prompt continues.
            if let Err(e) = execute(view, request, ctx).await {
                ctx.output.failure(&e);
            }
        }
    }
}
