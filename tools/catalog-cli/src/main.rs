//! Catalog CLI - Browse products and image assets from the terminal.
//!
//! Commands:
//! - `catalog products` - List all products
//! - `catalog product <guid>` - Show one product and its cover image
//! - `catalog image <id>` - Show an image asset and the products using it
//! - `catalog search [term]` - Search image assets by label
//! - `catalog open <path>` - Render the screen for an app path

mod commands;
mod context;
mod output;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ImageArgs, OpenArgs, ProductArgs, SearchArgs};

/// Catalog CLI - Browse products and digital assets
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Write log lines as JSON objects
    #[arg(long, global = true)]
    log_json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    Products,

    /// Show a product with its cover image renditions
    Product(ProductArgs),

    /// Show an image asset with the products that use it
    Image(ImageArgs),

    /// Search image assets by label group name
    Search(SearchArgs),

    /// Render the screen for an app path, e.g. `/dam-image/abc`
    Open(OpenArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let log = context::LogOverrides {
        verbose: cli.verbose,
        json: cli.log_json,
    };
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone(), log) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.failure(&e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Products => commands::products::run(&ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Image(args) => commands::image::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Open(args) => commands::open::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.failure(&e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_product() {
        let args = ["catalog", "--json", "product", "abc", "--rendition", "2"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Product(args) => {
                assert_eq!(args.guid, "abc");
                assert_eq!(args.rendition, Some(2));
            }
            _ => panic!("expected product command"),
        }
    }

    #[test]
    fn test_parse_interactive_search() {
        let cli = Cli::try_parse_from(["catalog", "search", "--interactive"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert!(args.interactive);
                assert!(args.term.is_none());
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_log_json_anywhere() {
        let cli = Cli::try_parse_from(["catalog", "products", "--log-json"]).unwrap();
        assert!(cli.log_json);
        assert!(!cli.json);
    }

    #[test]
    fn test_product_requires_guid() {
        assert!(Cli::try_parse_from(["catalog", "product"]).is_err());
    }
}
