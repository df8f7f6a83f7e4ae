mod location;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prodgrid_client::{ProductClient, QueryEndpoints};
use prodgrid_core::Environment;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prodgrid-cli")]
#[command(about = "Render product grid blocks from authored markup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decorate one authored block and print the rendered block HTML
    Block {
        /// File containing the authored block element
        file: PathBuf,

        /// Page the block is rendered on: a path, or a full URL whose host
        /// decides the environment when `--env` is not given
        #[arg(long)]
        location: String,

        /// Force the authoring or published environment
        #[arg(long)]
        env: Option<Environment>,
    },
    /// Decorate every product grid block in a page document
    Page {
        /// File containing the page HTML
        file: PathBuf,

        #[arg(long)]
        location: String,

        #[arg(long)]
        env: Option<Environment>,

        /// Class that marks a product grid block
        #[arg(long, default_value = "product-list")]
        block_class: String,
    },
    /// Print the query URL a folder reference would be fetched from
    QueryUrl {
        /// Folder path or absolute URL, as authored
        folder: String,

        /// Comma-separated filter tags
        #[arg(long)]
        tags: Option<String>,

        #[arg(long)]
        env: Option<Environment>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = prodgrid_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = ProductClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        QueryEndpoints::from_app_config(&config),
    )?;

    match cli.command {
        Commands::Block {
            file,
            location,
            env,
        } => {
            let html = render::decorate_block_file(&client, &config, &file, &location, env).await?;
            println!("{html}");
        }
        Commands::Page {
            file,
            location,
            env,
            block_class,
        } => {
            let blocks =
                render::decorate_page_file(&client, &config, &file, &location, env, &block_class)
                    .await?;
            for html in blocks {
                println!("{html}");
            }
        }
        Commands::QueryUrl { folder, tags, env } => {
            let env = env.or(config.env).unwrap_or(Environment::Publish);
            let url = render::query_url(&client, &folder, tags.as_deref(), env)?;
            println!("{url}");
        }
    }

    Ok(())
}
