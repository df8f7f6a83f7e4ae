//! Command handlers. Each one reads its input, runs the block pipeline and
//! hands back HTML for `main` to print.

use std::path::Path;

use anyhow::Context;
use prodgrid_block::resolve::normalize_folder_reference;
use prodgrid_block::{decorate, find_blocks, parse_block, RenderContext};
use prodgrid_client::ProductClient;
use prodgrid_core::{normalize_tags, AppConfig, Environment, ResolvedConfig};

use crate::location::PageLocation;

pub(crate) async fn decorate_block_file(
    client: &ProductClient,
    config: &AppConfig,
    file: &Path,
    location: &str,
    env: Option<Environment>,
) -> anyhow::Result<String> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("reading block file {}", file.display()))?;
    let ctx = render_context(config, location, env);

    let mut block = parse_block(&html);
    decorate(&mut block, client, &ctx).await;
    Ok(block.to_html())
}

/// Blocks on one page are independent: each resolves and fetches on its own
/// and they are awaited together.
pub(crate) async fn decorate_page_file(
    client: &ProductClient,
    config: &AppConfig,
    file: &Path,
    location: &str,
    env: Option<Environment>,
    block_class: &str,
) -> anyhow::Result<Vec<String>> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("reading page file {}", file.display()))?;
    let ctx = render_context(config, location, env);

    let mut blocks = find_blocks(&html, block_class);
    if blocks.is_empty() {
        tracing::warn!(block_class, file = %file.display(), "no product grid blocks found");
        return Ok(Vec::new());
    }
    tracing::info!(count = blocks.len(), env = %ctx.env, "decorating blocks");

    futures::future::join_all(blocks.iter_mut().map(|block| decorate(block, client, &ctx))).await;

    Ok(blocks.iter().map(prodgrid_block::Block::to_html).collect())
}

pub(crate) fn query_url(
    client: &ProductClient,
    folder: &str,
    tags: Option<&str>,
    env: Environment,
) -> anyhow::Result<String> {
    let resolved = ResolvedConfig::new(
        normalize_folder_reference(folder),
        tags.map(normalize_tags).unwrap_or_default(),
    );
    let url = client
        .query_url(&resolved, env)
        .context("building query URL")?;
    Ok(url.to_string())
}

fn render_context(config: &AppConfig, location: &str, env: Option<Environment>) -> RenderContext {
    let location = PageLocation::parse(location);
    let env = location.environment(env, config.env);
    RenderContext::new(env, location.path)
}
