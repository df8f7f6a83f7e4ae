//! The full block pipeline: resolve, fetch, render, replace.

use prodgrid_client::{ProductClient, RawProductRecord};
use prodgrid_core::{Environment, ResolvedConfig};

use crate::markup::AuthoredBlock;
use crate::node::Block;
use crate::render::{render_block, RenderContext};
use crate::resolve::resolve_config;

/// Decorates one block in place.
///
/// Reads the authored configuration from the block's current content, fetches
/// products, and replaces the content with the rendered grid. Fetch failures
/// render the empty state; nothing here returns an error.
pub async fn decorate(block: &mut Block, client: &ProductClient, ctx: &RenderContext) {
    let config = resolve_config(&AuthoredBlock::from_block(block));
    tracing::debug!(
        folder_path = config.folder_path(),
        legacy = config.is_legacy_mode(),
        tags = ?config.filter_tags(),
        env = %ctx.env,
        "resolved product list config"
    );

    let records = fetch_products(client, &config, ctx.env).await;
    block.replace_children(render_block(&config, &records, ctx));
}

/// Fetches records for `config`, converting every failure into an empty list.
pub async fn fetch_products(
    client: &ProductClient,
    config: &ResolvedConfig,
    env: Environment,
) -> Vec<RawProductRecord> {
    match client.fetch_products(config, env).await {
        Ok(records) => records,
        Err(e) if e.is_transport() => {
            tracing::error!(
                folder_path = config.folder_path(),
                error = %e,
                "product fetch failed; rendering empty grid"
            );
            Vec::new()
        }
        Err(e) => {
            tracing::debug!(
                folder_path = config.folder_path(),
                error = %e,
                "product response unreadable; rendering empty grid"
            );
            Vec::new()
        }
    }
}
