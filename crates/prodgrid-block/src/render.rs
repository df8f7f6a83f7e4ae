//! Pure rendering of a resolved block and its records into nodes.

use std::fmt;

use prodgrid_client::RawProductRecord;
use prodgrid_core::{Environment, ResolvedConfig};

use crate::card::build_card;
use crate::node::{Element, Node};
use crate::picture::{OptimizedPicture, PictureBuilder};

pub const EMPTY_MESSAGE: &str = "No products found.";

/// Per-invocation inputs the card builder needs besides the record.
pub struct RenderContext {
    pub env: Environment,
    /// Path of the page hosting the block, e.g. `/us/en/men`.
    pub location_path: String,
    pub pictures: Box<dyn PictureBuilder>,
}

impl RenderContext {
    pub fn new(env: Environment, location_path: impl Into<String>) -> Self {
        Self {
            env,
            location_path: location_path.into(),
            pictures: Box::new(OptimizedPicture),
        }
    }

    #[must_use]
    pub fn with_pictures(mut self, pictures: impl PictureBuilder + 'static) -> Self {
        self.pictures = Box::new(pictures);
        self
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("env", &self.env)
            .field("location_path", &self.location_path)
            .finish_non_exhaustive()
    }
}

/// Renders the block's replacement content: an optional tag header followed
/// by the product grid. Records keep their fetch order.
#[must_use]
pub fn render_block(
    config: &ResolvedConfig,
    records: &[RawProductRecord],
    ctx: &RenderContext,
) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(2);

    if let Some(header) = tag_header(config.filter_tags()) {
        nodes.push(header);
    }

    let mut grid = Element::new("div").with_class("product-list-grid");
    if records.is_empty() {
        grid.push(
            Element::new("p")
                .with_class("product-list-empty")
                .with_text(EMPTY_MESSAGE),
        );
    } else {
        for record in records {
            grid.push(build_card(record, ctx));
        }
    }
    nodes.push(grid.into());

    nodes
}

fn tag_header(tags: &[String]) -> Option<Node> {
    let chips: Vec<Node> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| {
            Node::from(
                Element::new("span")
                    .with_class("product-list-tag")
                    .with_text(t),
            )
        })
        .collect();
    if chips.is_empty() {
        return None;
    }

    let mut header = Element::new("div").with_class("product-list-tags");
    for chip in chips {
        header.push(chip);
    }
    Some(header.into())
}
