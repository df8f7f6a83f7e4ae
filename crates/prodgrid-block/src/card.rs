//! Product record → card model → card element.

use prodgrid_client::{encode_query_value, RawProductRecord};
use prodgrid_core::Environment;

use crate::node::{Element, Node};
use crate::picture::Breakpoint;
use crate::render::RenderContext;

/// Alt text used when a product has no name.
pub const PRODUCT_IMAGE_ALT: &str = "Product image";

/// Card image renditions: 600px wide from 900px viewports, 400px from
/// 600px, 320px otherwise.
pub const CARD_BREAKPOINTS: [Breakpoint; 3] = [
    Breakpoint {
        media: Some("(min-width: 900px)"),
        width: 600,
    },
    Breakpoint {
        media: Some("(min-width: 600px)"),
        width: 400,
    },
    Breakpoint {
        media: None,
        width: 320,
    },
];

/// Tag namespaces stripped from the front of a category label.
const CATEGORY_PREFIXES: [&str; 2] = ["luma:", "lumaproducts:"];

/// Where a product identifier may come from, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierRule {
    Sku,
    Id,
}

pub const IDENTIFIER_RULES: [IdentifierRule; 2] = [IdentifierRule::Sku, IdentifierRule::Id];

/// Renderable view of one product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardModel {
    /// Empty means the card is not clickable.
    pub product_id: String,
    pub image_url: Option<String>,
    pub title: String,
    pub category_label: String,
}

impl CardModel {
    #[must_use]
    pub fn from_record(record: &RawProductRecord, env: Environment) -> Self {
        Self {
            product_id: product_identifier(record),
            image_url: image_url(record, env),
            title: record.name.clone().unwrap_or_default(),
            category_label: format_category_label(&record.category),
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !self.product_id.is_empty()
    }

    #[must_use]
    pub fn alt_text(&self) -> &str {
        if self.title.is_empty() {
            PRODUCT_IMAGE_ALT
        } else {
            &self.title
        }
    }

    /// Product page URL for this card, or `None` when the card has no
    /// usable identifier.
    #[must_use]
    pub fn navigation_target(&self, location_path: &str, env: Environment) -> Option<String> {
        if !self.is_interactive() {
            return None;
        }
        let encoded = encode_query_value(&self.product_id);
        Some(format!(
            "{}?productId={encoded}",
            product_page_path(location_path, env)
        ))
    }
}

/// First non-empty identifier per [`IDENTIFIER_RULES`], else empty.
#[must_use]
pub fn product_identifier(record: &RawProductRecord) -> String {
    IDENTIFIER_RULES
        .iter()
        .find_map(|rule| {
            let candidate = match rule {
                IdentifierRule::Sku => record.sku.as_deref(),
                IdentifierRule::Id => record.id.as_deref(),
            };
            candidate.filter(|v| !v.is_empty())
        })
        .unwrap_or_default()
        .to_owned()
}

fn image_url(record: &RawProductRecord, env: Environment) -> Option<String> {
    let image = record.image.as_ref()?;
    let url = match env {
        Environment::Author => image.author_url.as_deref(),
        Environment::Publish => image.publish_url.as_deref(),
    };
    url.filter(|u| !u.is_empty()).map(str::to_owned)
}

/// Display label for a category list: joined with `", "`, a leading
/// `luma:` / `lumaproducts:` namespace removed (case-insensitive), `/`
/// spaced out, and uppercased.
#[must_use]
pub fn format_category_label(categories: &[String]) -> String {
    let joined = categories.join(", ");
    let lower = joined.to_ascii_lowercase();
    let without_prefix = CATEGORY_PREFIXES
        .iter()
        .find(|prefix| lower.starts_with(*prefix))
        .map_or(joined.as_str(), |prefix| &joined[prefix.len()..]);
    without_prefix.replace('/', " / ").to_uppercase()
}

/// Sibling `product` page of the current location: the last path segment is
/// replaced, with `.html` appended on the authoring tier.
#[must_use]
pub fn product_page_path(location_path: &str, env: Environment) -> String {
    let path = location_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let dir = path.rfind('/').map_or("", |idx| &path[..idx]);
    let suffix = if env.is_author() { ".html" } else { "" };
    format!("{dir}/product{suffix}")
}

/// Builds the card element for one record.
///
/// Interactive cards are anchors to the product page; cards without an
/// identifier are plain `div`s with no navigation.
#[must_use]
pub fn build_card(record: &RawProductRecord, ctx: &RenderContext) -> Node {
    let model = CardModel::from_record(record, ctx.env);

    let mut card = match model.navigation_target(&ctx.location_path, ctx.env) {
        Some(href) => Element::new("a")
            .with_class("product-card")
            .with_attr("href", href)
            .with_attr("data-product-id", model.product_id.as_str()),
        None => Element::new("div").with_class("product-card"),
    };

    if let Some(url) = model.image_url.as_deref() {
        card.push(
            Element::new("div")
                .with_class("product-card-image")
                .with_child(card_image(url, model.alt_text(), ctx)),
        );
    }

    card.push(
        Element::new("div")
            .with_class("product-card-body")
            .with_child(
                Element::new("p")
                    .with_class("product-card-category")
                    .with_text(model.category_label.as_str()),
            )
            .with_child(
                Element::new("h3")
                    .with_class("product-card-title")
                    .with_text(model.title.as_str()),
            ),
    );

    card.into()
}

/// Published absolute URLs are used as-is; the picture service only
/// understands repository-relative paths.
fn card_image(url: &str, alt: &str, ctx: &RenderContext) -> Node {
    if !ctx.env.is_author() && url.starts_with("http") {
        return Element::new("img")
            .with_attr("src", url)
            .with_attr("alt", alt)
            .with_attr("loading", "lazy")
            .into();
    }
    ctx.pictures.picture(url, alt, false, &CARD_BREAKPOINTS)
}

#[cfg(test)]
#[path = "card_test.rs"]
mod tests;
