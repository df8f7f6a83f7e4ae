//! Product grid block: reads an authored block, queries products, and
//! renders a card grid.

pub mod card;
pub mod decorate;
pub mod markup;
pub mod node;
pub mod picture;
pub mod render;
pub mod resolve;

pub use card::{build_card, CardModel};
pub use decorate::{decorate, fetch_products};
pub use markup::{find_blocks, parse_block, AuthoredBlock, ConfigValue};
pub use node::{Block, Element, Node};
pub use picture::{Breakpoint, OptimizedPicture, PictureBuilder};
pub use render::{render_block, RenderContext, EMPTY_MESSAGE};
pub use resolve::resolve_config;
