pub mod client;
pub mod error;
pub mod types;

pub use client::{encode_query_value, ProductClient, QueryEndpoints, QueryStrategy};
pub use error::ClientError;
pub use types::{extract_items, ProductImage, RawProductRecord};
