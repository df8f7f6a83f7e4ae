//! Response types for the product persisted queries.
//!
//! ## Observed shape
//!
//! ```json
//! { "data": { "productsModelList": { "items": [ { ... } ] } } }
//! ```
//!
//! Items are content fragments and vary by folder:
//! - `sku` is the preferred identifier; older fragments only carry `id`.
//!   Either may arrive as a JSON number, so both are read leniently.
//! - `image` is an object with `_authorUrl` / `_publishUrl`, either of which
//!   may be missing. `null` or any non-object reads as absent.
//! - `category` is an ordered array of tag ids such as `"luma:men/tops"`.
//!   A bare string is accepted as a one-element list.
//!
//! Anything missing along the `data.productsModelList.items` path yields an
//! empty list rather than an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One product record as returned by the query endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProductRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub sku: Option<String>,

    /// Display title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_image")]
    pub image: Option<ProductImage>,

    /// Category tag ids in authored order.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub category: Vec<String>,
}

/// Environment-specific image URLs of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductImage {
    #[serde(rename = "_authorUrl", default, deserialize_with = "lenient_string")]
    pub author_url: Option<String>,

    #[serde(rename = "_publishUrl", default, deserialize_with = "lenient_string")]
    pub publish_url: Option<String>,
}

/// Pulls the record list out of a parsed response body.
///
/// Returns an empty list when any segment of `data.productsModelList.items`
/// is missing or not of the expected JSON type. Items that cannot be read as
/// a record are skipped.
#[must_use]
pub fn extract_items(body: &Value) -> Vec<RawProductRecord> {
    let Some(items) = body
        .pointer("/data/productsModelList/items")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match RawProductRecord::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable product record");
                None
            }
        })
        .collect()
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

fn lenient_image<'de, D>(deserializer: D) -> Result<Option<ProductImage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ Value::Object(_)) => ProductImage::deserialize(object).ok(),
        _ => None,
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
        None => Vec::new(),
    })
}
