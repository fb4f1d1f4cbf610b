//! Request and response shapes for the tree stand site API.
//!
//! Every response carries an `ok` flag and an optional `error` string next to
//! its payload. Explicit `null` values in list bodies read as empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Category identifier whose display label differs from the raw value.
pub const WHATS_NEW_CATEGORY: &str = "WhatsNew";

/// Sentinel category value meaning "no filter".
pub const ALL_CATEGORIES: &str = "All";

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One stored post as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PostRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PostListResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub rows: Vec<PostRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostCreateRequest {
    pub title: String,
    pub category: String,
    pub display_name: String,
    pub body: String,
}

/// Pre-order payload: free-form text fields plus the derived typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PreorderRequest {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub want_installation: bool,
    pub want_tree_decorating: bool,
    pub want_tree_removal: bool,
    pub quantity: u32,
}

/// Field names the typed part of [`PreorderRequest`] owns.
pub const PREORDER_TYPED_FIELDS: [&str; 4] = [
    "want_installation",
    "want_tree_decorating",
    "want_tree_removal",
    "quantity",
];
