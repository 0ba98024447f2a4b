//! Wire types of the Data API.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response envelope shared by every Data API call.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Message {
    #[serde(deserialize_with = "code_as_string")]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Body of `GET /layouts/{layout}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetadataResponse {
    #[serde(default)]
    pub field_meta_data: Vec<FieldMetaData>,
    /// Keyed by portal (table occurrence or object) name.
    #[serde(default)]
    pub portal_meta_data: BTreeMap<String, Vec<FieldMetaData>>,
    /// Absent when the layout has no value lists.
    #[serde(default)]
    pub value_lists: Option<Vec<WireValueList>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetaData {
    pub name: String,
    /// `"normal"`, `"calculation"`, `"summary"`, ...
    #[serde(default, rename = "type")]
    pub field_type: String,
    /// `"text"`, `"number"`, `"date"`, `"timestamp"`, `"container"`, ...
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub value_list: Option<String>,
    #[serde(default)]
    pub repetitions: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireValueList {
    pub name: String,
    #[serde(default, rename = "type")]
    pub list_type: String,
    #[serde(default)]
    pub values: Vec<ValueListEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueListEntry {
    pub value: String,
    #[serde(default)]
    pub display_value: Option<String>,
}

/// Body of `POST /sessions`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionResponse {
    pub token: String,
}

/// FileMaker sends message codes as strings; some proxies send numbers.
fn code_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}
