//! Reshape the raw cosmetics list into a catalog partitioned by backend value
//!
//! Only `id`, `name` and the options of recognized variant channels survive;
//! every other field of a cosmetic is dropped.

use crate::error::{DumpError, Result};
use crate::types::{Catalog, DumpConfig, NormalizedItem, Variant};
use serde_json::Value;

/// Extracts normalized cosmetics from raw API records
pub struct CosmeticTransformer {
    variant_channels: Vec<String>,
    missing_name_placeholder: String,
}

impl Default for CosmeticTransformer {
    fn default() -> Self {
        CosmeticTransformer::new(&DumpConfig::default())
    }
}

impl CosmeticTransformer {
    pub fn new(config: &DumpConfig) -> Self {
        CosmeticTransformer {
            variant_channels: config.variant_channels.clone(),
            missing_name_placeholder: config.missing_name_placeholder.clone(),
        }
    }

    /// Group every record under its `type.backendValue`, in input order.
    ///
    /// The first record missing a required field aborts the whole pass, so a
    /// returned catalog is always complete.
    pub fn transform(&self, items: &[Value]) -> Result<Catalog> {
        let mut catalog = Catalog::new();

        for (index, item) in items.iter().enumerate() {
            if !item.is_object() {
                return Err(DumpError::wrong_type(index, "cosmetic"));
            }

            let key = partition_key(item, index)?;
            let normalized = self.normalize(item, index)?;
            catalog.push(key, normalized);
        }

        Ok(catalog)
    }

    /// Build the persisted form of a single record
    pub fn normalize(&self, item: &Value, index: usize) -> Result<NormalizedItem> {
        let id = required_str(item, "id", index, "")?;
        let name = required_str(item, "name", index, "")?;
        let variants = self.extract_variants(item, index)?;

        Ok(NormalizedItem {
            id: id.to_string(),
            name: name.to_string(),
            variants,
        })
    }

    /// Flatten the options of every recognized variant group, preserving order.
    ///
    /// A record without `variants` yields an empty list. Groups without a
    /// channel, or with an unrecognized one, are skipped whatever they contain.
    pub fn extract_variants(&self, item: &Value, index: usize) -> Result<Vec<Variant>> {
        let groups = match item.get("variants") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(groups)) => groups,
            Some(_) => return Err(DumpError::wrong_type(index, "variants")),
        };

        let mut variants = Vec::new();

        for (group_idx, group) in groups.iter().enumerate() {
            let group_path = format!("variants[{}]", group_idx);
            let group = group
                .as_object()
                .ok_or_else(|| DumpError::wrong_type(index, group_path.clone()))?;

            let channel = match group.get("channel").and_then(Value::as_str) {
                Some(channel) => channel,
                None => continue,
            };
            if !self.is_recognized_channel(channel) {
                continue;
            }

            let options_path = format!("{}.options", group_path);
            let options = match group.get("options") {
                None | Some(Value::Null) => return Err(DumpError::missing(index, options_path)),
                Some(Value::Array(options)) => options,
                Some(_) => return Err(DumpError::wrong_type(index, options_path)),
            };

            for (option_idx, option) in options.iter().enumerate() {
                let option_path = format!("{}[{}]", options_path, option_idx);
                if !option.is_object() {
                    return Err(DumpError::wrong_type(index, option_path));
                }

                let tag = required_str(option, "tag", index, &option_path)?;
                let name = optional_str(option, "name", index, &option_path)?
                    .unwrap_or(&self.missing_name_placeholder);

                variants.push(Variant {
                    tag: tag.to_string(),
                    name: name.to_string(),
                });
            }
        }

        Ok(variants)
    }

    fn is_recognized_channel(&self, channel: &str) -> bool {
        self.variant_channels.iter().any(|c| c == channel)
    }
}

/// Group cosmetics with the default channel set and placeholder
pub fn transform(items: &[Value]) -> Result<Catalog> {
    CosmeticTransformer::default().transform(items)
}

/// Read `type.backendValue`, the key a cosmetic is partitioned under
fn partition_key(item: &Value, index: usize) -> Result<&str> {
    match item.get("type") {
        None | Some(Value::Null) => Err(DumpError::missing(index, "type")),
        Some(cosmetic_type @ Value::Object(_)) => {
            required_str(cosmetic_type, "backendValue", index, "type")
        }
        Some(_) => Err(DumpError::wrong_type(index, "type")),
    }
}

/// A string field that must be present; `parent` is the path of `value` within the record
fn required_str<'a>(value: &'a Value, field: &str, index: usize, parent: &str) -> Result<&'a str> {
    match optional_str(value, field, index, parent)? {
        Some(s) => Ok(s),
        None => Err(DumpError::missing(index, field_path(parent, field))),
    }
}

/// A string field that may be absent; JSON `null` counts as absent
fn optional_str<'a>(
    value: &'a Value,
    field: &str,
    index: usize,
    parent: &str,
) -> Result<Option<&'a str>> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(DumpError::wrong_type(index, field_path(parent, field))),
    }
}

fn field_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}
