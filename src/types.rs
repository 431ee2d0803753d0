use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Fixed endpoint of the cosmetics catalog; `ignore_null` asks the API to omit null fields
pub const COSMETICS_ENDPOINT: &str =
    "https://fortnite-api.com/v2/cosmetics/br?responseOptions=ignore_null";

/// Placeholder used when a variant option carries no display name
pub const NO_NAME_PROVIDED: &str = "no name provided";

/// One selectable style of a cosmetic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub tag: String,
    pub name: String,
}

/// A cosmetic narrowed down to the fields that get persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedItem {
    pub id: String,
    pub name: String,
    pub variants: Vec<Variant>,
}

/// All items sharing one backend value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub key: String,
    pub items: Vec<NormalizedItem>,
}

/// Cosmetics grouped by backend value.
///
/// Partitions are kept in first-seen order and items within a partition in
/// insertion order. Nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    partitions: Vec<Partition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to the partition for `key`, creating it on first use
    pub fn push(&mut self, key: &str, item: NormalizedItem) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.partitions.push(Partition {
                    key: key.to_string(),
                    items: Vec::new(),
                });
                let slot = self.partitions.len() - 1;
                self.index.insert(key.to_string(), slot);
                slot
            }
        };
        self.partitions[slot].items.push(item);
    }

    pub fn get(&self, key: &str) -> Option<&[NormalizedItem]> {
        self.index
            .get(key)
            .map(|&slot| self.partitions[slot].items.as_slice())
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.partitions.iter().map(|p| p.key.as_str())
    }

    /// Number of partitions
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Total number of items across all partitions
    pub fn item_count(&self) -> usize {
        self.partitions.iter().map(|p| p.items.len()).sum()
    }
}

/// Configuration for a dump run
#[derive(Debug, Clone)]
pub struct DumpConfig {
    /// URL the catalog is fetched from
    pub endpoint: String,

    /// Directory the partition files are written to
    pub output_dir: PathBuf,

    /// Extension appended to each partition key to form its file name
    pub file_extension: String,

    /// User-Agent header sent with the request
    pub user_agent: String,

    /// Variant channels whose options are extracted (exact, case-sensitive match)
    pub variant_channels: Vec<String>,

    /// Name given to variant options that have none
    pub missing_name_placeholder: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        DumpConfig {
            endpoint: String::from(COSMETICS_ENDPOINT),
            output_dir: PathBuf::from("dump"),
            file_extension: String::from("json"),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            variant_channels: vec![String::from("Material"), String::from("ClothingColor")],
            missing_name_placeholder: String::from(NO_NAME_PROVIDED),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpSummary {
    /// Cosmetics received from the API
    pub cosmetics: usize,

    /// Files written, one per partition
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> NormalizedItem {
        NormalizedItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            variants: vec![],
        }
    }

    #[test]
    fn test_catalog_groups_in_first_seen_order() {
        let mut catalog = Catalog::new();
        catalog.push("AthenaCharacter", item("a"));
        catalog.push("AthenaPickaxe", item("b"));
        catalog.push("AthenaCharacter", item("c"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.item_count(), 3);
        assert_eq!(
            catalog.keys().collect::<Vec<_>>(),
            vec!["AthenaCharacter", "AthenaPickaxe"]
        );

        let ids: Vec<_> = catalog
            .get("AthenaCharacter")
            .unwrap()
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_catalog_keeps_duplicate_ids() {
        let mut catalog = Catalog::new();
        catalog.push("AthenaDance", item("dup"));
        catalog.push("AthenaDance", item("dup"));

        assert_eq!(catalog.get("AthenaDance").unwrap().len(), 2);
        assert!(catalog.get("AthenaGlider").is_none());
    }

    #[test]
    fn test_default_config() {
        let config = DumpConfig::default();
        assert_eq!(config.endpoint, COSMETICS_ENDPOINT);
        assert_eq!(config.output_dir, PathBuf::from("dump"));
        assert_eq!(config.variant_channels, vec!["Material", "ClothingColor"]);
        assert_eq!(config.missing_name_placeholder, "no name provided");
    }
}
