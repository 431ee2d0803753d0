//! # Cosmetics Dump
//!
//! Fetches the battle royale cosmetics catalog, narrows each cosmetic down to
//! its id, name and material/clothing-color variants, and writes one compact
//! JSON file per cosmetic type.
//!
//! ## Modules
//!
//! - **fetch**: one GET against the catalog endpoint
//! - **transform**: partition and normalize the raw records
//! - **writer**: persist each partition as `<backendValue>.json`
//!
//! ## Quick Start
//!
//! ```rust
//! use cosmetics_dump::transform;
//! use serde_json::json;
//!
//! # fn main() -> cosmetics_dump::Result<()> {
//! let raw = vec![json!({
//!     "type": {"backendValue": "AthenaCharacter"},
//!     "id": "CID_001",
//!     "name": "Recruit",
//!     "variants": [{"channel": "Material", "options": [{"tag": "Mat1"}]}]
//! })];
//!
//! let catalog = transform(&raw)?;
//! let outfits = catalog.get("AthenaCharacter").unwrap();
//! assert_eq!(outfits[0].variants[0].name, "no name provided");
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use tracing::info;

pub mod error;
pub mod fetch;
pub mod transform;
pub mod types;
pub mod writer;

pub use error::{DumpError, Result};
pub use fetch::{CosmeticsFetcher, CosmeticsResponse};
pub use transform::{transform, CosmeticTransformer};
pub use types::{Catalog, DumpConfig, DumpSummary, NormalizedItem, Partition, Variant};
pub use writer::CatalogWriter;

/// Main entry point: fetch the catalog and write every partition to disk
pub fn dump(config: &DumpConfig) -> Result<DumpSummary> {
    let fetcher = CosmeticsFetcher::new(config)?;
    let response = fetcher.fetch()?;
    dump_response(response, config)
}

/// Check the response status, then transform and write its records.
///
/// Nothing is written unless the status is 200 and every record transforms.
pub fn dump_response(response: CosmeticsResponse, config: &DumpConfig) -> Result<DumpSummary> {
    let items = response.into_items()?;
    info!(cosmetics = items.len(), "found cosmetics");
    dump_items(&items, config)
}

/// Transform raw records and write the resulting catalog
pub fn dump_items(items: &[Value], config: &DumpConfig) -> Result<DumpSummary> {
    let catalog = CosmeticTransformer::new(config).transform(items)?;

    let writer = CatalogWriter::new(&config.output_dir, &config.file_extension);
    let files = writer.write_catalog(&catalog)?;
    info!(
        partitions = files.len(),
        output_dir = %config.output_dir.display(),
        "wrote catalog"
    );

    Ok(DumpSummary {
        cosmetics: items.len(),
        files,
    })
}
