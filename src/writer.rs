use crate::error::{DumpError, Result};
use crate::types::{Catalog, NormalizedItem};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes each catalog partition to its own compact JSON file
pub struct CatalogWriter {
    output_dir: PathBuf,
    file_extension: String,
}

impl CatalogWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P, file_extension: &str) -> Self {
        CatalogWriter {
            output_dir: output_dir.as_ref().to_path_buf(),
            file_extension: file_extension.to_string(),
        }
    }

    /// Path of the file a partition key is written to
    pub fn partition_path(&self, key: &str) -> PathBuf {
        let file_name = format!("{}.{}", key, self.file_extension);
        self.output_dir.join(file_name)
    }

    /// Write every partition, overwriting existing files.
    ///
    /// All keys are checked before the directory is touched, so a rejected
    /// key leaves the output directory as it was.
    pub fn write_catalog(&self, catalog: &Catalog) -> Result<Vec<PathBuf>> {
        for key in catalog.keys() {
            validate_partition_key(key)?;
        }

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| DumpError::io(self.output_dir.display().to_string(), e))?;

        let mut written = Vec::with_capacity(catalog.len());
        for partition in catalog.partitions() {
            let path = self.partition_path(&partition.key);
            write_partition(&path, &partition.items)?;
            debug!(
                partition = %partition.key,
                items = partition.items.len(),
                path = %path.display(),
                "wrote partition"
            );
            written.push(path);
        }

        Ok(written)
    }
}

fn write_partition(path: &Path, items: &[NormalizedItem]) -> Result<()> {
    write_json(path, items)
        .map_err(|e| DumpError::io(path.display().to_string(), e))
}

fn write_json(path: &Path, items: &[NormalizedItem]) -> std::io::Result<()> {
    let json = serde_json::to_vec(items)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(&json)?;
    file.flush()
}

/// Backend values come from the network; keep them from escaping the output directory
fn validate_partition_key(key: &str) -> Result<()> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\', '\0']) {
        return Err(DumpError::InvalidPartitionKey(key.to_string()));
    }
    Ok(())
}
