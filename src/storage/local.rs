use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::storage::repository::{AssetMeta, AssetRepository, CharacterRepository};

/// Record index file kept at the library root.
pub const RECORDS_FILE: &str = "assets.json";

/// Filesystem-backed user library implementing both storage adapters.
///
/// Layout under `root`:
/// - `<id>`: asset payload
/// - `<id>.xml`: character definition
/// - `<name>`: sidecar files such as video thumbnails
/// - `assets.json`: every record, keyed by id
///
/// All state lives on disk, so clones of one library stay coherent and can be handed to a codec
/// as its asset and character store at once.
#[derive(Clone, Debug)]
pub struct LocalLibrary {
    root: PathBuf,
}

impl LocalLibrary {
    /// Open (and create if needed) a library rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create library dir '{}'", root.display()))?;
        Ok(Self { root })
    }

    /// Library root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every stored record, keyed by id.
    pub fn records(&self) -> anyhow::Result<BTreeMap<String, AssetMeta>> {
        let path = self.root.join(RECORDS_FILE);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read records '{}'", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse records '{}'", path.display()))
    }

    fn upsert(&self, meta: AssetMeta) -> anyhow::Result<()> {
        let mut records = self.records()?;
        records.insert(meta.id.clone(), meta);

        let path = self.root.join(RECORDS_FILE);
        let tmp = self.root.join(format!("{RECORDS_FILE}.tmp"));
        let json = serde_json::to_vec_pretty(&records).context("serialize records")?;
        std::fs::write(&tmp, json).with_context(|| format!("write '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &path).with_context(|| format!("replace '{}'", path.display()))?;
        Ok(())
    }

    fn entry_path(&self, file_name: &str) -> anyhow::Result<PathBuf> {
        validate_file_name(file_name)?;
        Ok(self.root.join(file_name))
    }

    fn record(&self, id: &str) -> Option<AssetMeta> {
        match self.records() {
            Ok(mut records) => records.remove(id),
            Err(e) => {
                tracing::warn!(%id, error = %e, "library records unreadable");
                None
            }
        }
    }

    fn write_file(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        let path = self.entry_path(file_name)?;
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))
    }
}

/// Reject names that would escape the library root.
fn validate_file_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name == RECORDS_FILE
    {
        anyhow::bail!("invalid library entry name '{name}'");
    }
    Ok(())
}

impl AssetRepository for LocalLibrary {
    fn load(&self, id: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.entry_path(id)?;
        std::fs::read(&path).with_context(|| format!("read asset '{}'", path.display()))
    }

    fn meta(&self, id: &str) -> Option<AssetMeta> {
        self.record(id)
    }

    fn asset_path(&self, id: &str) -> Option<PathBuf> {
        self.entry_path(id).ok()
    }

    fn save(&mut self, bytes: &[u8], id: &str, mut meta: AssetMeta) -> anyhow::Result<()> {
        self.write_file(id, bytes)?;
        meta.id = id.to_string();
        self.upsert(meta)
    }

    fn save_sidecar(&mut self, file_name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        self.write_file(file_name, bytes)
    }
}

impl CharacterRepository for LocalLibrary {
    fn char_xml(&self, id: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.entry_path(&format!("{id}.xml"))?;
        std::fs::read(&path).with_context(|| format!("read character '{}'", path.display()))
    }

    fn exists(&self, id: &str) -> bool {
        self.entry_path(&format!("{id}.xml"))
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn save(&mut self, xml: &[u8], meta: AssetMeta) -> anyhow::Result<()> {
        self.write_file(&format!("{}.xml", meta.id), xml)?;
        self.upsert(meta)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/local.rs"]
mod tests;
