use std::collections::BTreeMap;

use crate::storage::repository::{AssetMeta, AssetRepository, CharacterRepository};

/// In-memory asset store for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAssets {
    payloads: BTreeMap<String, Vec<u8>>,
    records: BTreeMap<String, AssetMeta>,
    sidecars: BTreeMap<String, Vec<u8>>,
    saves: usize,
}

impl InMemoryAssets {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a payload and its record without counting it as a save.
    pub fn insert(&mut self, bytes: impl Into<Vec<u8>>, meta: AssetMeta) {
        self.payloads.insert(meta.id.clone(), bytes.into());
        self.records.insert(meta.id.clone(), meta);
    }

    /// Seed a payload with no record.
    pub fn insert_payload(&mut self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.payloads.insert(id.into(), bytes.into());
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Borrow a stored payload.
    pub fn payload(&self, id: &str) -> Option<&[u8]> {
        self.payloads.get(id).map(Vec::as_slice)
    }

    /// Borrow a sidecar file written by the codec.
    pub fn sidecar(&self, file_name: &str) -> Option<&[u8]> {
        self.sidecars.get(file_name).map(Vec::as_slice)
    }
}

impl AssetRepository for InMemoryAssets {
    fn load(&self, id: &str) -> anyhow::Result<Vec<u8>> {
        self.payloads
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no payload for asset '{id}'"))
    }

    fn meta(&self, id: &str) -> Option<AssetMeta> {
        self.records.get(id).cloned()
    }

    fn save(&mut self, bytes: &[u8], id: &str, meta: AssetMeta) -> anyhow::Result<()> {
        self.saves += 1;
        self.payloads.insert(id.to_string(), bytes.to_vec());
        self.records.insert(id.to_string(), meta);
        Ok(())
    }

    fn save_sidecar(&mut self, file_name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        self.sidecars.insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// In-memory character store for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCharacters {
    defs: BTreeMap<String, Vec<u8>>,
    records: BTreeMap<String, AssetMeta>,
    saves: usize,
}

impl InMemoryCharacters {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a character definition without counting it as a save.
    pub fn insert(&mut self, id: impl Into<String>, xml: impl Into<Vec<u8>>) {
        self.defs.insert(id.into(), xml.into());
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Record written for `id` by `save`.
    pub fn record(&self, id: &str) -> Option<&AssetMeta> {
        self.records.get(id)
    }
}

impl CharacterRepository for InMemoryCharacters {
    fn char_xml(&self, id: &str) -> anyhow::Result<Vec<u8>> {
        self.defs
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no character '{id}'"))
    }

    fn exists(&self, id: &str) -> bool {
        self.defs.contains_key(id)
    }

    fn save(&mut self, xml: &[u8], meta: AssetMeta) -> anyhow::Result<()> {
        self.saves += 1;
        self.defs.insert(meta.id.clone(), xml.to_vec());
        self.records.insert(meta.id.clone(), meta);
        Ok(())
    }
}
