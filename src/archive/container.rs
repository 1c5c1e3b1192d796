use std::{
    collections::HashMap,
    io::{Cursor, Read, Write},
};

use anyhow::Context;
use zip::{CompressionMethod, ZipArchive, ZipWriter, write::SimpleFileOptions};

use crate::foundation::error::{MoviepackError, MoviepackResult};

/// Final movie document.
pub const MOVIE_MEMBER: &str = "movie.xml";
/// UGC manifest fragment.
pub const UGC_MEMBER: &str = "ugc.xml";
/// Aggregate theme list.
pub const THEMELIST_MEMBER: &str = "themelist.xml";
/// Optional movie thumbnail.
pub const THUMBNAIL_MEMBER: &str = "thumbnail.png";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Flat, insertion-ordered set of named byte members.
///
/// Adding a name twice replaces the payload but keeps the first position.
pub struct MovieArchive {
    members: Vec<(String, Vec<u8>)>,
    index: HashMap<String, usize>,
}

impl MovieArchive {
    /// Empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a member.
    pub fn add(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.members[i].1 = bytes,
            None => {
                self.index.insert(name.clone(), self.members.len());
                self.members.push((name, bytes));
            }
        }
    }

    /// Member payload by name.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.index.get(name).map(|&i| self.members[i].1.as_slice())
    }

    /// Member payload by name; absence means the archive is corrupt.
    pub fn require(&self, name: &str) -> MoviepackResult<&[u8]> {
        self.get(name)
            .ok_or_else(|| MoviepackError::corrupt_archive(format!("member '{name}' is missing")))
    }

    /// Whether a member exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Member names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(n, _)| n.as_str())
    }

    /// Member count.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Encode as a deflated ZIP file.
    pub fn to_zip(&self) -> MoviepackResult<Vec<u8>> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in &self.members {
            zip.start_file(name.as_str(), options)
                .with_context(|| format!("start archive member '{name}'"))?;
            zip.write_all(bytes)
                .with_context(|| format!("write archive member '{name}'"))?;
        }
        let cursor = zip.finish().context("finalize archive")?;
        Ok(cursor.into_inner())
    }

    /// Decode a ZIP file, reading every file member into memory.
    pub fn from_zip(bytes: &[u8]) -> MoviepackResult<Self> {
        let mut zip = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| MoviepackError::corrupt_archive(format!("not a zip archive: {e}")))?;
        let mut out = Self::new();
        for i in 0..zip.len() {
            let mut file = zip
                .by_index(i)
                .map_err(|e| MoviepackError::corrupt_archive(format!("member #{i}: {e}")))?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(|e| {
                MoviepackError::corrupt_archive(format!("read member '{name}': {e}"))
            })?;
            out.add(name, buf);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/archive/container.rs"]
mod tests;
