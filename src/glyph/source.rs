use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::foundation::error::FetchError;

/// Resolves a character to its raw stroke-path document.
///
/// Implementations do the IO; the engine only normalizes what they return.
pub trait GlyphSource {
    /// Fetch the SVG document for `character`.
    fn fetch_glyph(&self, character: char) -> Result<String, FetchError>;
}

impl<S: GlyphSource + ?Sized> GlyphSource for &S {
    fn fetch_glyph(&self, character: char) -> Result<String, FetchError> {
        (**self).fetch_glyph(character)
    }
}

impl<S: GlyphSource + ?Sized> GlyphSource for Box<S> {
    fn fetch_glyph(&self, character: char) -> Result<String, FetchError> {
        (**self).fetch_glyph(character)
    }
}

/// Glyph documents stored as files named after the character's code point.
///
/// Each root is searched in order, trying [`glyph_file_names`] in order.
#[derive(Clone, Debug)]
pub struct DirGlyphSource {
    roots: Vec<PathBuf>,
}

impl DirGlyphSource {
    /// Source reading from a single directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Add a directory searched after the existing ones.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Directories searched, in order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// First existing file for `character`, if any.
    pub fn resolve(&self, character: char) -> Option<PathBuf> {
        let names = glyph_file_names(character);
        self.roots
            .iter()
            .flat_map(|root| names.iter().map(move |n| root.join(n)))
            .find(|p| p.is_file())
    }
}

impl GlyphSource for DirGlyphSource {
    #[tracing::instrument(skip(self))]
    fn fetch_glyph(&self, character: char) -> Result<String, FetchError> {
        let Some(path) = self.resolve(character) else {
            tracing::debug!(roots = self.roots.len(), "no glyph file");
            return Err(FetchError::NotFound(character));
        };
        read_glyph_file(&path, character)
    }
}

fn read_glyph_file(path: &Path, character: char) -> Result<String, FetchError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FetchError::NotFound(character),
        _ => FetchError::Unavailable(format!("read '{}': {e}", path.display())),
    })
}

/// Candidate file names for `character`: `u`-prefixed first, then bare, each with the lower-case
/// hex code point zero-padded to 5, padded to 4, and unpadded. Duplicates are removed.
pub fn glyph_file_names(character: char) -> Vec<String> {
    let cp = u32::from(character);
    let hexes = [format!("{cp:05x}"), format!("{cp:04x}"), format!("{cp:x}")];

    let mut out = Vec::with_capacity(6);
    for prefix in ["u", ""] {
        for hex in &hexes {
            let name = format!("{prefix}{hex}.svg");
            if !out.contains(&name) {
                out.push(name);
            }
        }
    }
    out
}

/// In-memory glyph documents, keyed by character.
#[derive(Clone, Debug, Default)]
pub struct MemoryGlyphSource {
    docs: HashMap<char, String>,
}

impl MemoryGlyphSource {
    /// Empty source; every fetch is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the document for `character`.
    pub fn insert(&mut self, character: char, doc: impl Into<String>) -> &mut Self {
        self.docs.insert(character, doc.into());
        self
    }

    /// Builder form of [`Self::insert`].
    pub fn with(mut self, character: char, doc: impl Into<String>) -> Self {
        self.insert(character, doc);
        self
    }
}

impl GlyphSource for MemoryGlyphSource {
    fn fetch_glyph(&self, character: char) -> Result<String, FetchError> {
        self.docs
            .get(&character)
            .cloned()
            .ok_or(FetchError::NotFound(character))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/source.rs"]
mod tests;
