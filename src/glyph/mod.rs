pub mod layout;
pub mod path;

use std::{
    collections::HashMap,
    fs,
    path::Path,
    time::Instant,
};

use crate::core::KakitoriError;

pub use layout::{
    layout,
    PlacedPath,
    GLYPH_SIZE,
};
pub use path::flatten_path;

/// Source of stroke paths, keyed by single glyph.
pub trait GlyphLibrary: Send + Sync {
    fn paths(&self, glyph: char) -> Option<&[String]>;

    fn contains(&self, glyph: char) -> bool {
        self.paths(glyph).is_some()
    }

    /// True only when every glyph of a non-empty text has stroke paths.
    fn is_renderable(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|c| self.contains(c))
    }
}

/// Stroke paths loaded from a JSON object of `"字": ["M..", "M.."]` entries.
#[derive(Debug, Default, Clone)]
pub struct StrokeDictionary {
    glyphs: HashMap<char, Vec<String>>,
}

impl StrokeDictionary {
    pub fn from_entries(entries: impl IntoIterator<Item = (char, Vec<String>)>) -> Self {
        Self { glyphs: entries.into_iter().collect() }
    }

    pub fn from_json(json: &str) -> Result<Self, KakitoriError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;

        let mut skipped = 0;
        let mut glyphs = HashMap::with_capacity(raw.len());
        for (key, paths) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    glyphs.insert(c, paths);
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} stroke entries not keyed by a single glyph", skipped);
        }

        Ok(Self { glyphs })
    }

    pub fn load(path: &Path) -> Result<Self, KakitoriError> {
        let start = Instant::now();
        let json = fs::read_to_string(path).map_err(|e| {
            KakitoriError::Custom(format!("Failed to read stroke data {}: {}", path.display(), e))
        })?;
        let dictionary = Self::from_json(&json)?;
        tracing::info!(
            "Loaded stroke paths for {} glyphs ({:.2}s)",
            dictionary.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphLibrary for StrokeDictionary {
    fn paths(&self, glyph: char) -> Option<&[String]> {
        self.glyphs.get(&glyph).map(Vec::as_slice)
    }
}
