use super::{
    flatten_path,
    GlyphLibrary,
};

/// Side of the square cell one glyph's stroke paths are drawn in.
pub const GLYPH_SIZE: f32 = 109.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPath {
    pub d: String,
    pub offset: (f32, f32),
}

impl PlacedPath {
    pub fn polylines(&self) -> Vec<Vec<(f32, f32)>> {
        let (dx, dy) = self.offset;
        flatten_path(&self.d)
            .into_iter()
            .map(|line| line.into_iter().map(|(x, y)| (x + dx, y + dy)).collect())
            .collect()
    }
}

/// Lays the glyphs of `text` out left to right, centered on a paper `paper_width` wide.
/// A glyph without stroke data keeps its cell but contributes no paths.
pub fn layout(text: &str, library: &dyn GlyphLibrary, paper_width: f32) -> Vec<PlacedPath> {
    let count = text.chars().count() as f32;
    let base_x = ((paper_width - count * GLYPH_SIZE) / 2.0).floor();
    let base_y = 0.0;

    text.chars()
        .enumerate()
        .filter_map(|(i, c)| library.paths(c).map(|paths| (i, paths)))
        .flat_map(|(i, paths)| {
            let offset = (i as f32 * GLYPH_SIZE + base_x, base_y);
            paths.iter().map(move |d| PlacedPath { d: d.clone(), offset })
        })
        .collect()
}
