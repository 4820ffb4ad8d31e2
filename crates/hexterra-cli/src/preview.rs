//! Plain-text preview of a generated grid.
//!
//! Rows are printed top to bottom by axial `r`; each row is indented by half a
//! cell per step away from the middle row so the output keeps its hex shape.

use hexterra_common::{AxialCoord, LandscapeId};
use hexterra_world::{HexGrid, LandscapeCatalog};
use std::fmt::Write;

/// Glyph shown for a cell that has no landscape yet.
pub const UNASSIGNED: char = '?';

/// One glyph per catalog category.
#[derive(Debug, Clone)]
pub struct Legend {
    glyphs: Vec<char>,
}

impl Legend {
    /// Picks a distinct glyph per category: the first unused letter of its
    /// name, else a digit, else `#`.
    #[must_use]
    pub fn new(catalog: &LandscapeCatalog) -> Self {
        let mut glyphs: Vec<char> = Vec::with_capacity(catalog.len());
        for id in catalog.ids() {
            let name = catalog.name(id).unwrap_or_default();
            let glyph = name
                .chars()
                .filter(char::is_ascii_alphabetic)
                .map(|c| c.to_ascii_uppercase())
                .chain('0'..='9')
                .find(|c| !glyphs.contains(c))
                .unwrap_or('#');
            glyphs.push(glyph);
        }
        Self { glyphs }
    }

    /// Glyph for a landscape.
    #[must_use]
    pub fn glyph(&self, id: Option<LandscapeId>) -> char {
        id.and_then(|id| self.glyphs.get(id.index()).copied())
            .unwrap_or(UNASSIGNED)
    }

    /// `glyph = name` lines for every category.
    #[must_use]
    pub fn describe(&self, catalog: &LandscapeCatalog) -> String {
        let mut out = String::new();
        for id in catalog.ids() {
            let _ = writeln!(
                out,
                "{} = {}",
                self.glyph(Some(id)),
                catalog.name(id).unwrap_or_default()
            );
        }
        out
    }
}

/// Renders the grid as indented rows of glyphs.
#[must_use]
pub fn render(grid: &HexGrid, legend: &Legend) -> String {
    let radius = grid.radius() as i32;
    let mut out = String::new();
    for r in -radius..=radius {
        let indent = r.unsigned_abs() as usize;
        out.extend(std::iter::repeat(' ').take(indent));

        let q_min = (-radius).max(-radius - r);
        let q_max = radius.min(radius - r);
        let row: Vec<String> = (q_min..=q_max)
            .map(|q| {
                let category = grid.category_at(AxialCoord::new(q, r)).ok().flatten();
                legend.glyph(category).to_string()
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Per-category cell counts with percentages, largest first.
#[must_use]
pub fn histogram(grid: &HexGrid, catalog: &LandscapeCatalog) -> String {
    let counts = grid.category_counts(catalog.len());
    let total = grid.len().max(1);

    let mut rows: Vec<(LandscapeId, usize)> = catalog.ids().zip(counts).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut out = String::new();
    for (id, count) in rows {
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>6.1}%",
            catalog.name(id).unwrap_or_default(),
            count,
            100.0 * count as f64 / total as f64
        );
    }
    out
}
