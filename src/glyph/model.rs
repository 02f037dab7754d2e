use crate::foundation::core::{BezPath, Point, ViewBox};

#[derive(Clone, Debug, serde::Serialize)]
/// One stroke of a glyph, in drawing order.
pub struct StrokeRecord {
    /// Zero-based drawing position within the glyph.
    pub order: usize,
    /// SVG path data exactly as found in the source document.
    pub geometry: String,
    /// Parsed geometry.
    #[serde(skip)]
    pub path: BezPath,
    /// Arc length of the path, measured once at load time.
    pub length: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Position of a stroke-number label from the source document.
pub struct StrokeLabel {
    /// 1-based stroke number the label names.
    pub number: usize,
    /// Anchor position in document coordinates.
    pub position: Point,
}

impl StrokeLabel {
    /// Zero-based stroke order this label belongs to.
    pub fn order(&self) -> usize {
        self.number.saturating_sub(1)
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Normalized stroke data for one character.
///
/// A stroke set is never empty and never mutated after load; loading another character replaces
/// it wholesale.
pub struct GlyphStrokeSet {
    /// The character the strokes draw.
    pub character: char,
    /// Strokes in drawing order.
    pub strokes: Vec<StrokeRecord>,
    /// Stroke-number labels, sorted by stroke number. May be empty.
    pub labels: Vec<StrokeLabel>,
    /// Coordinate system of `strokes` and `labels`.
    pub view_box: ViewBox,
}

impl GlyphStrokeSet {
    /// Number of strokes (always >= 1).
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Always `false` for a loaded glyph; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Sum of all stroke lengths.
    pub fn total_length(&self) -> f64 {
        self.strokes.iter().map(|s| s.length).sum()
    }

    /// Label for the stroke at `order`, if the document carried one.
    pub fn label_for(&self, order: usize) -> Option<&StrokeLabel> {
        self.labels.iter().find(|l| l.order() == order)
    }
}
