use crate::{
    foundation::core::{Point, ViewBox},
    foundation::error::LoadError,
    playback::state::PlaybackStatus,
};

/// Style of a stroke or its number label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleState {
    /// Not drawn yet.
    Pending,
    /// Being drawn (or paused part-way).
    Active,
    /// Fully drawn.
    Done,
}

impl StyleState {
    /// Style of stroke `order` given the current stroke index.
    ///
    /// `drawing` is true while stroke `current` is animating or partially drawn.
    pub fn for_stroke(order: usize, current: usize, drawing: bool) -> Self {
        if order < current {
            Self::Done
        } else if order == current && drawing {
            Self::Active
        } else {
            Self::Pending
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Visible state of one stroke in a frame.
pub struct StrokeView<'a> {
    /// Drawing position.
    pub order: usize,
    /// SVG path data.
    pub geometry: &'a str,
    /// Arc length of the path.
    pub length: f64,
    /// Visible share of the path in `[0, 1]`.
    pub visible_fraction: f64,
    /// `stroke-dashoffset` equivalent: `length * (1 - visible_fraction)`.
    pub dash_offset: f64,
    /// Style state.
    pub style: StyleState,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Visible state of one stroke-number label.
pub struct LabelView {
    /// 1-based stroke number.
    pub number: usize,
    /// Anchor position.
    pub position: Point,
    /// Style state, matching the stroke it names.
    pub style: StyleState,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Frame of a loaded glyph.
pub struct StrokeFrame<'a> {
    /// Character being drawn.
    pub character: char,
    /// Coordinate system of strokes and labels.
    pub view_box: ViewBox,
    /// Controller status when the frame was computed.
    pub status: PlaybackStatus,
    /// Current stroke index.
    pub current_stroke_index: usize,
    /// All strokes in drawing order.
    pub strokes: Vec<StrokeView<'a>>,
    /// Labels in stroke-number order.
    pub labels: Vec<LabelView>,
}

impl StrokeFrame<'_> {
    /// Number of strokes with a non-zero visible fraction.
    pub fn visible_strokes(&self) -> usize {
        self.strokes
            .iter()
            .filter(|s| s.visible_fraction > 0.0)
            .count()
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Frame of a character without usable stroke data: draw the bare glyph instead.
pub struct FallbackFrame {
    /// Character to draw as text.
    pub character: char,
    /// Coordinate system to draw in.
    pub view_box: ViewBox,
    /// Why no strokes are available.
    pub error: LoadError,
}

/// What the render sink should show right now.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Frame<'a> {
    /// Nothing loaded.
    Idle,
    /// A glyph is being fetched.
    Loading {
        /// Character being fetched.
        character: char,
    },
    /// A loaded glyph, partially or fully drawn.
    Strokes(StrokeFrame<'a>),
    /// A glyph that failed to load.
    Fallback(FallbackFrame),
}

impl<'a> Frame<'a> {
    /// The stroke frame, if this is one.
    pub fn as_strokes(&self) -> Option<&StrokeFrame<'a>> {
        match self {
            Self::Strokes(f) => Some(f),
            _ => None,
        }
    }

    /// Whether this frame is the no-stroke-data fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}
