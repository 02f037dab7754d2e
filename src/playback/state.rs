use std::time::Duration;

use crate::foundation::error::{KakijunError, KakijunResult, LoadError};

/// Lifecycle of a [`crate::PlaybackController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// Nothing requested yet.
    Idle,
    /// Waiting for the glyph source.
    Loading,
    /// Loaded and not animating.
    Ready,
    /// Animating strokes.
    Playing,
    /// Autoplay suspended by the user.
    Paused,
    /// The glyph could not be loaded; a fallback is shown.
    Error,
}

impl PlaybackStatus {
    /// Whether a stroke set is available.
    pub fn is_loaded(self) -> bool {
        matches!(self, Self::Ready | Self::Playing | Self::Paused)
    }

    /// Lower-case name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Error => "error",
        }
    }
}

/// Snapshot of a controller for progress indicators and control panels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackState {
    /// Current status.
    pub status: PlaybackStatus,
    /// Character loaded or being loaded.
    pub character: Option<char>,
    /// Index of the next stroke to draw; equals `total_strokes` when fully drawn.
    pub current_stroke_index: usize,
    /// Stroke count of the loaded glyph, 0 when none.
    pub total_strokes: usize,
    /// Effective speed multiplier.
    pub speed: f64,
    /// `current_stroke_index / total_strokes`, 0 when nothing is loaded.
    pub progress: f64,
    /// Load failure, when `status` is `Error`.
    pub error: Option<LoadError>,
}

/// Something that happened while time advanced or an operation ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Stroke `index` began drawing at host time `at`.
    StrokeStarted {
        /// Stroke order.
        index: usize,
        /// Host timestamp.
        at: Duration,
    },
    /// Stroke `index` finished drawing at host time `at`.
    StrokeCompleted {
        /// Stroke order.
        index: usize,
        /// Host timestamp.
        at: Duration,
    },
    /// The last stroke finished during autoplay.
    Finished {
        /// Host timestamp.
        at: Duration,
    },
}

/// Handle for one outstanding glyph load. Only the most recent ticket can complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) seq: u64,
    /// Character requested.
    pub character: char,
}

/// Result of completing a load.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// The glyph is ready with this many strokes.
    Loaded {
        /// Stroke count.
        strokes: usize,
    },
    /// The glyph failed to load; the controller shows a fallback.
    Failed(LoadError),
    /// A newer load was started; nothing was applied.
    Superseded,
}

impl LoadOutcome {
    /// Stroke count on success, the load error otherwise.
    pub fn into_result(self) -> KakijunResult<usize> {
        match self {
            Self::Loaded { strokes } => Ok(strokes),
            Self::Failed(e) => Err(KakijunError::Load(e)),
            Self::Superseded => Err(KakijunError::invalid_state(
                "load was superseded by a newer request",
            )),
        }
    }
}
