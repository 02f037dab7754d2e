//! kakijun is a stroke-order playback engine for Japanese characters.
//!
//! It turns a KanjiVG-style stroke document into an ordered set of strokes and animates them one
//! at a time, with play/pause/step/reset control, adjustable speed, stroke-number highlighting,
//! and chaining across the characters of a word.
//!
//! # Pipeline overview
//!
//! 1. **Fetch**: a [`GlyphSource`] returns the raw document for a character
//! 2. **Normalize**: [`normalize`] parses it into a [`GlyphStrokeSet`] (paths, arc lengths, labels)
//! 3. **Play**: a [`PlaybackController`] (or a [`SequenceChainer`] over several of them) advances
//!    through strokes as the host calls `tick(now)`
//! 4. **Present**: each [`Frame`] is handed to a [`RenderSink`], e.g. [`SvgSink`]
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Host-driven time**: the engine never reads a clock or spawns a thread; the same
//!   sequence of `tick` timestamps always yields the same frames.
//! - **Explicit cancellation**: every scheduled continuation carries a [`CancelToken`] and is
//!   dropped when its scope was cancelled.
//! - **Frames are data**: computing what to draw is separate from drawing it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod controls;
mod foundation;
mod glyph;
mod playback;
mod render;
mod sequence;

pub use animation::ease::Ease;
pub use controls::ControlCommand;
pub use foundation::config::{Palette, PlaybackConfig};
pub use foundation::core::{BezPath, Point, Rect, ViewBox};
pub use foundation::error::{FetchError, KakijunError, KakijunResult, LoadError};
pub use glyph::model::{GlyphStrokeSet, StrokeLabel, StrokeRecord};
pub use glyph::normalize::{ARCLEN_ACCURACY, normalize, path_length};
pub use glyph::source::{DirGlyphSource, GlyphSource, MemoryGlyphSource, glyph_file_names};
pub use playback::cancel::{CancelScope, CancelToken, Deadline};
pub use playback::controller::PlaybackController;
pub use playback::frame::{FallbackFrame, Frame, LabelView, StrokeFrame, StrokeView, StyleState};
pub use playback::state::{
    LoadOutcome, LoadTicket, PlaybackEvent, PlaybackState, PlaybackStatus,
};
pub use render::sink::{JsonSink, RenderSink};
pub use render::svg::{ExportOptions, SvgSink, animated_svg, escape_xml, render_frame_svg};
pub use sequence::chainer::{
    CharacterMark, SequenceChainer, SequenceEvent, SequenceState, SequenceStatus,
};
pub use sequence::filter::{CharClass, classify, playable_characters};
