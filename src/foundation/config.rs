use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::{
    animation::ease::Ease,
    foundation::core::millis,
    foundation::error::{KakijunError, KakijunResult},
};

/// Caller-owned playback settings.
///
/// Every field has a default, so a JSON config only needs to name what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Draw time of one stroke at speed 1.0, in milliseconds. Independent of stroke length.
    pub base_stroke_ms: u64,
    /// Lower bound on a stroke's draw time after speed scaling.
    pub min_stroke_ms: u64,
    /// Upper bound on a stroke's draw time after speed scaling.
    pub max_stroke_ms: u64,
    /// Pause between one character finishing and the next starting.
    pub inter_character_pause_ms: u64,
    /// Speed applied to freshly created controllers.
    pub default_speed: f64,
    /// Smallest accepted speed multiplier.
    pub min_speed: f64,
    /// Largest accepted speed multiplier.
    pub max_speed: f64,
    /// Draw-in curve.
    pub ease: Ease,
    /// Start playing as soon as a glyph finishes loading.
    pub auto_play: bool,
    /// Colors and widths used by the SVG adapter.
    pub palette: Palette,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_stroke_ms: 800,
            min_stroke_ms: 150,
            max_stroke_ms: 3200,
            inter_character_pause_ms: 500,
            default_speed: 1.0,
            min_speed: 0.25,
            max_speed: 3.0,
            ease: Ease::default(),
            auto_play: false,
            palette: Palette::default(),
        }
    }
}

impl PlaybackConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> KakijunResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| KakijunError::serde(format!("config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> KakijunResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check ranges and orderings.
    pub fn validate(&self) -> KakijunResult<()> {
        if self.base_stroke_ms == 0 {
            return Err(KakijunError::validation("base_stroke_ms must be > 0"));
        }
        if self.min_stroke_ms > self.max_stroke_ms {
            return Err(KakijunError::validation(
                "min_stroke_ms must be <= max_stroke_ms",
            ));
        }
        for (name, v) in [
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("default_speed", self.default_speed),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(KakijunError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.min_speed > self.max_speed {
            return Err(KakijunError::validation("min_speed must be <= max_speed"));
        }
        // Every accepted speed must map to an unclamped duration.
        let base = self.base_stroke_ms as f64;
        if base / self.min_speed > self.max_stroke_ms as f64 {
            return Err(KakijunError::validation(
                "base_stroke_ms / min_speed must be <= max_stroke_ms",
            ));
        }
        if base / self.max_speed < self.min_stroke_ms as f64 {
            return Err(KakijunError::validation(
                "base_stroke_ms / max_speed must be >= min_stroke_ms",
            ));
        }
        if !(self.min_speed..=self.max_speed).contains(&self.default_speed) {
            return Err(KakijunError::validation(
                "default_speed must lie within [min_speed, max_speed]",
            ));
        }
        self.palette.validate()
    }

    /// Reject non-positive or non-finite multipliers, then clamp into the accepted range.
    pub fn clamp_speed(&self, multiplier: f64) -> KakijunResult<f64> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(KakijunError::InvalidSpeed(multiplier));
        }
        Ok(multiplier.clamp(self.min_speed, self.max_speed))
    }

    /// Draw time of one stroke at `speed`.
    pub fn stroke_duration(&self, speed: f64) -> Duration {
        let ms = (self.base_stroke_ms as f64 / speed)
            .clamp(self.min_stroke_ms as f64, self.max_stroke_ms as f64);
        Duration::from_nanos((ms * 1_000_000.0).round() as u64)
    }

    /// Pause inserted between characters of a sequence.
    pub fn inter_character_pause(&self) -> Duration {
        millis(self.inter_character_pause_ms)
    }
}

/// Colors and widths for each stroke/label style state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Stroke color once drawn.
    pub done_stroke: String,
    /// Stroke color while drawing.
    pub active_stroke: String,
    /// Stroke color of the undrawn guide.
    pub pending_stroke: String,
    /// Stroke width for done and pending strokes.
    pub stroke_width: f64,
    /// Stroke width while drawing.
    pub active_stroke_width: f64,
    /// Label color for finished strokes.
    pub done_label: String,
    /// Label color for the stroke being drawn.
    pub active_label: String,
    /// Label color for strokes still to come.
    pub pending_label: String,
    /// Label font size for done and pending labels.
    pub label_font_size: f64,
    /// Label font size for the active label.
    pub active_label_font_size: f64,
    /// Text color of the fallback glyph and caption.
    pub fallback: String,
    /// Caption shown under a glyph without stroke data.
    pub fallback_caption: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            done_stroke: "#1a1a1a".to_string(),
            active_stroke: "#e11d48".to_string(),
            pending_stroke: "#e5e5e5".to_string(),
            stroke_width: 4.0,
            active_stroke_width: 5.0,
            done_label: "#1a1a1a".to_string(),
            active_label: "#e11d48".to_string(),
            pending_label: "#999999".to_string(),
            label_font_size: 8.0,
            active_label_font_size: 12.0,
            fallback: "#999999".to_string(),
            fallback_caption: "no stroke data".to_string(),
        }
    }
}

impl Palette {
    fn validate(&self) -> KakijunResult<()> {
        for (name, v) in [
            ("stroke_width", self.stroke_width),
            ("active_stroke_width", self.active_stroke_width),
            ("label_font_size", self.label_font_size),
            ("active_label_font_size", self.active_label_font_size),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(KakijunError::validation(format!(
                    "palette.{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
