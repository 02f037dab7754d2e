/// Easing curve mapping a stroke's time progress to its visible fraction.
///
/// Only the shape of the draw-in changes; the stroke's duration never depends on the curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant pen speed.
    Linear,
    /// Quadratic deceleration, close to the CSS `ease-out` keyword.
    #[default]
    OutQuad,
    /// Quadratic acceleration then deceleration.
    InOutQuad,
    /// Cubic deceleration.
    OutCubic,
    /// Cubic acceleration then deceleration.
    InOutCubic,
}

impl Ease {
    /// Map `t` in `[0, 1]` (clamped) to an eased value in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// CSS timing function equivalent, used by the keyframe export.
    pub fn css_timing_function(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::OutQuad => "cubic-bezier(0.5, 1, 0.89, 1)",
            Self::InOutQuad => "cubic-bezier(0.45, 0, 0.55, 1)",
            Self::OutCubic => "cubic-bezier(0.33, 1, 0.68, 1)",
            Self::InOutCubic => "cubic-bezier(0.65, 0, 0.35, 1)",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
