use std::time::Duration;

use crate::foundation::error::{KakijunError, KakijunResult};

pub use kurbo::{BezPath, Point, Rect};

/// SVG `viewBox` of a glyph document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    /// Minimum x.
    pub x: f64,
    /// Minimum y.
    pub y: f64,
    /// Width, must be > 0.
    pub width: f64,
    /// Height, must be > 0.
    pub height: f64,
}

impl ViewBox {
    /// KanjiVG documents are authored on a 109x109 grid.
    pub const KANJIVG: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 109.0,
        height: 109.0,
    };

    /// Parse `"min-x min-y width height"`, separated by whitespace and/or commas.
    pub fn parse(s: &str) -> KakijunResult<Self> {
        let nums = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<f64>()
                    .map_err(|_| KakijunError::validation(format!("invalid viewBox number '{p}'")))
            })
            .collect::<KakijunResult<Vec<_>>>()?;

        let [x, y, width, height] = nums.as_slice() else {
            return Err(KakijunError::validation(
                "viewBox must have exactly 4 numbers",
            ));
        };
        if !(*width > 0.0 && *height > 0.0) {
            return Err(KakijunError::validation("viewBox width/height must be > 0"));
        }
        Ok(Self {
            x: *x,
            y: *y,
            width: *width,
            height: *height,
        })
    }

    /// Center point, used to place fallback glyph text.
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::KANJIVG
    }
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

pub(crate) fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Fraction of `total` that `elapsed` represents, clamped to `[0, 1]`.
pub(crate) fn fraction_of(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

/// `d * factor`, rounded to the nearest nanosecond. Negative factors yield zero.
pub(crate) fn scaled(d: Duration, factor: f64) -> Duration {
    let nanos = (d.as_nanos() as f64 * factor.max(0.0)).round();
    Duration::from_nanos(nanos as u64)
}
