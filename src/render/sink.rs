use crate::{
    foundation::error::{KakijunError, KakijunResult},
    playback::frame::Frame,
};

/// Applies frame descriptions to a drawing surface.
///
/// The engine only computes [`Frame`]s; a sink owns everything about how they look on screen,
/// in a file, or in a test log.
pub trait RenderSink {
    /// Show `frame`, replacing whatever was shown before.
    fn present(&mut self, frame: &Frame<'_>) -> KakijunResult<()>;
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn present(&mut self, frame: &Frame<'_>) -> KakijunResult<()> {
        (**self).present(frame)
    }
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn present(&mut self, frame: &Frame<'_>) -> KakijunResult<()> {
        (**self).present(frame)
    }
}

/// Sink that keeps each presented frame as JSON, for logs and snapshot-style assertions.
#[derive(Clone, Debug, Default)]
pub struct JsonSink {
    frames: Vec<serde_json::Value>,
}

impl JsonSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far, oldest first.
    pub fn frames(&self) -> &[serde_json::Value] {
        &self.frames
    }

    /// Most recently presented frame.
    pub fn last(&self) -> Option<&serde_json::Value> {
        self.frames.last()
    }
}

impl RenderSink for JsonSink {
    fn present(&mut self, frame: &Frame<'_>) -> KakijunResult<()> {
        let v = serde_json::to_value(frame)
            .map_err(|e| KakijunError::serde(format!("frame: {e}")))?;
        self.frames.push(v);
        Ok(())
    }
}
