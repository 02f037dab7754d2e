use std::time::Duration;

use crate::{
    controls::ControlCommand,
    foundation::config::PlaybackConfig,
    foundation::core::{ViewBox, fraction_of, scaled},
    foundation::error::{FetchError, KakijunError, KakijunResult, LoadError},
    glyph::model::GlyphStrokeSet,
    glyph::normalize::normalize,
    glyph::source::GlyphSource,
    playback::cancel::{CancelScope, Deadline},
    playback::frame::{FallbackFrame, Frame, LabelView, StrokeFrame, StrokeView, StyleState},
    playback::state::{LoadOutcome, LoadTicket, PlaybackEvent, PlaybackState, PlaybackStatus},
    render::sink::RenderSink,
};

#[derive(Clone, Copy, Debug)]
struct StrokeAnimation {
    index: usize,
    started_at: Duration,
    /// Time left to draw from `from_progress` to 1.
    duration: Duration,
    from_progress: f64,
    deadline: Deadline,
}

impl StrokeAnimation {
    /// Time progress of the stroke in `[from_progress, 1]`.
    fn progress_at(&self, now: Duration) -> f64 {
        let t = fraction_of(now.saturating_sub(self.started_at), self.duration);
        self.from_progress + (1.0 - self.from_progress) * t
    }
}

/// Stroke-by-stroke playback of one character.
///
/// The controller never reads a clock: the host calls [`Self::tick`] with its own monotonic
/// timestamps, and every operation acts at the last observed time. A stroke in flight is a
/// [`Deadline`] guarded by the controller's [`CancelScope`]; pausing, stepping, resetting, or
/// loading cancels the scope so a stale completion can never advance the index.
#[derive(Debug)]
pub struct PlaybackController {
    config: PlaybackConfig,
    speed: f64,
    status: PlaybackStatus,
    character: Option<char>,
    glyph: Option<GlyphStrokeSet>,
    error: Option<LoadError>,
    current: usize,
    /// Time progress of stroke `current` while no animation is in flight.
    partial: f64,
    anim: Option<StrokeAnimation>,
    now: Duration,
    scope: CancelScope,
    load_seq: u64,
    events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Idle controller using `config`, which is validated first.
    pub fn new(config: PlaybackConfig) -> KakijunResult<Self> {
        config.validate()?;
        Ok(Self {
            speed: config.default_speed,
            config,
            status: PlaybackStatus::Idle,
            character: None,
            glyph: None,
            error: None,
            current: 0,
            partial: 0.0,
            anim: None,
            now: Duration::ZERO,
            scope: CancelScope::new(),
            load_seq: 0,
            events: Vec::new(),
        })
    }

    /// Start loading `character`. Any previous glyph, error, and in-flight animation are dropped.
    ///
    /// The host fetches the document however it likes and hands it to [`Self::complete_load`]
    /// with the returned ticket. Starting another load makes this ticket stale.
    pub fn begin_load(&mut self, character: char) -> LoadTicket {
        self.scope.cancel();
        self.anim = None;
        self.glyph = None;
        self.error = None;
        self.current = 0;
        self.partial = 0.0;
        self.status = PlaybackStatus::Loading;
        self.character = Some(character);
        self.load_seq += 1;
        tracing::debug!(%character, seq = self.load_seq, "loading");
        LoadTicket {
            seq: self.load_seq,
            character,
        }
    }

    /// Finish the load started with `ticket`.
    ///
    /// A failed fetch or normalization puts the controller in `Error`; the failure is kept and a
    /// fallback frame is shown from then on.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<String, FetchError>,
    ) -> LoadOutcome {
        if ticket.seq != self.load_seq || self.status != PlaybackStatus::Loading {
            tracing::debug!(character = %ticket.character, "stale load ignored");
            return LoadOutcome::Superseded;
        }

        let normalized = fetched
            .map_err(LoadError::from)
            .and_then(|raw| normalize(ticket.character, &raw));

        match normalized {
            Ok(glyph) => {
                let strokes = glyph.len();
                self.glyph = Some(glyph);
                self.status = PlaybackStatus::Ready;
                tracing::debug!(character = %ticket.character, strokes, "ready");
                if self.config.auto_play {
                    self.start_playing();
                }
                LoadOutcome::Loaded { strokes }
            }
            Err(e) => {
                tracing::warn!(character = %ticket.character, error = %e, "glyph load failed");
                self.status = PlaybackStatus::Error;
                self.error = Some(e.clone());
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Fetch `character` from `source` and load it in one step.
    #[tracing::instrument(skip(self, source))]
    pub fn load<S: GlyphSource + ?Sized>(&mut self, source: &S, character: char) -> LoadOutcome {
        let ticket = self.begin_load(character);
        let fetched = source.fetch_glyph(character);
        self.complete_load(ticket, fetched)
    }

    /// Start or resume autoplay. A fully drawn glyph restarts from its first stroke.
    pub fn play(&mut self) -> KakijunResult<()> {
        match self.status {
            PlaybackStatus::Playing => Ok(()),
            PlaybackStatus::Ready | PlaybackStatus::Paused => {
                self.start_playing();
                Ok(())
            }
            other => Err(KakijunError::invalid_state(format!(
                "cannot play while {other:?}"
            ))),
        }
    }

    /// Suspend autoplay, keeping the partially drawn stroke visible.
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.suspend();
            self.status = PlaybackStatus::Paused;
            tracing::debug!(index = self.current, partial = self.partial, "paused");
        }
    }

    /// Pause when playing, play otherwise.
    pub fn toggle(&mut self) -> KakijunResult<()> {
        if self.status == PlaybackStatus::Playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Draw the current stroke fully and advance by one. Returns `false` when there is nothing to
    /// advance.
    pub fn step_forward(&mut self) -> bool {
        let Some(len) = self.loaded_len() else {
            return false;
        };
        self.suspend();
        if self.current >= len {
            return false;
        }
        self.current += 1;
        self.partial = 0.0;
        tracing::debug!(index = self.current, "step forward");
        true
    }

    /// Undraw the previous stroke and move the index back to it. Returns `false` at the first
    /// stroke or when nothing is loaded.
    pub fn step_backward(&mut self) -> bool {
        if self.loaded_len().is_none() {
            return false;
        }
        self.suspend();
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.partial = 0.0;
        tracing::debug!(index = self.current, "step backward");
        true
    }

    /// Show strokes `[0, index)` drawn and the rest undrawn.
    pub fn jump_to(&mut self, index: usize) -> KakijunResult<()> {
        let Some(len) = self.loaded_len() else {
            return Err(KakijunError::invalid_state(format!(
                "cannot jump while {:?}",
                self.status
            )));
        };
        if index > len {
            return Err(KakijunError::validation(format!(
                "stroke index {index} out of range 0..={len}"
            )));
        }
        self.suspend();
        self.current = index;
        self.partial = 0.0;
        tracing::debug!(index, "jump");
        Ok(())
    }

    /// Cancel any animation and rewind to the first stroke with status `Ready`.
    ///
    /// Returns `false` (and changes nothing) when no glyph is loaded.
    pub fn reset(&mut self) -> bool {
        if self.loaded_len().is_none() {
            return false;
        }
        self.scope.cancel();
        self.anim = None;
        self.current = 0;
        self.partial = 0.0;
        self.status = PlaybackStatus::Ready;
        tracing::debug!("reset");
        true
    }

    /// Set the speed multiplier, clamped to the configured range, and return the effective value.
    ///
    /// The stroke in flight keeps its timing; the new speed applies from the next stroke.
    pub fn set_speed(&mut self, multiplier: f64) -> KakijunResult<f64> {
        self.speed = self.config.clamp_speed(multiplier)?;
        tracing::debug!(speed = self.speed, "speed");
        Ok(self.speed)
    }

    /// Advance host time to `now` and run every continuation that came due, in order.
    ///
    /// Returns the events since the previous call, including those raised by operations.
    /// Timestamps earlier than the last observed time are ignored.
    pub fn tick(&mut self, now: Duration) -> Vec<PlaybackEvent> {
        self.now = self.now.max(now);

        while let Some(anim) = self.anim {
            if !anim.deadline.is_due(self.now) {
                break;
            }
            self.anim = None;
            if !self.scope.is_live(anim.deadline.token) {
                tracing::trace!(index = anim.index, "stale stroke completion dropped");
                continue;
            }
            self.finish_stroke(anim);
        }

        std::mem::take(&mut self.events)
    }

    /// Snapshot for progress indicators and control panels.
    pub fn state(&self) -> PlaybackState {
        let total = self.glyph.as_ref().map_or(0, GlyphStrokeSet::len);
        PlaybackState {
            status: self.status,
            character: self.character,
            current_stroke_index: self.current,
            total_strokes: total,
            speed: self.speed,
            progress: if total == 0 {
                0.0
            } else {
                self.current as f64 / total as f64
            },
            error: self.error.clone(),
        }
    }

    /// Describe what should be on screen at the last observed time.
    pub fn frame(&self) -> Frame<'_> {
        let Some(character) = self.character else {
            return Frame::Idle;
        };
        match self.status {
            PlaybackStatus::Idle => Frame::Idle,
            PlaybackStatus::Loading => Frame::Loading { character },
            PlaybackStatus::Error => Frame::Fallback(FallbackFrame {
                character,
                view_box: ViewBox::default(),
                error: self
                    .error
                    .clone()
                    .unwrap_or_else(|| LoadError::unavailable("unknown")),
            }),
            PlaybackStatus::Ready | PlaybackStatus::Playing | PlaybackStatus::Paused => {
                match &self.glyph {
                    Some(glyph) => Frame::Strokes(self.stroke_frame(glyph)),
                    None => Frame::Idle,
                }
            }
        }
    }

    /// Compute the current frame and hand it to `sink`.
    pub fn present<R: RenderSink + ?Sized>(&self, sink: &mut R) -> KakijunResult<()> {
        sink.present(&self.frame())
    }

    /// Dispatch a control command. Sequence navigation commands are ignored here.
    pub fn apply(&mut self, command: ControlCommand) -> KakijunResult<()> {
        match command {
            ControlCommand::TogglePlay => self.toggle()?,
            ControlCommand::Play => self.play()?,
            ControlCommand::Pause => self.pause(),
            ControlCommand::StepForward => {
                self.step_forward();
            }
            ControlCommand::StepBackward => {
                self.step_backward();
            }
            ControlCommand::Reset => {
                self.reset();
            }
            ControlCommand::SetSpeed(m) => {
                self.set_speed(m)?;
            }
            ControlCommand::PrevCharacter | ControlCommand::NextCharacter => {
                tracing::debug!(?command, "navigation needs a sequence");
            }
        }
        Ok(())
    }

    /// Whether every stroke is drawn and nothing is in flight.
    pub fn is_finished(&self) -> bool {
        self.anim.is_none() && self.loaded_len().is_some_and(|len| self.current >= len)
    }

    /// Current status.
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Effective speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Last observed host time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Character loaded or being loaded.
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// Loaded stroke set.
    pub fn glyph(&self) -> Option<&GlyphStrokeSet> {
        self.glyph.as_ref()
    }

    /// Load failure, when in `Error`.
    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// Settings the controller was built with.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    fn loaded_len(&self) -> Option<usize> {
        if self.status.is_loaded() {
            self.glyph.as_ref().map(GlyphStrokeSet::len)
        } else {
            None
        }
    }

    fn start_playing(&mut self) {
        let Some(len) = self.loaded_len() else {
            return;
        };
        if self.current >= len {
            self.current = 0;
            self.partial = 0.0;
        }
        self.status = PlaybackStatus::Playing;
        tracing::debug!(index = self.current, speed = self.speed, "playing");
        self.start_stroke(self.now);
    }

    /// Schedule stroke `current` from its saved progress, starting at host time `at`.
    fn start_stroke(&mut self, at: Duration) {
        let from = self.partial.clamp(0.0, 1.0);
        let full = self.config.stroke_duration(self.speed);
        let duration = scaled(full, 1.0 - from);
        self.anim = Some(StrokeAnimation {
            index: self.current,
            started_at: at,
            duration,
            from_progress: from,
            deadline: Deadline::new(at + duration, &self.scope),
        });
        if from == 0.0 {
            self.events.push(PlaybackEvent::StrokeStarted {
                index: self.current,
                at,
            });
        }
        tracing::trace!(index = self.current, ?at, ?duration, from, "stroke scheduled");
    }

    fn finish_stroke(&mut self, anim: StrokeAnimation) {
        let at = anim.deadline.at;
        self.current = anim.index + 1;
        self.partial = 0.0;
        self.events.push(PlaybackEvent::StrokeCompleted {
            index: anim.index,
            at,
        });
        tracing::trace!(index = anim.index, ?at, "stroke completed");

        let len = self.loaded_len().unwrap_or(0);
        if self.current < len {
            self.start_stroke(at);
        } else {
            self.status = PlaybackStatus::Ready;
            self.events.push(PlaybackEvent::Finished { at });
            tracing::debug!(?at, "finished");
        }
    }

    /// Cancel the in-flight stroke, remembering how far it got, and leave autoplay.
    fn suspend(&mut self) {
        self.scope.cancel();
        if let Some(anim) = self.anim.take() {
            self.partial = anim.progress_at(self.now);
        }
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Time progress of stroke `current`.
    fn current_progress(&self) -> f64 {
        match &self.anim {
            Some(anim) if anim.index == self.current => anim.progress_at(self.now),
            _ => self.partial,
        }
    }

    fn stroke_frame<'a>(&self, glyph: &'a GlyphStrokeSet) -> StrokeFrame<'a> {
        let progress = self.current_progress();
        let drawing = self.anim.is_some() || progress > 0.0;
        let active_fraction = self.config.ease.apply(progress);

        let strokes = glyph
            .strokes
            .iter()
            .map(|s| {
                let visible_fraction = if s.order < self.current {
                    1.0
                } else if s.order == self.current {
                    active_fraction
                } else {
                    0.0
                };
                StrokeView {
                    order: s.order,
                    geometry: &s.geometry,
                    length: s.length,
                    visible_fraction,
                    dash_offset: s.length * (1.0 - visible_fraction),
                    style: StyleState::for_stroke(s.order, self.current, drawing),
                }
            })
            .collect();

        let labels = glyph
            .labels
            .iter()
            .map(|l| LabelView {
                number: l.number,
                position: l.position,
                style: StyleState::for_stroke(l.order(), self.current, drawing),
            })
            .collect();

        StrokeFrame {
            character: glyph.character,
            view_box: glyph.view_box,
            status: self.status,
            current_stroke_index: self.current,
            strokes,
            labels,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
