use std::time::Duration;

use crate::{
    controls::ControlCommand,
    foundation::config::PlaybackConfig,
    foundation::error::{KakijunError, KakijunResult},
    glyph::source::GlyphSource,
    playback::cancel::{CancelScope, Deadline},
    playback::controller::PlaybackController,
    playback::frame::Frame,
    playback::state::{PlaybackEvent, PlaybackState, PlaybackStatus},
    render::sink::RenderSink,
    sequence::filter::playable_characters,
};

/// Lifecycle of a [`SequenceChainer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceStatus {
    /// Not playing; the focused character can be stepped by hand.
    Ready,
    /// The focused character is animating.
    Playing,
    /// Autoplay suspended by the user.
    Paused,
    /// Waiting out the pause before the next character.
    Intermission,
    /// Every character has been played.
    Complete,
}

/// Position of one character relative to the focused one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterMark {
    /// Before the focused character.
    Done,
    /// The focused character.
    Current,
    /// After the focused character.
    Upcoming,
}

/// Snapshot of a sequence for character chips and progress indicators.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequenceState {
    /// Sequence status.
    pub status: SequenceStatus,
    /// Playable characters in order.
    pub characters: Vec<char>,
    /// Index of the focused character.
    pub current_character_index: usize,
    /// Number of playable characters.
    pub total_characters: usize,
    /// One mark per character.
    pub marks: Vec<CharacterMark>,
    /// Share of the whole sequence drawn,
    /// `(current_character_index + character.progress) / total_characters`.
    pub progress: f64,
    /// Shared speed multiplier.
    pub speed: f64,
    /// State of the focused character's controller.
    pub character: PlaybackState,
}

/// Something that happened in a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequenceEvent {
    /// Stroke-level event of character `character_index`.
    Stroke {
        /// Character the event belongs to.
        character_index: usize,
        /// Controller event.
        event: PlaybackEvent,
    },
    /// Autoplay moved on to character `character_index`.
    CharacterStarted {
        /// Character now playing.
        character_index: usize,
    },
    /// The last character finished.
    Complete,
}

/// Plays a multi-character string one character after another.
///
/// Each playable character gets its own [`PlaybackController`], created up front and loaded from
/// the shared source the first time it is focused. Only the focused controller is ticked or
/// rendered. Between characters the chainer waits `inter_character_pause` on a [`Deadline`] of
/// its own scope, so pausing or navigating during the wait drops the pending advance.
#[derive(Debug)]
pub struct SequenceChainer<S> {
    source: S,
    config: PlaybackConfig,
    characters: Vec<char>,
    controllers: Vec<PlaybackController>,
    current: usize,
    status: SequenceStatus,
    intermission: Option<Deadline>,
    scope: CancelScope,
    now: Duration,
    events: Vec<SequenceEvent>,
}

impl<S: GlyphSource> SequenceChainer<S> {
    /// Filter `text` down to its playable characters and focus the first one.
    ///
    /// Fails with [`KakijunError::EmptySequence`] when nothing is left to play.
    #[tracing::instrument(skip(config, source))]
    pub fn new(text: &str, config: PlaybackConfig, source: S) -> KakijunResult<Self> {
        config.validate()?;
        let characters = playable_characters(text);
        if characters.is_empty() {
            return Err(KakijunError::EmptySequence);
        }

        let per_character = PlaybackConfig {
            auto_play: false,
            ..config.clone()
        };
        let controllers = characters
            .iter()
            .map(|_| PlaybackController::new(per_character.clone()))
            .collect::<KakijunResult<Vec<_>>>()?;

        tracing::debug!(characters = characters.len(), "sequence loaded");

        let mut chainer = Self {
            source,
            config,
            characters,
            controllers,
            current: 0,
            status: SequenceStatus::Ready,
            intermission: None,
            scope: CancelScope::new(),
            now: Duration::ZERO,
            events: Vec::new(),
        };
        chainer.focus(0, Duration::ZERO);
        if chainer.config.auto_play {
            chainer.play()?;
        }
        Ok(chainer)
    }

    /// Start or resume autoplay.
    ///
    /// From `Complete`, or when the last character is fully drawn, playback restarts from the
    /// first character. When the focused character is already done (or has no stroke data) the
    /// next one starts straight away.
    pub fn play(&mut self) -> KakijunResult<()> {
        let now = self.now;
        match self.status {
            SequenceStatus::Playing | SequenceStatus::Intermission => Ok(()),
            SequenceStatus::Complete => {
                self.focus(0, now);
                self.start_current(now)
            }
            SequenceStatus::Ready | SequenceStatus::Paused => {
                if !self.current_is_done() {
                    return self.start_current(now);
                }
                let next = if self.current + 1 < self.characters.len() {
                    self.current + 1
                } else {
                    0
                };
                self.focus(next, now);
                self.start_current(now)
            }
        }
    }

    /// Suspend autoplay, dropping any pending advance to the next character.
    pub fn pause(&mut self) {
        match self.status {
            SequenceStatus::Playing => {
                self.controllers[self.current].pause();
                self.status = SequenceStatus::Paused;
            }
            SequenceStatus::Intermission => {
                self.cancel_intermission();
                self.status = SequenceStatus::Paused;
            }
            _ => return,
        }
        tracing::debug!(character_index = self.current, "sequence paused");
    }

    /// Pause when playing or waiting between characters, play otherwise.
    pub fn toggle(&mut self) -> KakijunResult<()> {
        match self.status {
            SequenceStatus::Playing | SequenceStatus::Intermission => {
                self.pause();
                Ok(())
            }
            _ => self.play(),
        }
    }

    /// Stop and rewind to the first stroke of the first character.
    pub fn reset(&mut self) {
        self.cancel_intermission();
        self.controllers[self.current].pause();
        self.focus(0, self.now);
        self.status = SequenceStatus::Ready;
        tracing::debug!("sequence reset");
    }

    /// Stop and focus the previous character. Returns `false` at the first character.
    pub fn prev_character(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.navigate(self.current - 1);
        true
    }

    /// Stop and focus the next character. Returns `false` at the last character.
    pub fn next_character(&mut self) -> bool {
        if self.current + 1 >= self.characters.len() {
            return false;
        }
        self.navigate(self.current + 1);
        true
    }

    /// Stop and focus character `index`.
    pub fn jump_to_character(&mut self, index: usize) -> KakijunResult<()> {
        if index >= self.characters.len() {
            return Err(KakijunError::validation(format!(
                "character index {index} out of range 0..{}",
                self.characters.len()
            )));
        }
        self.navigate(index);
        Ok(())
    }

    /// Set the speed of every character's controller and return the effective value.
    pub fn set_speed(&mut self, multiplier: f64) -> KakijunResult<f64> {
        let speed = self.config.clamp_speed(multiplier)?;
        for c in &mut self.controllers {
            c.set_speed(speed)?;
        }
        Ok(speed)
    }

    /// Advance host time to `now`, driving the focused character and any pending advance.
    pub fn tick(&mut self, now: Duration) -> Vec<SequenceEvent> {
        self.now = self.now.max(now);

        loop {
            self.pump_current(self.now);

            let Some(deadline) = self.intermission else {
                break;
            };
            if !deadline.is_due(self.now) {
                break;
            }
            self.intermission = None;
            if !self.scope.is_live(deadline.token) || self.status != SequenceStatus::Intermission {
                tracing::trace!("stale intermission dropped");
                continue;
            }

            let next = self.current + 1;
            self.focus(next, deadline.at);
            if let Err(e) = self.start_current(deadline.at) {
                tracing::warn!(character_index = next, error = %e, "could not start character");
                self.status = SequenceStatus::Paused;
            }
        }

        std::mem::take(&mut self.events)
    }

    /// Snapshot of the whole sequence.
    pub fn state(&self) -> SequenceState {
        let total = self.characters.len();
        let character = self.controllers[self.current].state();
        let marks = (0..total)
            .map(|i| match i.cmp(&self.current) {
                std::cmp::Ordering::Less => CharacterMark::Done,
                std::cmp::Ordering::Equal => CharacterMark::Current,
                std::cmp::Ordering::Greater => CharacterMark::Upcoming,
            })
            .collect();
        SequenceState {
            status: self.status,
            characters: self.characters.clone(),
            current_character_index: self.current,
            total_characters: total,
            marks,
            progress: if self.status == SequenceStatus::Complete {
                1.0
            } else {
                (self.current as f64 + character.progress) / total as f64
            },
            speed: self.speed(),
            character,
        }
    }

    /// Frame of the focused character.
    pub fn frame(&self) -> Frame<'_> {
        self.controllers[self.current].frame()
    }

    /// Compute the focused character's frame and hand it to `sink`.
    pub fn present<R: RenderSink + ?Sized>(&self, sink: &mut R) -> KakijunResult<()> {
        self.controllers[self.current].present(sink)
    }

    /// Dispatch a control command. Stroke steps go to the focused character and stop autoplay.
    pub fn apply(&mut self, command: ControlCommand) -> KakijunResult<()> {
        match command {
            ControlCommand::TogglePlay => self.toggle()?,
            ControlCommand::Play => self.play()?,
            ControlCommand::Pause => self.pause(),
            ControlCommand::Reset => self.reset(),
            ControlCommand::PrevCharacter => {
                self.prev_character();
            }
            ControlCommand::NextCharacter => {
                self.next_character();
            }
            ControlCommand::SetSpeed(m) => {
                self.set_speed(m)?;
            }
            ControlCommand::StepForward | ControlCommand::StepBackward => {
                self.pause();
                if self.status == SequenceStatus::Complete {
                    self.status = SequenceStatus::Ready;
                }
                self.controllers[self.current].apply(command)?;
            }
        }
        Ok(())
    }

    /// Playable characters in order.
    pub fn characters(&self) -> &[char] {
        &self.characters
    }

    /// Index of the focused character.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Sequence status.
    pub fn status(&self) -> SequenceStatus {
        self.status
    }

    /// Shared speed multiplier.
    pub fn speed(&self) -> f64 {
        self.controllers[self.current].speed()
    }

    /// Controller of the focused character.
    pub fn current_controller(&self) -> &PlaybackController {
        &self.controllers[self.current]
    }

    /// Tick the focused controller and translate its events.
    fn pump_current(&mut self, now: Duration) {
        let index = self.current;
        for event in self.controllers[index].tick(now) {
            self.events.push(SequenceEvent::Stroke {
                character_index: index,
                event,
            });
            if let PlaybackEvent::Finished { at } = event
                && self.status == SequenceStatus::Playing
            {
                self.character_finished(at);
            }
        }
    }

    /// Make `index` the focused character at host time `at`: load it on first focus, rewind it
    /// otherwise.
    fn focus(&mut self, index: usize, at: Duration) {
        self.current = index;
        self.pump_current(at);
        let character = self.characters[index];
        let controller = &mut self.controllers[index];
        if controller.status() == PlaybackStatus::Idle {
            let outcome = controller.load(&self.source, character);
            tracing::debug!(character_index = index, %character, ?outcome, "character loaded");
        } else {
            controller.reset();
        }
    }

    /// Play the focused character from host time `at`.
    fn start_current(&mut self, at: Duration) -> KakijunResult<()> {
        self.status = SequenceStatus::Playing;
        self.events.push(SequenceEvent::CharacterStarted {
            character_index: self.current,
        });
        tracing::debug!(character_index = self.current, "character started");

        self.pump_current(at);
        if self.controllers[self.current].status() == PlaybackStatus::Error {
            self.character_finished(at);
            return Ok(());
        }
        self.controllers[self.current].play()
    }

    /// Schedule the next character, or complete the sequence.
    fn character_finished(&mut self, at: Duration) {
        if self.current + 1 < self.characters.len() {
            self.status = SequenceStatus::Intermission;
            let pause = self.config.inter_character_pause();
            self.intermission = Some(Deadline::new(at + pause, &self.scope));
            tracing::debug!(character_index = self.current, ?at, "intermission");
        } else {
            self.status = SequenceStatus::Complete;
            self.intermission = None;
            self.events.push(SequenceEvent::Complete);
            tracing::debug!(?at, "sequence complete");
        }
    }

    /// Whether autoplay has nothing left to draw for the focused character.
    fn current_is_done(&self) -> bool {
        let c = &self.controllers[self.current];
        c.status() == PlaybackStatus::Error || c.is_finished()
    }

    fn cancel_intermission(&mut self) {
        self.scope.cancel();
        self.intermission = None;
    }

    fn navigate(&mut self, index: usize) {
        self.cancel_intermission();
        self.controllers[self.current].pause();
        self.focus(index, self.now);
        self.status = SequenceStatus::Ready;
        tracing::debug!(character_index = index, "navigate");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/chainer.rs"]
mod tests;
