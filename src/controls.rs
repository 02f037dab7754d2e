/// User intent from a control panel or keyboard.
///
/// Both [`crate::PlaybackController::apply`] and [`crate::SequenceChainer::apply`] accept these,
/// so a UI can route every button and key through one function.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Play when stopped, pause when playing.
    TogglePlay,
    /// Start or resume autoplay.
    Play,
    /// Suspend autoplay.
    Pause,
    /// Draw the current stroke fully and move to the next one.
    StepForward,
    /// Undraw the previous stroke.
    StepBackward,
    /// Rewind to the first stroke.
    Reset,
    /// Focus the previous character of a sequence.
    PrevCharacter,
    /// Focus the next character of a sequence.
    NextCharacter,
    /// Change the speed multiplier.
    SetSpeed(f64),
}

impl ControlCommand {
    /// Default keyboard binding, keyed by DOM-style key names.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Space" => Some(Self::TogglePlay),
            "ArrowLeft" => Some(Self::StepBackward),
            "ArrowRight" => Some(Self::StepForward),
            "r" | "R" => Some(Self::Reset),
            _ => None,
        }
    }
}
