use crate::foundation::core::Point;

/// Host-side command, applied at the top of the next tick.
///
/// These stand in for the key and mouse handlers of an interactive host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    ToggleRecording,
    StartRecording,
    StopRecording,
    Pause,
    Resume,
    /// Halt the loop for good.
    Stop,
    /// Pointer press at canvas coordinates.
    Pointer(Point),
}

impl Control {
    /// Whether this command touches the recording flag.
    pub fn is_recording_control(&self) -> bool {
        matches!(
            self,
            Self::ToggleRecording | Self::StartRecording | Self::StopRecording
        )
    }

    /// Map a conventional key binding onto a command: `r` toggles recording, space pauses or
    /// resumes, escape stops.
    pub fn from_key(key: char, paused: bool) -> Option<Self> {
        match key {
            'r' | 'R' => Some(Self::ToggleRecording),
            ' ' if paused => Some(Self::Resume),
            ' ' => Some(Self::Pause),
            '\u{1b}' => Some(Self::Stop),
            _ => None,
        }
    }
}
