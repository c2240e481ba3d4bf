//! Messages exchanged with the background audio thread.

/// Commands sent *to* the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    Load { id: String, path: String },
    Play { id: String },
    /// Pause playback, keeping the position.
    Stop { id: String },
    /// Move the play position back to the start.
    Rewind { id: String },
    Shutdown,
}

/// Messages sent *back* from the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioMessage {
    Loaded { id: String },
    Started { id: String },
    Stopped { id: String },
    Rewound { id: String },
    /// A command named a sound that was never loaded.
    Unknown { id: String },
}
