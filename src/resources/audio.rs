//! Bridge between the game thread and the background audio thread, plus the
//! [`Sound`] handle game code holds.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread.
//! Call [`shutdown_audio`] during teardown to stop and join it; dropping the
//! bridge does the same.

use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;

pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (game -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> game).
    pub rx_msg: Receiver<AudioMessage>,
    handle: Option<JoinHandle<()>>,
}

/// Spawn the audio thread and return the bridge to it.
pub fn setup_audio() -> AudioBridge {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    AudioBridge {
        tx_cmd,
        rx_msg,
        handle: Some(handle),
    }
}

/// Send [`AudioCmd::Shutdown`] and wait for the audio thread to exit.
pub fn shutdown_audio(mut bridge: AudioBridge) {
    bridge.stop_thread();
}

impl AudioBridge {
    /// Register `path` under `id` and return a handle to it.
    pub fn load(&self, id: impl Into<String>, path: impl Into<String>) -> Sound {
        let id = id.into();
        let _ = self.tx_cmd.send(AudioCmd::Load {
            id: id.clone(),
            path: path.into(),
        });
        Sound {
            id,
            tx: self.tx_cmd.clone(),
        }
    }

    /// Every message the audio thread produced so far, without blocking.
    pub fn poll(&self) -> Vec<AudioMessage> {
        self.rx_msg.try_iter().collect()
    }

    /// Wait up to `timeout` for the next message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<AudioMessage> {
        match self.rx_msg.recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    fn stop_thread(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.tx_cmd.send(AudioCmd::Shutdown);
            let _ = handle.join();
        }
    }
}

impl Drop for AudioBridge {
    fn drop(&mut self) {
        self.stop_thread();
    }
}

/// Handle to one loaded sound. Cheap to clone; every clone drives the same
/// sound.
#[derive(Debug, Clone)]
pub struct Sound {
    id: String,
    tx: Sender<AudioCmd>,
}

impl Sound {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn play(&self) {
        self.send(AudioCmd::Play { id: self.id.clone() });
    }

    /// Pause, keeping the current position.
    pub fn stop(&self) {
        self.send(AudioCmd::Stop { id: self.id.clone() });
    }

    pub fn reset(&self) {
        self.send(AudioCmd::Rewind { id: self.id.clone() });
    }

    pub fn play_from_beginning(&self) {
        self.reset();
        self.play();
    }

    fn send(&self, cmd: AudioCmd) {
        // Sounds outliving the audio thread go quiet.
        let _ = self.tx.send(cmd);
    }
}
