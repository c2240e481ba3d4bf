//! Background audio thread.
//!
//! The thread owns every sound's playback state and answers each command with
//! an [`AudioMessage`]. The backend is headless: playback is tracked and
//! logged, no device is opened. The main thread talks to it only through the
//! channels in [`AudioBridge`](crate::resources::audio::AudioBridge).
//!
//! Hosts call [`drain_audio_messages`] once per frame so replies never pile
//! up on the message channel.

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, trace, warn};
use rustc_hash::FxHashMap;

use crate::events::audio::{AudioCmd, AudioMessage};

#[derive(Debug, Default)]
struct Track {
    path: String,
    playing: bool,
    /// Times the track was started from the top.
    plays_from_start: u32,
    at_start: bool,
}

/// Entry point of the audio thread.
///
/// Blocks on the command channel until [`AudioCmd::Shutdown`] arrives or every
/// sender is dropped.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    info!("[audio] thread starting (id={:?})", std::thread::current().id());
    let mut tracks: FxHashMap<String, Track> = FxHashMap::default();

    for cmd in rx_cmd.iter() {
        let reply = match cmd {
            AudioCmd::Load { id, path } => {
                debug!("[audio] loaded id='{}' path='{}'", id, path);
                tracks.insert(
                    id.clone(),
                    Track {
                        path,
                        at_start: true,
                        ..Track::default()
                    },
                );
                AudioMessage::Loaded { id }
            }
            AudioCmd::Play { id } => match tracks.get_mut(&id) {
                Some(track) => {
                    if track.at_start {
                        track.plays_from_start += 1;
                    }
                    track.playing = true;
                    track.at_start = false;
                    debug!("[audio] play id='{}' ({})", id, track.path);
                    AudioMessage::Started { id }
                }
                None => AudioMessage::Unknown { id },
            },
            AudioCmd::Stop { id } => match tracks.get_mut(&id) {
                Some(track) => {
                    track.playing = false;
                    debug!("[audio] stop id='{}'", id);
                    AudioMessage::Stopped { id }
                }
                None => AudioMessage::Unknown { id },
            },
            AudioCmd::Rewind { id } => match tracks.get_mut(&id) {
                Some(track) => {
                    track.at_start = true;
                    AudioMessage::Rewound { id }
                }
                None => AudioMessage::Unknown { id },
            },
            AudioCmd::Shutdown => break,
        };
        if let AudioMessage::Unknown { id } = &reply {
            warn!("[audio] command for unknown sound '{}'", id);
        }
        // The bridge may already be gone during teardown.
        let _ = tx_msg.send(reply);
    }

    let started: u32 = tracks.values().map(|t| t.plays_from_start).sum();
    let playing = tracks.values().filter(|t| t.playing).count();
    info!(
        "[audio] thread exiting: {} sound(s), {} start(s), {} still playing",
        tracks.len(),
        started,
        playing
    );
}

/// Consume every reply the audio thread produced so far, usually
/// `bridge.rx_msg`. Returns how many were drained.
pub fn drain_audio_messages(rx_msg: &Receiver<AudioMessage>) -> usize {
    let mut drained = 0;
    for msg in rx_msg.try_iter() {
        trace!("[audio] {:?}", msg);
        drained += 1;
    }
    drained
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn every_command_gets_a_reply_and_drain_consumes_them() {
        let (tx_cmd, rx_cmd) = unbounded();
        let (tx_msg, rx_msg) = unbounded();
        for cmd in [
            AudioCmd::Load {
                id: "wing".into(),
                path: "./audio/sfx_wing.wav".into(),
            },
            AudioCmd::Rewind { id: "wing".into() },
            AudioCmd::Play { id: "wing".into() },
            AudioCmd::Stop { id: "ghost".into() },
            AudioCmd::Shutdown,
        ] {
            tx_cmd.send(cmd).expect("command queued");
        }
        // Runs on this thread and returns at Shutdown.
        audio_thread(rx_cmd, tx_msg);

        assert_eq!(rx_msg.len(), 4);
        assert_eq!(drain_audio_messages(&rx_msg), 4);
        assert_eq!(drain_audio_messages(&rx_msg), 0);
        assert!(rx_msg.is_empty());
    }
}
