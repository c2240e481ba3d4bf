//! Messages produced by the engine and its collaborators.
//!
//! Submodules:
//! - [`audio`] – commands to and replies from the audio thread
//! - [`collision`] – one record per notified collision pair
pub mod audio;
pub mod collision;
