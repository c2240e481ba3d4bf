//! Engine passes.
//!
//! Submodules overview
//! - [`update`] – run entity updates in list order
//! - [`draw`] – background, entity draw and debug overlay passes
//! - [`collision`] – overlap predicate and the pairwise sweep
//! - [`audio`] – the background audio thread
//! - `render` – raylib render surface (`window` feature)
//! - `input` – raylib keyboard polling (`window` feature)

pub mod audio;
pub mod collision;
pub mod draw;
#[cfg(feature = "window")]
pub mod input;
#[cfg(feature = "window")]
pub mod render;
pub mod update;
