//! Long-lived engine data.
//!
//! Overview
//! - `engineconfig` – canvas request, background, ignore table, pacing; INI load/save
//! - `ignorecollisions` – tag-based collision filter
//! - `canvas` – render-surface dimensions derived from the config
//! - `idgen` – per-engine entity id allocation
//! - `clock` – injectable time sources
//! - `worldtime` – frame count, delta and elapsed time
//! - `surface` – the render-surface contract and headless surfaces
//! - `audio` – bridge to the background audio thread and `Sound` handles
pub mod audio;
pub mod canvas;
pub mod clock;
pub mod engineconfig;
pub mod idgen;
pub mod ignorecollisions;
pub mod surface;
pub mod worldtime;
