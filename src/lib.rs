//! flapengine library.
//!
//! A minimal 2D real-time frame loop with entity management and pairwise
//! collision detection, plus the Flappy demo that drives it. Exposed as a
//! library for the demo binary and the integration tests.
//!
//! - [`engine`] – the entity list, engine state and the per-frame driver
//! - [`entity`] – entities, their hooks and the per-call [`entity::Frame`]
//! - [`components`] – geometry, colors, colliders and drawables
//! - [`resources`] – configuration, canvas, clocks, ids, render surfaces, audio
//! - [`systems`] – the update, draw, collision and audio passes
//! - [`events`] – collision records and audio messages
//! - [`runner`] – host-side game loop
//! - [`game`] – the Flappy demo

pub mod components;
pub mod engine;
pub mod entity;
pub mod events;
pub mod game;
pub mod resources;
pub mod runner;
pub mod systems;
