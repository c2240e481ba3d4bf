//! Data attached to entities.
//!
//! Submodules overview:
//! - [`vector`] – 2D points and axis-aligned bounding boxes
//! - [`color`] – RGBA colors with hex parsing
//! - [`collider`] – the collider protocol, tri-state [`collider::Overlap`] and `NoCollider`
//! - [`boxcollider`] – axis-aligned box collider, resolved by the bounding-box fallback
//! - [`circlecollider`] – circle collider resolving circle-vs-circle itself
//! - [`sprite`] – the [`sprite::Drawable`] capability and sprite-sheet sprites

pub mod boxcollider;
pub mod circlecollider;
pub mod collider;
pub mod color;
pub mod sprite;
pub mod vector;
