//! Entities (game objects) and their lifecycle hooks.
//!
//! An [`Entity`] is a positioned, collidable, drawable simulation object owned
//! by the [`Engine`](crate::engine::Engine). Game-specific behavior is plugged
//! in through [`EntityHooks`]; every hook is optional and defaults to a no-op.
//! [`HookSet`] builds a hook bundle from closures for the common case where a
//! dedicated type would be overkill.
//!
//! # Lifecycle
//!
//! `Created -> Initialized -> ... -> Disabled`
//!
//! - On the first update while enabled, `init` runs and only then is the
//!   entity marked initialized. The regular `update` hook of that same frame
//!   runs after `init` returns.
//! - Every enabled update runs the `update` hook, snapshots `position` into
//!   `prev_position` and integrates velocity. The y axis is inverted on
//!   purpose: positive `velocity.y` moves the entity up the screen.
//! - Disabled entities skip update and draw and are excluded from collision,
//!   but stay in the engine's list.
//!
//! # Hooks and borrowing
//!
//! While a hook runs, the hook object is taken out of its entity so the hook
//! receives `&mut Entity` for its owner. Other entities are reachable through
//! [`Frame::others`] (update/init) or the `other` argument (overlap).

use std::fmt;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::components::collider::{Collider, NoCollider};
use crate::components::color::Color;
use crate::components::sprite::Drawable;
use crate::components::vector::{BoundingBox, Vector};
use crate::engine::EngineState;
use crate::resources::surface::RenderSurface;

/// Tag given to entities built without hooks.
pub const DEFAULT_KIND: &str = "Entity";

/// Radius of the position marker drawn in debug mode.
const DEBUG_MARKER_RADIUS: f32 = 10.0;

/// Unique entity identifier. Never reused within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-call context handed to `init` and `update` hooks.
pub struct Frame<'a> {
    /// Milliseconds since the previous frame, already time-scaled.
    pub delta_time: f32,
    pub frame_number: u64,
    pub state: &'a mut EngineState,
    /// Every entity in the engine except the one being updated.
    pub others: Others<'a>,
}

/// Mutable view over the entity list minus the entity currently running a hook.
pub struct Others<'a> {
    before: &'a mut [Entity],
    after: &'a mut [Entity],
}

impl<'a> Others<'a> {
    pub fn new(before: &'a mut [Entity], after: &'a mut [Entity]) -> Self {
        Self { before, after }
    }

    /// No other entities; used when updating an entity outside an engine.
    pub fn empty() -> Self {
        Self {
            before: &mut [],
            after: &mut [],
        }
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.before.iter().chain(self.after.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.before.iter_mut().chain(self.after.iter_mut())
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.iter_mut().find(|e| e.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Entity> {
        self.iter().find(|e| e.name == name)
    }
}

/// Optional behavior attached to an entity.
pub trait EntityHooks {
    /// Type name; becomes the entity's initial tag.
    fn kind(&self) -> &'static str {
        DEFAULT_KIND
    }

    /// Runs once, on the first enabled update.
    fn init(&mut self, _me: &mut Entity, _frame: &mut Frame<'_>) {}

    /// Runs every enabled update, before velocity integration.
    fn update(&mut self, _me: &mut Entity, _frame: &mut Frame<'_>) {}

    /// Runs every enabled draw, before the drawable renders.
    fn draw(&mut self, _me: &mut Entity, _surface: &mut dyn RenderSurface) {}

    /// Runs once per detected overlap with `other`.
    fn on_overlap(&mut self, _me: &mut Entity, _other: &mut Entity, _state: &mut EngineState) {}
}

type InitFn = Box<dyn FnMut(&mut Entity, &mut Frame<'_>)>;
type DrawFn = Box<dyn FnMut(&mut Entity, &mut dyn RenderSurface)>;
type OverlapFn = Box<dyn FnMut(&mut Entity, &mut Entity, &mut EngineState)>;

/// Closure-based hook bundle.
///
/// ```ignore
/// let hooks = HookSet::new("Ball")
///     .on_update(|me, frame| me.velocity.y -= 0.001 * frame.delta_time)
///     .on_overlap(|me, other, _| log::info!("{} hit {}", me.name, other.name));
/// ```
pub struct HookSet {
    kind: &'static str,
    init: Option<InitFn>,
    update: Option<InitFn>,
    draw: Option<DrawFn>,
    overlap: Option<OverlapFn>,
}

impl Default for HookSet {
    fn default() -> Self {
        Self::new(DEFAULT_KIND)
    }
}

impl HookSet {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            init: None,
            update: None,
            draw: None,
            overlap: None,
        }
    }

    pub fn on_init(mut self, f: impl FnMut(&mut Entity, &mut Frame<'_>) + 'static) -> Self {
        self.init = Some(Box::new(f));
        self
    }

    pub fn on_update(mut self, f: impl FnMut(&mut Entity, &mut Frame<'_>) + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    pub fn on_draw(mut self, f: impl FnMut(&mut Entity, &mut dyn RenderSurface) + 'static) -> Self {
        self.draw = Some(Box::new(f));
        self
    }

    pub fn on_overlap(
        mut self,
        f: impl FnMut(&mut Entity, &mut Entity, &mut EngineState) + 'static,
    ) -> Self {
        self.overlap = Some(Box::new(f));
        self
    }
}

impl EntityHooks for HookSet {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn init(&mut self, me: &mut Entity, frame: &mut Frame<'_>) {
        if let Some(f) = self.init.as_mut() {
            f(me, frame);
        }
    }

    fn update(&mut self, me: &mut Entity, frame: &mut Frame<'_>) {
        if let Some(f) = self.update.as_mut() {
            f(me, frame);
        }
    }

    fn draw(&mut self, me: &mut Entity, surface: &mut dyn RenderSurface) {
        if let Some(f) = self.draw.as_mut() {
            f(me, surface);
        }
    }

    fn on_overlap(&mut self, me: &mut Entity, other: &mut Entity, state: &mut EngineState) {
        if let Some(f) = self.overlap.as_mut() {
            f(me, other, state);
        }
    }
}

pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub position: Vector,
    pub velocity: Vector,
    pub prev_position: Vector,
    pub collider: Box<dyn Collider>,
    pub drawable: Option<Box<dyn Drawable>>,
    pub tags: FxHashSet<String>,
    pub enabled: bool,
    /// Static entities are never the first member of a collision pair.
    pub is_static: bool,
    pub initialized: bool,
    hooks: Option<Box<dyn EntityHooks>>,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("collider", &self.collider)
            .field("tags", &self.tags)
            .field("enabled", &self.enabled)
            .field("is_static", &self.is_static)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        let mut tags = FxHashSet::default();
        tags.insert(DEFAULT_KIND.to_string());
        Self {
            id,
            name: id.to_string(),
            position: Vector::zero(),
            velocity: Vector::zero(),
            prev_position: Vector::zero(),
            collider: Box::new(NoCollider::new()),
            drawable: None,
            tags,
            enabled: true,
            is_static: true,
            initialized: false,
            hooks: None,
        }
    }

    /// New entity driven by `hooks`, tagged with the hooks' kind.
    pub fn with_hooks(id: EntityId, hooks: impl EntityHooks + 'static) -> Self {
        let mut entity = Self::new(id);
        entity.tags.clear();
        entity.tags.insert(hooks.kind().to_string());
        entity.hooks = Some(Box::new(hooks));
        entity
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_collider(mut self, collider: impl Collider) -> Self {
        self.collider = Box::new(collider);
        self
    }

    pub fn with_drawable(mut self, drawable: impl Drawable + 'static) -> Self {
        self.drawable = Some(Box::new(drawable));
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Make the entity a collision-sweep initiator.
    pub fn dynamic(mut self) -> Self {
        self.is_static = false;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub fn set_collider(&mut self, collider: impl Collider) {
        self.collider = Box::new(collider);
    }

    pub fn set_hooks(&mut self, hooks: impl EntityHooks + 'static) {
        self.hooks = Some(Box::new(hooks));
    }

    pub fn has_hooks(&self) -> bool {
        self.hooks.is_some()
    }

    /// Current collider box at the current position.
    pub fn bounding_box(&self) -> BoundingBox {
        self.collider.bounding_box(self.position)
    }

    /// Run `f` with the hooks detached from `self`.
    ///
    /// A hook that installs replacement hooks on its owner wins over the
    /// detached ones.
    fn call_hooks(&mut self, f: impl FnOnce(&mut dyn EntityHooks, &mut Entity)) {
        if let Some(mut hooks) = self.hooks.take() {
            f(hooks.as_mut(), self);
            if self.hooks.is_none() {
                self.hooks = Some(hooks);
            }
        }
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) {
        if !self.enabled {
            return;
        }

        if !self.initialized {
            self.call_hooks(|hooks, me| hooks.init(me, frame));
            self.initialized = true;
        }

        self.call_hooks(|hooks, me| hooks.update(me, frame));

        self.prev_position = self.position;
        self.position.y -= self.velocity.y * frame.delta_time;
        self.position.x += self.velocity.x * frame.delta_time;
    }

    pub fn draw(&mut self, surface: &mut dyn RenderSurface) {
        if !self.enabled {
            return;
        }
        self.call_hooks(|hooks, me| hooks.draw(me, surface));
        if let Some(drawable) = &self.drawable {
            if drawable.enabled() {
                drawable.draw(self, surface);
            }
        }
    }

    /// Position marker plus the collider outline, red when `hit`.
    pub fn draw_debug(&self, surface: &mut dyn RenderSurface, hit: bool) {
        surface.stroke_circle(self.position, DEBUG_MARKER_RADIUS, Color::BLACK);
        if self.collider.enabled() {
            self.collider.draw_debug(surface, self.position, hit);
        }
    }

    pub fn notify_overlap(&mut self, other: &mut Entity, state: &mut EngineState) {
        self.call_hooks(|hooks, me| hooks.on_overlap(me, other, state));
    }

    pub fn snapshot(&self) -> EntitySnapshot {
        let mut tags: Vec<String> = self.tags.iter().cloned().collect();
        tags.sort();
        EntitySnapshot {
            id: self.id,
            name: self.name.clone(),
            position: self.position,
            velocity: self.velocity,
            bounding_box: self.collider.enabled().then(|| self.bounding_box()),
            tags,
            enabled: self.enabled,
            is_static: self.is_static,
        }
    }
}

/// Serializable view of an entity, used for state dumps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    pub position: Vector,
    pub velocity: Vector,
    pub bounding_box: Option<BoundingBox>,
    pub tags: Vec<String>,
    pub enabled: bool,
    pub is_static: bool,
}
