//! The engine: entity list, shared state and the per-frame driver.
//!
//! [`Engine`] owns the ordered entity list, the only place entities live.
//! Every pass (update, draw, collision, debug) walks it in insertion order.
//! [`EngineState`] is the part of the engine that hooks may touch while the
//! list itself is borrowed: flags, canvas, configuration, id allocation and
//! the spawn queue.
//!
//! # Frame order
//!
//! One call to [`Engine::run_frame`]:
//!
//! 1. advance the frame counter and compute the frame delta
//! 2. clear the surface and paint the background
//! 3. update pass (skipped while paused)
//! 4. draw pass (skipped while drawing is disabled)
//! 5. collision sweep (skipped while paused)
//! 6. debug pass (only in debug mode)
//! 7. record the frame timestamp
//!
//! The engine never schedules itself; a host (see
//! [`GameLoop`](crate::runner::GameLoop)) calls `run_frame` once per displayed
//! frame.

use log::{debug, info, trace};
use rustc_hash::FxHashSet;

use crate::components::vector::Vector;
use crate::entity::{Entity, EntityHooks, EntityId};
use crate::events::collision::CollisionEvent;
use crate::resources::canvas::Canvas;
use crate::resources::clock::{SystemClock, TimeSource};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::idgen::IdGenerator;
use crate::resources::surface::RenderSurface;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::collision_sweep;
use crate::systems::draw::{background_pass, debug_pass, draw_pass};
use crate::systems::update::update_pass;

/// Engine state reachable from hooks.
///
/// The flags are plain fields so input handlers and hooks can flip them
/// directly.
#[derive(Debug)]
pub struct EngineState {
    /// Suspends update and collision; drawing continues.
    pub paused: bool,
    /// Draw collider outlines and position markers after each frame.
    pub debug: bool,
    /// Suspends the draw pass; simulation continues.
    pub disable_drawing: bool,
    pub canvas: Canvas,
    pub config: EngineConfig,
    ids: IdGenerator,
    spawned: Vec<Entity>,
    quit: bool,
    time: WorldTime,
}

impl EngineState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            paused: false,
            debug: config.debug,
            disable_drawing: false,
            canvas: Canvas::from_config(&config),
            config,
            ids: IdGenerator::new(),
            spawned: Vec::new(),
            quit: false,
            time: WorldTime::default(),
        }
    }

    /// Number of the current frame; 0 before the first frame.
    pub fn frame_number(&self) -> u64 {
        self.time.frame_count
    }

    pub fn time(&self) -> &WorldTime {
        &self.time
    }

    /// Scale applied to frame deltas from the next frame on.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time.time_scale = time_scale;
    }

    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    /// A fresh entity with the next id. It is not part of the engine until
    /// passed to [`spawn`](Self::spawn) or [`Engine::add_entity`].
    pub fn create_entity(&mut self) -> Entity {
        Entity::new(self.next_id())
    }

    pub fn create_entity_with(&mut self, hooks: impl EntityHooks + 'static) -> Entity {
        Entity::with_hooks(self.next_id(), hooks)
    }

    /// Queue `entity` for appending to the entity list.
    ///
    /// Called from a hook, the entity lands in the list as soon as that hook
    /// returns.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        trace!("Spawn queued for '{}' ({})", entity.name, id);
        self.spawned.push(entity);
        id
    }

    /// Drain the spawn queue.
    pub fn take_spawned(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.spawned)
    }

    /// Ask the host loop to stop after the current frame.
    pub fn request_quit(&mut self) {
        if !self.quit {
            info!("Quit requested on frame {}", self.frame_number());
        }
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Half the canvas size.
    pub fn get_center(&self) -> Vector {
        self.canvas.center()
    }
}

pub struct Engine {
    entities: Vec<Entity>,
    state: EngineState,
    clock: Box<dyn TimeSource>,
    last_frame_time: f64,
    hit: FxHashSet<EntityId>,
    collisions: Vec<CollisionEvent>,
}

impl Engine {
    /// Engine driven by the wall clock.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }

    /// Engine driven by `clock`. The first frame's delta is measured from
    /// this call.
    pub fn with_clock(config: EngineConfig, clock: impl TimeSource + 'static) -> Self {
        let mut clock: Box<dyn TimeSource> = Box::new(clock);
        let last_frame_time = clock.now_ms();
        let state = EngineState::new(config);
        info!(
            "Engine created: canvas {}x{}, debug={}",
            state.canvas.width, state.canvas.height, state.debug
        );
        Self {
            entities: Vec::new(),
            state,
            clock,
            last_frame_time,
            hit: FxHashSet::default(),
            collisions: Vec::new(),
        }
    }

    /// Append `entity` to the list and hand it back for further setup.
    pub fn add_entity(&mut self, entity: Entity) -> &mut Entity {
        debug!("Adding entity '{}' ({})", entity.name, entity.id);
        let index = self.entities.len();
        self.entities.push(entity);
        &mut self.entities[index]
    }

    /// A fresh entity with the engine's next id; see [`EngineState::create_entity`].
    pub fn create_entity(&mut self) -> Entity {
        self.state.create_entity()
    }

    pub fn create_entity_with(&mut self, hooks: impl EntityHooks + 'static) -> Entity {
        self.state.create_entity_with(hooks)
    }

    pub fn get_center(&self) -> Vector {
        self.state.get_center()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EngineState {
        &mut self.state
    }

    pub fn paused(&self) -> bool {
        self.state.paused
    }

    pub fn frame_number(&self) -> u64 {
        self.state.frame_number()
    }

    /// Entities that overlapped something during the last sweep. Kept as is
    /// while paused.
    pub fn hit_entities(&self) -> &FxHashSet<EntityId> {
        &self.hit
    }

    /// Pairs notified during the last sweep, in notification order.
    pub fn collisions(&self) -> &[CollisionEvent] {
        &self.collisions
    }

    pub fn request_quit(&mut self) {
        self.state.request_quit();
    }

    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested()
    }

    /// Run one frame against `surface`.
    pub fn run_frame(&mut self, surface: &mut dyn RenderSurface) {
        let now = self.clock.now_ms();
        self.state.time.begin_frame(now - self.last_frame_time);
        let delta_time = self.state.time.delta;
        trace!(
            "Frame {} begins: dt={:.3}ms, {} entities",
            self.state.frame_number(),
            delta_time,
            self.entities.len()
        );

        background_pass(surface, &self.state.canvas, self.state.config.background_color);

        if !self.state.paused {
            update_pass(&mut self.entities, &mut self.state, delta_time);
        }

        if !self.state.disable_drawing {
            draw_pass(&mut self.entities, surface);
        }

        if !self.state.paused {
            let sweep = collision_sweep(&mut self.entities, &mut self.state);
            self.hit = sweep.hit;
            self.collisions = sweep.events;
        }

        if self.state.debug {
            debug_pass(&self.entities, &self.hit, surface);
        }

        self.last_frame_time = self.clock.now_ms();
    }

    /// Serializable snapshot of every entity, in list order.
    pub fn snapshot(&self) -> Vec<crate::entity::EntitySnapshot> {
        self.entities.iter().map(Entity::snapshot).collect()
    }
}
