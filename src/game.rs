//! Flappy demo built on the public engine API.
//!
//! Entity list, in insertion order:
//!
//! - two scrolling background copies
//! - the bird (the only collision initiator)
//! - the ground, tagged `ground` and set up from its init hook
//! - five pipe pairs, each as top pipe, bottom pipe and an invisible manager
//!   that drags both pipes left, scores when it passes the bird and recycles
//!   the pair once it leaves the screen
//! - the score display
//!
//! Game-wide state (alive flag, score, high score, current sprite sheet) lives
//! in a [`Scoreboard`] shared between hooks and the host. Pipe gaps come from a
//! seeded `fastrand` generator so headless runs are reproducible.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use serde::Serialize;

use crate::components::boxcollider::BoxCollider;
use crate::components::color::Color;
use crate::components::sprite::{Drawable, Sprite, SpriteFrame};
use crate::components::vector::{BoundingBox, Vector};
use crate::engine::{Engine, EngineState};
use crate::entity::{Entity, EntityHooks, EntityId, Frame, HookSet};
use crate::resources::audio::{AudioBridge, Sound};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::ignorecollisions::IgnoreCollisions;
use crate::resources::surface::{RenderSurface, TextAlign};

/// Sprite sheets cycled through every ten points.
pub const SPRITE_SHEETS: [&str; 3] = [
    "./images/flappy-bird-set.png",
    "./images/flappy-bird-set-2.png",
    "./images/flappy-bird-set-3.png",
];

const BACKGROUND_SPEED: f32 = 6.2;
const GRAVITY: f32 = -0.001;
const FLAP_VELOCITY: f32 = 0.5;

const BIRD_WIDTH: f32 = 51.0;
const BIRD_HEIGHT: f32 = 36.0;
const BIRD_ANIMATION_FRAMES: u64 = 6;

const PIPE_SPEED: f32 = 0.3;
const PIPE_X_GAP: f32 = 400.0;
const PIPE_COUNT: usize = 5;
const PIPE_Y_RANGE: f32 = 400.0;
const PIPE_Y_GAP: f32 = 270.0;
const PIPE_Y_GAP_RANGE: f32 = 150.0;
const PIPE_WIDTH: f32 = 77.0;
const PIPE_HEIGHT: f32 = 479.0;

const GROUND_HEIGHT: f32 = 10.0;
const SCORE_FONT_SIZE: f32 = 50.0;
const SCORE_Y: f32 = 80.0;

/// Flap when the bird sinks this far below the gap center.
const AUTOPILOT_MARGIN: f32 = 50.0;

/// 9:16 portrait canvas, 800 pixels high, ground never colliding with pipes.
pub fn default_config() -> EngineConfig {
    EngineConfig::default()
        .with_size(450.0, 800.0)
        .with_aspect_ratio(9.0 / 16.0)
        .with_background(Color::rgb(0x4e, 0xc0, 0xca))
        .with_ignore_collisions(IgnoreCollisions::new().with("ground", ["Pipe"]))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub alive: bool,
    pub score: u32,
    pub high_score: u32,
    pub sheet_index: usize,
    /// Runs that ended on a hit.
    pub deaths: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            alive: true,
            score: 0,
            high_score: 0,
            sheet_index: 0,
            deaths: 0,
        }
    }
}

impl Scoreboard {
    pub fn sheet(&self) -> &'static str {
        SPRITE_SHEETS[self.sheet_index % SPRITE_SHEETS.len()]
    }

    pub fn next_sheet(&mut self) {
        self.sheet_index = (self.sheet_index + 1) % SPRITE_SHEETS.len();
    }

    fn point(&mut self) {
        self.score += 1;
        self.high_score = self.high_score.max(self.score);
        if self.score % 10 == 0 {
            self.next_sheet();
        }
    }
}

type SharedBoard = Rc<RefCell<Scoreboard>>;
type SharedRng = Rc<RefCell<fastrand::Rng>>;

/// Sound effects; any of them may be missing when running without audio.
#[derive(Debug, Clone, Default)]
pub struct GameSounds {
    pub point: Option<Sound>,
    pub hit: Option<Sound>,
    pub wing: Option<Sound>,
}

impl GameSounds {
    pub fn load(bridge: &AudioBridge) -> Self {
        Self {
            point: Some(bridge.load("point", "./audio/sfx_point.wav")),
            hit: Some(bridge.load("hit", "./audio/sfx_hit.wav")),
            wing: Some(bridge.load("wing", "./audio/sfx_wing.wav")),
        }
    }
}

/// Host input understood by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    /// Flap while alive, restart after a hit.
    Flap,
    Pause,
    Debug,
    /// Toggle drawing; turning it off switches debug on.
    ToggleDrawing,
    NextSheet,
}

/// Sheet-less sprite drawn from the scoreboard's current sheet.
struct ThemedSprite {
    sprite: Sprite,
    board: SharedBoard,
}

impl ThemedSprite {
    fn draw_at(&self, position: Vector, surface: &mut dyn RenderSurface) {
        if !self.sprite.enabled {
            return;
        }
        let sheet = self.board.borrow().sheet();
        if let Some(blit) = self.sprite.blit_on(sheet, position) {
            surface.draw_sprite(&blit);
        }
    }
}

impl Drawable for ThemedSprite {
    fn enabled(&self) -> bool {
        self.sprite.enabled
    }

    fn draw(&self, owner: &Entity, surface: &mut dyn RenderSurface) {
        self.draw_at(owner.position, surface);
    }
}

struct ScrollingBackground {
    second: bool,
}

impl EntityHooks for ScrollingBackground {
    fn kind(&self) -> &'static str {
        "Background"
    }

    fn update(&mut self, me: &mut Entity, frame: &mut Frame<'_>) {
        let width = frame.state.canvas.width;
        let scrolled = (frame.frame_number as f32 * (BACKGROUND_SPEED / 2.0)) % width;
        let start = if self.second { width * 2.0 - 1.0 } else { width };
        me.position.x = -scrolled + start - width / 2.0;
    }
}

struct Bird {
    look: ThemedSprite,
    hit: Option<Sound>,
}

impl EntityHooks for Bird {
    fn kind(&self) -> &'static str {
        "Bird"
    }

    fn update(&mut self, me: &mut Entity, frame: &mut Frame<'_>) {
        me.velocity.y += GRAVITY * frame.delta_time;

        let sprite = &mut self.look.sprite;
        sprite.rotation = (me.velocity.y.clamp(-0.5, 0.5) + 0.5) * 90.0 - 45.0;
        let frames = sprite.frames.len().max(1) as u64;
        sprite.sprite_index = ((frame.frame_number / BIRD_ANIMATION_FRAMES) % frames) as usize;

        let margin = me.bounding_box().height * 0.8;
        let floor = frame.state.canvas.height - margin;
        if me.position.y > floor {
            me.position.y = floor;
        }
        if me.position.y < margin {
            me.position.y = margin;
        }
    }

    fn draw(&mut self, me: &mut Entity, surface: &mut dyn RenderSurface) {
        self.look.draw_at(me.position, surface);
    }

    fn on_overlap(&mut self, me: &mut Entity, other: &mut Entity, state: &mut EngineState) {
        state.paused = true;
        let mut board = self.look.board.borrow_mut();
        if board.alive {
            board.deaths += 1;
            info!(
                "'{}' hit '{}' on frame {} with score {}",
                me.name,
                other.name,
                state.frame_number(),
                board.score
            );
        }
        board.alive = false;
        if let Some(sound) = &self.hit {
            sound.play();
        }
    }
}

/// Placement rules for pipe pair `index`.
#[derive(Debug, Clone, Copy)]
struct PipeLayout {
    center: Vector,
    index: usize,
}

impl PipeLayout {
    fn home_x(&self) -> f32 {
        self.center.x + PIPE_X_GAP + PIPE_X_GAP * self.index as f32
    }

    /// Distance a pair jumps right once it scrolled off the left edge.
    fn wrap_distance() -> f32 {
        (PIPE_X_GAP - 1.0) * PIPE_COUNT as f32
    }

    /// Random gap center and gap height.
    fn roll(&self, rng: &mut fastrand::Rng) -> (f32, f32) {
        let y = self.center.y + rng.f32() * PIPE_Y_RANGE - PIPE_Y_RANGE / 2.0;
        let gap = PIPE_Y_GAP + rng.f32() * PIPE_Y_GAP_RANGE - PIPE_Y_GAP_RANGE / 2.0;
        (y, gap)
    }
}

#[derive(Debug, Clone, Copy)]
struct PipePair {
    manager: EntityId,
    top: EntityId,
    bottom: EntityId,
    layout: PipeLayout,
}

struct PipeManager {
    pair: PipePair,
    bird: EntityId,
    board: SharedBoard,
    rng: SharedRng,
    point: Option<Sound>,
}

impl EntityHooks for PipeManager {
    fn kind(&self) -> &'static str {
        "PipeManager"
    }

    fn update(&mut self, me: &mut Entity, frame: &mut Frame<'_>) {
        if let Some(bird) = frame.others.get(self.bird) {
            if me.position.x <= bird.position.x && me.prev_position.x > bird.prev_position.x {
                let mut board = self.board.borrow_mut();
                board.point();
                debug!("{} passed, score {}", me.name, board.score);
                if let Some(sound) = &self.point {
                    sound.play();
                }
            }
        }

        // Pipes follow the position this manager will have after integration.
        let mut next_x = me.position.x + me.velocity.x * frame.delta_time;
        let mut rolled = None;
        if next_x + PIPE_WIDTH / 2.0 <= 0.0 {
            let (y, gap) = self.pair.layout.roll(&mut self.rng.borrow_mut());
            me.position.x += PipeLayout::wrap_distance();
            me.position.y = y;
            next_x += PipeLayout::wrap_distance();
            rolled = Some((y, gap));
        }

        for (id, side) in [(self.pair.top, -1.0), (self.pair.bottom, 1.0)] {
            if let Some(pipe) = frame.others.get_mut(id) {
                pipe.position.x = next_x;
                if let Some((y, gap)) = rolled {
                    pipe.position.y = y + side * gap / 2.0;
                }
            }
        }
    }
}

pub struct FlappyGame {
    board: SharedBoard,
    rng: SharedRng,
    sounds: GameSounds,
    bird: EntityId,
    pipes: Vec<PipePair>,
}

impl FlappyGame {
    /// Populate `engine` with the demo entities and start a fresh run.
    pub fn setup(engine: &mut Engine, seed: u64, sounds: GameSounds) -> Self {
        let board: SharedBoard = Rc::new(RefCell::new(Scoreboard::default()));
        let rng: SharedRng = Rc::new(RefCell::new(fastrand::Rng::with_seed(seed)));
        let canvas = engine.state().canvas;
        let center = engine.get_center();
        let themed = |sprite: Sprite| ThemedSprite {
            sprite,
            board: board.clone(),
        };

        let background = Sprite::from_frames(vec![SpriteFrame {
            source: BoundingBox::new(0.0, 0.0, 432.0, 768.0),
            width: canvas.width,
            height: canvas.height,
        }]);
        for second in [false, true] {
            let mut entity = engine
                .create_entity_with(ScrollingBackground { second })
                .with_position(center)
                .with_drawable(themed(background.clone()));
            if second {
                entity.name = "bg2".into();
                entity.position.x += canvas.width;
            }
            engine.add_entity(entity);
        }

        let bird_frames = (0..3)
            .map(|i| {
                SpriteFrame::from_source(BoundingBox::new(
                    433.0,
                    BIRD_HEIGHT * i as f32,
                    BIRD_WIDTH,
                    BIRD_HEIGHT,
                ))
            })
            .collect();
        let bird = engine
            .create_entity_with(Bird {
                look: themed(Sprite::from_frames(bird_frames)),
                hit: sounds.hit.clone(),
            })
            .with_name("Bird")
            .with_collider(BoxCollider::new(BIRD_WIDTH * 0.8, BIRD_HEIGHT * 0.8))
            .dynamic();
        let bird_id = engine.add_entity(bird).id;

        let ground = engine.create_entity_with(HookSet::default().on_init(|me, frame| {
            let canvas = frame.state.canvas;
            me.name = "ground".into();
            me.add_tag("ground");
            me.position = frame.state.get_center();
            me.position.y = canvas.height - GROUND_HEIGHT;
            me.set_collider(BoxCollider::new(canvas.width, GROUND_HEIGHT));
        }));
        engine.add_entity(ground);

        let mut pipes = Vec::with_capacity(PIPE_COUNT);
        for index in 0..PIPE_COUNT {
            let layout = PipeLayout { center, index };
            let top = engine.state_mut().next_id();
            engine.add_entity(pipe(top, 0.0, index, &themed));
            let bottom = engine.state_mut().next_id();
            engine.add_entity(pipe(bottom, 180.0, index, &themed));
            let manager_id = engine.state_mut().next_id();
            let pair = PipePair {
                manager: manager_id,
                top,
                bottom,
                layout,
            };
            let manager = Entity::with_hooks(
                manager_id,
                PipeManager {
                    pair,
                    bird: bird_id,
                    board: board.clone(),
                    rng: rng.clone(),
                    point: sounds.point.clone(),
                },
            )
            .with_name(format!("Pipe Manager {}", index + 1))
            .with_velocity(Vector::new(-PIPE_SPEED, 0.0));
            engine.add_entity(manager);
            pipes.push(pair);
        }

        let score_board = board.clone();
        let score = engine.create_entity_with(
            HookSet::default()
                .on_init(|me, frame| {
                    me.name = "Score Manager".into();
                    me.position = frame.state.get_center();
                    me.position.y = SCORE_Y;
                })
                .on_draw(move |me, surface| {
                    let board = score_board.borrow();
                    surface.draw_text(
                        &board.score.to_string(),
                        me.position,
                        SCORE_FONT_SIZE,
                        TextAlign::Center,
                        Color::WHITE,
                    );
                    surface.draw_text(
                        &format!("High: {}", board.high_score),
                        Vector::new(canvas.width - 10.0, SCORE_Y),
                        SCORE_FONT_SIZE,
                        TextAlign::End,
                        Color::WHITE,
                    );
                }),
        );
        engine.add_entity(score);

        info!(
            "Flappy demo ready: {} entities, seed {}",
            engine.entities().len(),
            seed
        );

        let mut game = Self {
            board,
            rng,
            sounds,
            bird: bird_id,
            pipes,
        };
        game.reset(engine);
        game
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.board.borrow().clone()
    }

    pub fn bird(&self) -> EntityId {
        self.bird
    }

    pub fn pipe_managers(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.pipes.iter().map(|p| p.manager)
    }

    /// Start a new run: score cleared, bird recentered, pipes re-rolled,
    /// engine unpaused.
    pub fn reset(&mut self, engine: &mut Engine) {
        {
            let mut board = self.board.borrow_mut();
            board.sheet_index = 0;
            board.score = 0;
            board.alive = true;
        }

        let center = engine.get_center();
        let quarter = engine.state().canvas.width / 4.0;
        if let Some(bird) = engine.entity_mut(self.bird) {
            bird.position = Vector::new(quarter, center.y);
            bird.velocity.y = 0.0;
        }

        for pair in &self.pipes {
            let (y, gap) = pair.layout.roll(&mut self.rng.borrow_mut());
            let x = pair.layout.home_x();
            for (id, y) in [
                (pair.manager, y),
                (pair.top, y - gap / 2.0),
                (pair.bottom, y + gap / 2.0),
            ] {
                if let Some(entity) = engine.entity_mut(id) {
                    entity.position = Vector::new(x, y);
                }
            }
        }

        engine.state_mut().paused = false;
        debug!("Run reset on frame {}", engine.frame_number());
    }

    pub fn flap(&mut self, engine: &mut Engine) {
        if let Some(bird) = engine.entity_mut(self.bird) {
            bird.velocity.y = FLAP_VELOCITY;
        }
        if let Some(sound) = &self.sounds.wing {
            sound.play_from_beginning();
        }
    }

    pub fn handle_key(&mut self, engine: &mut Engine, key: GameKey) {
        match key {
            GameKey::Flap => {
                if self.board.borrow().alive {
                    self.flap(engine);
                } else {
                    self.reset(engine);
                }
            }
            GameKey::Pause => {
                let state = engine.state_mut();
                state.paused = !state.paused;
            }
            GameKey::Debug => {
                let state = engine.state_mut();
                state.debug = !state.debug;
            }
            GameKey::ToggleDrawing => {
                let state = engine.state_mut();
                state.disable_drawing = !state.disable_drawing;
                if state.disable_drawing {
                    state.debug = true;
                }
            }
            GameKey::NextSheet => self.board.borrow_mut().next_sheet(),
        }
    }

    /// Headless player: flap whenever the bird sinks below the next gap,
    /// restart after a hit.
    pub fn autopilot(&mut self, engine: &mut Engine) {
        if !self.board.borrow().alive {
            self.reset(engine);
            return;
        }
        let Some(bird) = engine.entity(self.bird) else {
            return;
        };
        let (bird_x, bird_y, falling) = (bird.position.x, bird.position.y, bird.velocity.y <= 0.0);

        let reach = PIPE_WIDTH / 2.0 + BIRD_WIDTH / 2.0;
        let target = self
            .pipes
            .iter()
            .filter_map(|pair| engine.entity(pair.manager))
            .filter(|manager| manager.position.x + reach >= bird_x)
            .min_by(|a, b| a.position.x.total_cmp(&b.position.x))
            .map_or(engine.get_center().y, |manager| manager.position.y);

        if falling && bird_y > target + AUTOPILOT_MARGIN {
            self.flap(engine);
        }
    }
}

/// Pipe sprite hanging up (`rotation == 0`) or standing down from its
/// position, with a matching collider.
fn pipe(
    id: EntityId,
    rotation: f32,
    index: usize,
    themed: &impl Fn(Sprite) -> ThemedSprite,
) -> Entity {
    let mut sprite = Sprite::from_frames(vec![SpriteFrame::from_source(BoundingBox::new(
        433.0,
        109.0,
        PIPE_WIDTH,
        PIPE_HEIGHT,
    ))]);
    let up = rotation == 0.0;
    sprite.rotation = rotation;
    sprite.offset.y = PIPE_HEIGHT / 2.0 * if up { -1.0 } else { 1.0 };
    let offset = sprite.offset;
    let side = if up { "Top" } else { "Bottom" };

    Entity::with_hooks(id, HookSet::new("Pipe"))
        .with_name(format!("Pipe {} {}", side, index + 1))
        .with_collider(BoxCollider::new(PIPE_WIDTH, PIPE_HEIGHT).with_offset(offset))
        .with_drawable(themed(sprite))
}
