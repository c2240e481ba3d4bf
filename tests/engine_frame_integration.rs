//! Frame driver integration tests: pass ordering, flags, lifecycle and the
//! falling-ball scenario, all driven through the public `Engine` API with a
//! manual clock.

use std::cell::RefCell;
use std::rc::Rc;

use flapengine::components::boxcollider::BoxCollider;
use flapengine::components::color::Color;
use flapengine::components::vector::Vector;
use flapengine::engine::Engine;
use flapengine::entity::{EntityId, HookSet};
use flapengine::resources::clock::ManualClock;
use flapengine::resources::engineconfig::EngineConfig;
use flapengine::resources::surface::{DrawCommand, NullSurface, RecordingSurface};

const FRAME_MS: f64 = 16.0;

type Log = Rc<RefCell<Vec<String>>>;

fn make_engine(config: EngineConfig) -> (Engine, ManualClock) {
    let clock = ManualClock::new();
    let engine = Engine::with_clock(config, clock.clone());
    (engine, clock)
}

fn step(engine: &mut Engine, clock: &ManualClock, surface: &mut RecordingSurface) {
    clock.advance(FRAME_MS);
    surface.take();
    engine.run_frame(surface);
}

/// Entity whose hooks append `<phase>:<label>` to `log`.
fn logging_hooks(label: &'static str, log: &Log) -> HookSet {
    let (l1, l2, l3, l4) = (log.clone(), log.clone(), log.clone(), log.clone());
    HookSet::default()
        .on_init(move |_, _| l1.borrow_mut().push(format!("init:{label}")))
        .on_update(move |_, _| l2.borrow_mut().push(format!("update:{label}")))
        .on_draw(move |_, _| l3.borrow_mut().push(format!("draw:{label}")))
        .on_overlap(move |_, other, _| {
            l4.borrow_mut().push(format!("overlap:{label}:{}", other.name))
        })
}

#[test]
fn falling_ball_hits_ground_on_the_same_frame_for_both() {
    let (mut engine, clock) = make_engine(EngineConfig::default().with_size(800.0, 600.0));
    let hits: Rc<RefCell<Vec<(EntityId, EntityId, u64)>>> = Rc::new(RefCell::new(Vec::new()));

    let record = |hits: &Rc<RefCell<Vec<(EntityId, EntityId, u64)>>>| {
        let hits = hits.clone();
        HookSet::default().on_overlap(move |me, other, state| {
            hits.borrow_mut().push((me.id, other.id, state.frame_number()))
        })
    };

    // Box spans x 0..800, y 590..600.
    let ground = engine
        .create_entity_with(record(&hits))
        .with_name("ground")
        .with_position(Vector::new(400.0, 595.0))
        .with_collider(BoxCollider::new(800.0, 10.0));
    let ground_id = engine.add_entity(ground).id;

    // Negative y velocity falls: 0.5 px/ms * 16 ms = 8 px per frame.
    let ball = engine
        .create_entity_with(record(&hits))
        .with_name("ball")
        .with_position(Vector::new(400.0, 100.0))
        .with_velocity(Vector::new(0.0, -0.5))
        .with_collider(BoxCollider::new(20.0, 20.0))
        .dynamic();
    let ball_id = engine.add_entity(ball).id;

    let mut surface = RecordingSurface::new(800.0, 600.0);
    for _ in 0..100 {
        step(&mut engine, &clock, &mut surface);
        if !hits.borrow().is_empty() {
            break;
        }
    }

    let hits = hits.borrow();
    // The ball's bottom edge reaches y = 590 after 60 frames; touching counts.
    assert_eq!(
        *hits,
        vec![(ball_id, ground_id, 60), (ground_id, ball_id, 60)]
    );
    assert!(engine.hit_entities().contains(&ball_id));
    assert!(engine.hit_entities().contains(&ground_id));
    assert_eq!(engine.collisions().len(), 1);
    assert_eq!(engine.collisions()[0].a, ball_id);
}

#[test]
fn passes_run_in_frame_order() {
    let (mut engine, clock) = make_engine(EngineConfig::default());
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let a = engine
        .create_entity_with(logging_hooks("a", &log))
        .with_name("a")
        .with_collider(BoxCollider::new(10.0, 10.0))
        .dynamic();
    let b = engine
        .create_entity_with(logging_hooks("b", &log))
        .with_name("b")
        .with_collider(BoxCollider::new(10.0, 10.0));
    engine.add_entity(a);
    engine.add_entity(b);

    let mut surface = RecordingSurface::new(100.0, 100.0);
    step(&mut engine, &clock, &mut surface);
    assert_eq!(
        *log.borrow(),
        vec![
            "init:a",
            "update:a",
            "init:b",
            "update:b",
            "draw:a",
            "draw:b",
            "overlap:a:b",
            "overlap:b:a",
        ]
    );
}

#[test]
fn debug_pass_draws_last_and_flags_hits() {
    let mut config = EngineConfig::default().with_background(Color::BLACK);
    config.debug = true;
    let (mut engine, clock) = make_engine(config);

    let a = engine
        .create_entity()
        .with_collider(BoxCollider::new(10.0, 10.0))
        .dynamic();
    let b = engine
        .create_entity()
        .with_position(Vector::new(5.0, 5.0))
        .with_collider(BoxCollider::new(10.0, 10.0));
    let far = engine
        .create_entity()
        .with_position(Vector::new(300.0, 300.0))
        .with_collider(BoxCollider::new(10.0, 10.0));
    engine.add_entity(a);
    engine.add_entity(b);
    engine.add_entity(far);

    let mut surface = RecordingSurface::new(800.0, 600.0);
    step(&mut engine, &clock, &mut surface);

    assert_eq!(surface.commands[0], DrawCommand::Clear);
    assert!(matches!(surface.commands[1], DrawCommand::FillRect(_, c) if c == Color::BLACK));
    assert_eq!(surface.stroked_rects(Color::RED).len(), 2);
    assert_eq!(surface.stroked_rects(Color::GREEN).len(), 1);
    assert!(matches!(
        surface.commands.last(),
        Some(DrawCommand::StrokeRect(..))
    ));
}

#[test]
fn pause_stops_simulation_but_not_drawing() {
    let (mut engine, clock) = make_engine(EngineConfig::default());
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mover = engine
        .create_entity_with(logging_hooks("m", &log))
        .with_velocity(Vector::new(1.0, 0.0))
        .with_collider(BoxCollider::new(10.0, 10.0))
        .dynamic();
    let wall = engine
        .create_entity()
        .with_collider(BoxCollider::new(100.0, 100.0));
    let mover_id = engine.add_entity(mover).id;
    engine.add_entity(wall);

    let mut surface = RecordingSurface::new(100.0, 100.0);
    step(&mut engine, &clock, &mut surface);
    let hit_before = engine.hit_entities().clone();
    assert!(hit_before.contains(&mover_id));

    engine.state_mut().paused = true;
    log.borrow_mut().clear();
    let x = engine.entity(mover_id).map(|e| e.position.x);
    step(&mut engine, &clock, &mut surface);

    assert_eq!(*log.borrow(), vec!["draw:m"]);
    assert_eq!(engine.entity(mover_id).map(|e| e.position.x), x);
    // The last sweep's results stay visible while paused.
    assert_eq!(*engine.hit_entities(), hit_before);
    assert_eq!(engine.frame_number(), 2);
}

#[test]
fn disable_drawing_keeps_simulating() {
    let (mut engine, clock) = make_engine(EngineConfig::default());
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let e = engine
        .create_entity_with(logging_hooks("e", &log))
        .with_velocity(Vector::new(0.0, 1.0));
    let id = engine.add_entity(e).id;
    engine.state_mut().disable_drawing = true;

    let mut surface = RecordingSurface::new(100.0, 100.0);
    step(&mut engine, &clock, &mut surface);

    assert_eq!(*log.borrow(), vec!["init:e", "update:e"]);
    assert_eq!(surface.commands, vec![DrawCommand::Clear]);
    assert_eq!(engine.entity(id).map(|e| e.position.y), Some(-16.0));
}

#[test]
fn init_fires_once_across_frames() {
    let (mut engine, clock) = make_engine(EngineConfig::default());
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let e = engine.create_entity_with(logging_hooks("e", &log));
    engine.add_entity(e);

    let mut surface = RecordingSurface::new(10.0, 10.0);
    for _ in 0..4 {
        step(&mut engine, &clock, &mut surface);
    }
    let log = log.borrow();
    assert_eq!(log.iter().filter(|l| l.starts_with("init")).count(), 1);
    assert_eq!(log.iter().filter(|l| l.starts_with("update")).count(), 4);
    assert_eq!(log[0], "init:e");
}

#[test]
fn disabling_excludes_from_next_frame_and_reenabling_restores() {
    let (mut engine, clock) = make_engine(EngineConfig::default());
    let a = engine
        .create_entity()
        .with_collider(BoxCollider::new(10.0, 10.0))
        .dynamic();
    let b = engine
        .create_entity()
        .with_collider(BoxCollider::new(10.0, 10.0));
    engine.add_entity(a);
    let b_id = engine.add_entity(b).id;

    let mut surface = RecordingSurface::new(10.0, 10.0);
    step(&mut engine, &clock, &mut surface);
    assert_eq!(engine.collisions().len(), 1);

    if let Some(b) = engine.entity_mut(b_id) {
        b.collider.set_enabled(false);
    }
    step(&mut engine, &clock, &mut surface);
    assert!(engine.collisions().is_empty());
    assert!(engine.hit_entities().is_empty());

    if let Some(b) = engine.entity_mut(b_id) {
        b.collider.set_enabled(true);
        b.enabled = false;
    }
    step(&mut engine, &clock, &mut surface);
    assert!(engine.collisions().is_empty());

    if let Some(b) = engine.entity_mut(b_id) {
        b.enabled = true;
    }
    step(&mut engine, &clock, &mut surface);
    assert_eq!(engine.collisions().len(), 1);
}

#[test]
fn entity_spawned_by_a_hook_joins_the_list() {
    let (mut engine, clock) = make_engine(EngineConfig::default());
    let spawner = engine.create_entity_with(HookSet::default().on_update(|_, frame| {
        if frame.frame_number == 1 {
            let child = frame
                .state
                .create_entity()
                .with_name("child")
                .with_velocity(Vector::new(1.0, 0.0));
            frame.state.spawn(child);
        }
    }));
    engine.add_entity(spawner);

    let mut surface = RecordingSurface::new(10.0, 10.0);
    step(&mut engine, &clock, &mut surface);
    let child = engine.entity_by_name("child").expect("spawned child");
    assert_eq!(child.position.x, 0.0);
    assert_eq!(child.id, EntityId(2));

    step(&mut engine, &clock, &mut surface);
    assert_eq!(engine.entity_by_name("child").map(|c| c.position.x), Some(16.0));
    assert_eq!(engine.entities().len(), 2);
}

#[test]
fn frame_delta_follows_the_injected_clock() {
    let (mut engine, clock) = make_engine(EngineConfig::default());
    let deltas = Rc::new(RefCell::new(Vec::new()));
    let d = deltas.clone();
    let e = engine.create_entity_with(
        HookSet::default().on_update(move |_, frame| d.borrow_mut().push(frame.delta_time)),
    );
    engine.add_entity(e);

    let mut surface = NullSurface::new(1.0, 1.0);
    for ms in [10.0, 20.0, 5.0] {
        clock.advance(ms);
        engine.run_frame(&mut surface);
    }
    assert_eq!(*deltas.borrow(), vec![10.0, 20.0, 5.0]);
}
