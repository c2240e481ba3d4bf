//! flapengine demo entry point.
//!
//! Runs the Flappy demo on top of the engine. The default build is headless:
//! frames are rendered to a null surface and an autopilot plays the game,
//! which makes the binary usable as a smoke test and a benchmark. With the
//! `window` feature, `--window` opens a raylib window instead.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 1200 --seed 7 --dump-state
//! RUST_LOG=debug cargo run -- --config config.ini
//! cargo run --release --features window -- --window
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info, warn};
use serde::Serialize;

use flapengine::entity::EntitySnapshot;
use flapengine::events::collision::CollisionEvent;
use flapengine::game::{self, FlappyGame, GameSounds, Scoreboard};
use flapengine::resources::audio::{setup_audio, shutdown_audio};
use flapengine::resources::engineconfig::{ConfigError, EngineConfig};
use flapengine::resources::surface::NullSurface;
use flapengine::runner::GameLoop;
use flapengine::systems::audio::drain_audio_messages;

/// Tiny 2D frame loop and collision engine, driving a Flappy demo.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// INI configuration file. Without it, ./config.ini is used when present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Frames to simulate in headless mode.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seed for pipe placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with debug drawing on.
    #[arg(long)]
    debug: bool,

    /// Skip the draw pass.
    #[arg(long)]
    no_draw: bool,

    /// Print the final engine state as JSON.
    #[arg(long)]
    dump_state: bool,

    /// Pace frames with the wall clock instead of stepping a manual clock.
    #[arg(long)]
    realtime: bool,

    /// Open an interactive window.
    #[cfg(feature = "window")]
    #[arg(long)]
    window: bool,
}

#[derive(Serialize)]
struct StateDump<'a> {
    frame: u64,
    scoreboard: Scoreboard,
    entities: Vec<EntitySnapshot>,
    collisions: &'a [CollisionEvent],
}

fn load_config(cli: &Cli) -> Result<EngineConfig, ConfigError> {
    let mut config = game::default_config();
    match &cli.config {
        Some(path) => {
            config.config_path = path.clone();
            config.load_from_file()?;
        }
        None if config.config_path.exists() => {
            if let Err(e) = config.load_from_file() {
                warn!("Ignoring {}: {e}", config.config_path.display());
            }
        }
        None => debug!("No config file, using defaults"),
    }
    config.debug |= cli.debug;
    Ok(config)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));

    #[cfg(feature = "window")]
    if cli.window {
        window::run(config, seed, cli.no_draw);
        return ExitCode::SUCCESS;
    }

    run_headless(&cli, config, seed)
}

fn run_headless(cli: &Cli, config: EngineConfig, seed: u64) -> ExitCode {
    let mut game_loop = if cli.realtime {
        GameLoop::realtime(config)
    } else {
        GameLoop::stepped(config)
    }
    .with_max_frames(cli.frames);
    game_loop.engine_mut().state_mut().disable_drawing = cli.no_draw;

    let bridge = setup_audio();
    let mut game = FlappyGame::setup(game_loop.engine_mut(), seed, GameSounds::load(&bridge));

    let canvas = game_loop.engine().state().canvas;
    let mut surface = NullSurface::new(canvas.width, canvas.height);
    let exit = game_loop.run(&mut surface, |engine| {
        game.autopilot(engine);
        drain_audio_messages(&bridge.rx_msg);
    });

    let board = game.scoreboard();
    info!(
        "Stopped after {} frame(s) ({:?}): score {}, high score {}, {} death(s)",
        game_loop.frames_run(),
        exit,
        board.score,
        board.high_score,
        board.deaths
    );

    let mut status = ExitCode::SUCCESS;
    if cli.dump_state {
        let engine = game_loop.engine();
        let dump = StateDump {
            frame: engine.frame_number(),
            scoreboard: board,
            entities: engine.snapshot(),
            collisions: engine.collisions(),
        };
        match serde_json::to_string_pretty(&dump) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize state: {e}");
                status = ExitCode::FAILURE;
            }
        }
    }

    debug!("{} audio message(s) pending at exit", drain_audio_messages(&bridge.rx_msg));
    shutdown_audio(bridge);
    status
}

#[cfg(feature = "window")]
mod window {
    use log::{info, warn};

    use flapengine::game::{FlappyGame, GameSounds, SPRITE_SHEETS};
    use flapengine::resources::audio::{setup_audio, shutdown_audio};
    use flapengine::resources::engineconfig::EngineConfig;
    use flapengine::runner::GameLoop;
    use flapengine::systems::audio::drain_audio_messages;
    use flapengine::systems::input::pressed_keys;
    use flapengine::systems::render::{RaylibSurface, TextureStore};

    pub fn run(config: EngineConfig, seed: u64, no_draw: bool) {
        let mut game_loop = GameLoop::realtime(config);
        let canvas = game_loop.engine().state().canvas;
        let target_fps = game_loop.engine().state().config.target_fps;
        game_loop.engine_mut().state_mut().disable_drawing = no_draw;

        let (mut rl, thread) = raylib::init()
            .size(canvas.width as i32, canvas.height as i32)
            .title("flapengine")
            .build();
        rl.set_target_fps(target_fps);

        let mut textures = TextureStore::default();
        for path in SPRITE_SHEETS {
            match rl.load_texture(&thread, path) {
                Ok(texture) => {
                    textures.insert(path.to_string(), texture);
                }
                Err(e) => warn!("Sprite sheet {path} not loaded: {e}"),
            }
        }

        let bridge = setup_audio();
        let mut game = FlappyGame::setup(game_loop.engine_mut(), seed, GameSounds::load(&bridge));

        while !rl.window_should_close() && !game_loop.engine().quit_requested() {
            for key in pressed_keys(&rl) {
                game.handle_key(game_loop.engine_mut(), key);
            }
            let mut d = rl.begin_drawing(&thread);
            let mut surface = RaylibSurface::new(&mut d, &textures, canvas.width, canvas.height);
            game_loop.step(&mut surface);
            drain_audio_messages(&bridge.rx_msg);
        }

        let board = game.scoreboard();
        info!("Window closed: high score {}", board.high_score);
        shutdown_audio(bridge);
    }
}
