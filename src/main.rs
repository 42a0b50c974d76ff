use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use std::path::Path;
use std::time::{Duration, Instant};

mod animation;
mod config;
mod error;
mod fly;
mod game;
mod input_system;
mod player;
mod render;
mod sprite;

use animation::AnimationConfig;
use config::{ConfigSource, GameConfig};
use error::GameError;
use game::{Game, Viewport};
use input_system::{FrameInput, GameAction, InputLevels, InputSampler};
use render::{SceneSprites, SceneTextures, build_draw_list, render_draw_list};
use sprite::SpriteSheet;

/// Longest frame the simulation will integrate in one step.
/// Dragging the window or a debugger pause would otherwise teleport flies.
const MAX_FRAME_DELTA: f32 = 0.25;

/// Generic texture loading helper
///
/// Loads a texture from the given path with consistent error handling
fn load_texture<'a>(
    texture_creator: &'a sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    path: &str,
) -> Result<sdl2::render::Texture<'a>, GameError> {
    log::info!("Loading texture {}", path);
    texture_creator
        .load_texture(path)
        .map_err(|message| GameError::Asset {
            path: path.to_string(),
            message,
        })
}

/// Frame layout for a texture: the JSON sheet if one is configured,
/// otherwise the whole texture as a single frame
fn load_sheet_config(
    texture: &sdl2::render::Texture,
    sheet_path: Option<&str>,
) -> Result<AnimationConfig, GameError> {
    match sheet_path {
        Some(path) => Ok(AnimationConfig::load_from_file(Path::new(path))?),
        None => {
            let query = texture.query();
            Ok(AnimationConfig::single_frame(query.width, query.height))
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, source) = GameConfig::load().map_err(GameError::from)?;
    match &source {
        ConfigSource::Env(path) | ConfigSource::UserDir(path) => {
            log::info!("Using config {}", path.display())
        }
        ConfigSource::Builtin => log::info!("Using built-in {:?} config", config.variant),
    }
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);
    if config.flies_enabled {
        log::info!(
            "Fly spawn chance: {:.1}% per frame",
            config.spawn.probability() * 100.0
        );
    }

    let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
    let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG).map_err(GameError::Sdl)?;

    let window = video_subsystem
        .window(&config.window.title, config.window.width, config.window.height)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| GameError::Sdl(e.to_string()))?;

    let mut canvas = window
        .into_canvas()
        .accelerated()
        .build()
        .map_err(|e| GameError::Sdl(e.to_string()))?;
    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

    // Every texture borrows `texture_creator`, so all of them are dropped
    // (and freed by SDL) when main returns, whichever way it returns.
    let assets = &config.assets;
    let background_texture = load_texture(&texture_creator, &assets.background)?;
    let player_texture = load_texture(&texture_creator, &assets.player_texture)?;
    let fly_texture = if config.flies_enabled {
        Some(load_texture(&texture_creator, &assets.fly_texture)?)
    } else {
        None
    };

    let player_sheet_config = load_sheet_config(&player_texture, assets.player_sheet.as_deref())?;
    let fly_sheet_config = fly_texture
        .as_ref()
        .map(|texture| load_sheet_config(texture, assets.fly_sheet.as_deref()))
        .transpose()?;

    let player_sheet = SpriteSheet::from_config(&player_texture, &player_sheet_config);
    let fly_sheet = fly_texture
        .as_ref()
        .zip(fly_sheet_config.as_ref())
        .map(|(texture, sheet_config)| SpriteSheet::from_config(texture, sheet_config));

    let background_query = background_texture.query();
    let sprites = SceneSprites {
        background_size: (background_query.width, background_query.height),
        player_frame_size: (player_sheet_config.frame_width, player_sheet_config.frame_height),
        player_animation: player_sheet_config.looping(config.frame_duration),
        fly_animation: fly_sheet_config
            .as_ref()
            .map(|sheet_config| sheet_config.looping(config.frame_duration)),
    };
    let textures = SceneTextures {
        background: &background_texture,
        player: &player_sheet,
        fly: fly_sheet.as_ref(),
    };

    log::info!(
        "Player sheet: {} frames, fly sheet: {} frames",
        player_sheet.frame_count(),
        fly_sheet.as_ref().map_or(0, |sheet| sheet.frame_count())
    );

    let (width, height) = canvas.output_size()?;
    let mut game = Game::new(config, Viewport::from_pixels(width, height), seed);
    let mut input_sampler = InputSampler::new();

    println!("Controls:");
    println!("Left/Right or A/D - Move");
    println!("Space/Up/W - Jump");
    if game.config().attack_enabled {
        println!("Mouse button - Attack");
    }
    println!("ESC - Quit");

    let mut last_frame = Instant::now();
    let mut has_focus = true;

    'running: loop {
        for action in input_system::poll_actions(&mut event_pump) {
            match action {
                GameAction::Quit => break 'running,
                GameAction::FocusLost => has_focus = false,
                GameAction::FocusGained => has_focus = true,
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f32().min(MAX_FRAME_DELTA);
        last_frame = now;

        let (width, height) = canvas.output_size()?;
        let viewport = Viewport::from_pixels(width, height);

        let levels = InputLevels::from_sdl(&event_pump.keyboard_state(), &event_pump.mouse_state());
        // Keep sampling so the jump edge stays in sync, but act on nothing
        // while another window has the keyboard
        let sampled = input_sampler.sample(levels);
        let input = if has_focus { sampled } else { FrameInput::idle() };

        game.step(delta, &input, viewport);

        canvas.set_draw_color(Color::RGB(38, 38, 51));
        canvas.clear();
        let commands = build_draw_list(&game, &sprites, viewport);
        render_draw_list(&mut canvas, &commands, &textures)?;
        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }

    let summary = game.shutdown();
    log::info!(
        "Session over: {} frames in {:.1}s, {} jumps, {} flies spawned ({} flew off screen), seed {}",
        summary.frames,
        summary.simulated_seconds,
        summary.jumps,
        summary.flies_spawned,
        summary.flies_culled,
        summary.seed
    );

    Ok(())
}
