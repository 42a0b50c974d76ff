//! Back-to-front draw list for one frame
//!
//! Rendering happens in two halves:
//!
//! - `build_draw_list()` turns simulation state into an ordered list of
//!   `DrawCommand`s. It is pure math (no SDL), so draw order and background
//!   scaling are unit-tested.
//! - `render_draw_list()` submits that list to an SDL2 canvas.
//!
//! # Coordinate spaces
//!
//! The simulation is y-up with the origin at the bottom-left (ground level is
//! a small positive y). SDL2 is y-down with the origin at the top-left, so
//! every rect is flipped here: `screen_y = viewport_height - world_y - height`.
//!
//! # Draw order
//!
//! No depth sorting is needed: background, then player, then every fly.

use crate::animation::LoopingAnimation;
use crate::config::BackgroundFit;
use crate::game::{Game, Viewport};
use crate::sprite::SpriteSheet;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// Screen-space rectangle (y-down, pixels, float until submission)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DrawRect {
    /// Flip a y-up world rect into y-down screen space
    pub fn from_world(x: f32, y: f32, width: f32, height: f32, viewport: Viewport) -> Self {
        DrawRect {
            x,
            y: viewport.height - y - height,
            width,
            height,
        }
    }

    pub fn to_sdl(&self) -> Rect {
        Rect::new(
            self.x.round() as i32,
            self.y.round() as i32,
            self.width.round().max(1.0) as u32,
            self.height.round().max(1.0) as u32,
        )
    }
}

/// What a draw command samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    Background,
    Player { frame: usize },
    Fly { frame: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub source: DrawSource,
    pub rect: DrawRect,
}

/// Sizes and frame cycles of the loaded sprites
///
/// The simulation never sees textures; this is everything about them the
/// draw list needs.
#[derive(Debug, Clone, Copy)]
pub struct SceneSprites {
    pub background_size: (u32, u32),
    pub player_frame_size: (u32, u32),
    pub player_animation: LoopingAnimation,
    /// `None` when the variant has no flies (no fly texture loaded)
    pub fly_animation: Option<LoopingAnimation>,
}

/// Size of the background for the given fit, anchored at the world origin
///
/// `Cover` scales so the whole viewport is covered while keeping the image's
/// aspect ratio; whichever dimension overshoots is cropped off the top or
/// right edge.
pub fn background_size(fit: BackgroundFit, image: (u32, u32), viewport: Viewport) -> (f32, f32) {
    let (image_width, image_height) = (image.0 as f32, image.1 as f32);

    match fit {
        BackgroundFit::Native => (image_width, image_height),
        BackgroundFit::Cover => {
            let image_ratio = image_width / image_height;
            if viewport.aspect_ratio() > image_ratio {
                (viewport.width, viewport.width / image_ratio)
            } else {
                (viewport.height * image_ratio, viewport.height)
            }
        }
    }
}

/// Build this frame's ordered draw commands
pub fn build_draw_list(game: &Game, sprites: &SceneSprites, viewport: Viewport) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(2 + game.flies.len());

    let (background_width, background_height) =
        background_size(game.config().background_fit, sprites.background_size, viewport);
    commands.push(DrawCommand {
        source: DrawSource::Background,
        rect: DrawRect::from_world(0.0, 0.0, background_width, background_height, viewport),
    });

    let scale = game.config().player_scale as f32;
    let (frame_width, frame_height) = sprites.player_frame_size;
    commands.push(DrawCommand {
        source: DrawSource::Player {
            frame: game.player_frame(&sprites.player_animation),
        },
        rect: DrawRect::from_world(
            game.player.x,
            game.player.y,
            frame_width as f32 * scale,
            frame_height as f32 * scale,
            viewport,
        ),
    });

    if let Some(fly_animation) = &sprites.fly_animation {
        let frame = game.fly_frame(fly_animation);
        for fly in game.flies.flies() {
            commands.push(DrawCommand {
                source: DrawSource::Fly { frame },
                rect: DrawRect::from_world(fly.x, fly.y, fly.size, fly.size, viewport),
            });
        }
    }

    commands
}

/// The textures a draw list refers to
pub struct SceneTextures<'a> {
    pub background: &'a Texture<'a>,
    pub player: &'a SpriteSheet<'a>,
    pub fly: Option<&'a SpriteSheet<'a>>,
}

/// Submit a draw list to the canvas in order
///
/// The caller owns the begin/end scope (`canvas.clear()` before,
/// `canvas.present()` after).
pub fn render_draw_list(
    canvas: &mut Canvas<Window>,
    commands: &[DrawCommand],
    textures: &SceneTextures,
) -> Result<(), String> {
    for command in commands {
        let dest_rect = command.rect.to_sdl();
        match command.source {
            DrawSource::Background => canvas.copy(textures.background, None, Some(dest_rect))?,
            DrawSource::Player { frame } => textures.player.render_frame(canvas, frame, dest_rect)?,
            DrawSource::Fly { frame } => {
                if let Some(fly_sheet) = textures.fly {
                    fly_sheet.render_frame(canvas, frame, dest_rect)?;
                }
            }
        }
    }

    Ok(())
}
