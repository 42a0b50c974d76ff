use crate::animation::AnimationConfig;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// Source rectangle of one animation frame inside a texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Frame {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A texture plus the ordered list of frames cut out of it
///
/// The sheet holds no timing state: which frame to draw is decided by the
/// simulation (see `LoopingAnimation`) and passed in at render time.
pub struct SpriteSheet<'a> {
    texture: &'a Texture<'a>,
    frames: Vec<Frame>,
}

impl<'a> SpriteSheet<'a> {
    pub fn new(texture: &'a Texture<'a>, frames: Vec<Frame>) -> Self {
        SpriteSheet { texture, frames }
    }

    pub fn from_config(texture: &'a Texture<'a>, config: &AnimationConfig) -> Self {
        SpriteSheet::new(texture, config.create_frames())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Draw frame `index` stretched into `dest_rect`
    ///
    /// An out-of-range index is a logic error upstream and panics on the
    /// slice access rather than silently drawing the wrong frame.
    pub fn render_frame(
        &self,
        canvas: &mut Canvas<Window>,
        index: usize,
        dest_rect: Rect,
    ) -> Result<(), String> {
        let frame = &self.frames[index];
        canvas.copy(self.texture, Some(frame.to_rect()), Some(dest_rect))
    }
}
