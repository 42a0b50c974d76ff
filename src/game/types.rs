// Small value types shared between the game loop, the renderer and the host

/// Visible drawing surface in pixels, read from the host every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Viewport::new(width as f32, height as f32)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// What happened during a run, returned by `Game::shutdown`
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub seed: u64,
    pub frames: u64,
    pub simulated_seconds: f32,
    pub jumps: u64,
    pub flies_spawned: u64,
    pub flies_culled: u64,
}
