use crate::error::ConfigError;
use crate::sprite::Frame;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which pose the player sprite shows this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AnimationState {
    /// Normal walk cycle driven by the animation clock
    #[default]
    Looping,
    /// Held on the sheet's last frame while the pointer is down
    Attack,
}

impl AnimationState {
    pub fn from_attacking(is_attacking: bool) -> Self {
        if is_attacking {
            AnimationState::Attack
        } else {
            AnimationState::Looping
        }
    }
}

/// Elapsed-time accumulator that every looping animation indexes into
///
/// Game Dev Pattern: Shared Clock
/// Instead of each sprite keeping its own "last frame changed at" timestamp,
/// one clock advances by the frame delta and every animation derives its
/// current frame from it. Pausing the game is just not advancing the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: f32,
}

impl AnimationClock {
    pub fn new() -> Self {
        AnimationClock { elapsed: 0.0 }
    }

    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Restart every animation from frame 0
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// A fixed-duration frame cycle that loops forever
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopingAnimation {
    frame_count: usize,
    frame_duration: f32,
}

impl LoopingAnimation {
    /// # Panics
    ///
    /// If `frame_count` is zero or `frame_duration` is not a positive number.
    /// Both come from loaded assets and validated config, so either one
    /// being wrong is a bug in the caller.
    pub fn new(frame_count: usize, frame_duration: f32) -> Self {
        assert!(frame_count > 0, "animation needs at least one frame");
        assert!(
            frame_duration > 0.0 && frame_duration.is_finite(),
            "frame duration must be positive, got {}",
            frame_duration
        );

        LoopingAnimation {
            frame_count,
            frame_duration,
        }
    }

    pub fn cycle_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }

    /// Frame shown at `elapsed` seconds: `floor((elapsed mod (k*f)) / f)`
    pub fn key_frame_index(&self, elapsed: f32) -> usize {
        let into_cycle = elapsed.rem_euclid(self.cycle_duration());
        let index = (into_cycle / self.frame_duration).floor() as usize;

        // f32 rounding can land exactly on k at the very end of a cycle
        index.min(self.frame_count - 1)
    }

    pub fn last_frame_index(&self) -> usize {
        self.frame_count - 1
    }

    /// Frame for the player sprite given its current pose
    ///
    /// The attack pose has no sequence of its own; it freezes on the last
    /// frame of the sheet for as long as the attack signal is held.
    pub fn frame_for_state(&self, state: AnimationState, clock: &AnimationClock) -> usize {
        match state {
            AnimationState::Looping => self.key_frame_index(clock.elapsed()),
            AnimationState::Attack => self.last_frame_index(),
        }
    }
}

/// Sprite sheet description loaded from JSON
///
/// ```json
/// {
///   "frame_width": 50,
///   "frame_height": 50,
///   "frames": [ { "x": 0, "y": 0 }, { "x": 50, "y": 0 } ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: Vec<FrameData>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FrameData {
    pub x: i32,
    pub y: i32,
}

impl FrameData {
    pub fn to_frame(&self, width: u32, height: u32) -> Frame {
        Frame::new(self.x, self.y, width, height)
    }
}

impl AnimationConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AnimationConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if config.frames.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "{} lists no frames",
                path.display()
            )));
        }
        Ok(config)
    }

    /// A sheet that is just one whole texture (static sprites)
    pub fn single_frame(width: u32, height: u32) -> Self {
        AnimationConfig {
            frame_width: width,
            frame_height: height,
            frames: vec![FrameData { x: 0, y: 0 }],
        }
    }

    pub fn create_frames(&self) -> Vec<Frame> {
        self.frames
            .iter()
            .map(|frame_data| frame_data.to_frame(self.frame_width, self.frame_height))
            .collect()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn looping(&self, frame_duration: f32) -> LoopingAnimation {
        LoopingAnimation::new(self.frame_count(), frame_duration)
    }
}
