use crate::animation::AnimationState;
use crate::config::{GameConfig, JumpTrigger};
use crate::input_system::FrameInput;

/// The two states of the jump state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpState {
    #[default]
    Grounded,
    Airborne,
}

/// Player position and motion in world space (y-up, pixels)
///
/// Owned by `Game` and mutated once per step: `handle_input` first, then
/// `update_jump`.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub jump_state: JumpState,
    pub is_attacking: bool,
}

impl Player {
    /// A grounded, idle player standing at `x`
    pub fn new(x: f32, ground_y: f32) -> Self {
        Player {
            x,
            y: ground_y,
            velocity_y: 0.0,
            jump_state: JumpState::Grounded,
            is_attacking: false,
        }
    }

    pub fn is_jumping(&self) -> bool {
        self.jump_state == JumpState::Airborne
    }

    pub fn animation_state(&self) -> AnimationState {
        AnimationState::from_attacking(self.is_attacking)
    }

    /// Apply one frame of input. Returns true if this frame launched a jump.
    ///
    /// Left and right are applied independently, so holding both cancels out.
    pub fn handle_input(&mut self, input: &FrameInput, delta: f32, config: &GameConfig) -> bool {
        if input.move_left {
            self.x -= config.move_speed * delta;
        }
        if input.move_right {
            self.x += config.move_speed * delta;
        }

        let wants_jump = match config.jump_trigger {
            JumpTrigger::Press => input.jump_pressed,
            JumpTrigger::Held => input.jump_held,
        };

        // Attack re-evaluates every frame: it is whatever the pointer says now
        self.is_attacking = config.attack_enabled && input.attack;

        if wants_jump && self.jump_state == JumpState::Grounded {
            self.jump_state = JumpState::Airborne;
            self.velocity_y = config.launch_velocity;
            return true;
        }
        false
    }

    /// Integrate one airborne frame: velocity first, then position
    ///
    /// Landing only happens on the way down. A zero-delta frame right after
    /// launch leaves the player at ground height with upward velocity, and
    /// that must not count as touching down.
    pub fn update_jump(&mut self, delta: f32, config: &GameConfig) {
        if self.jump_state != JumpState::Airborne {
            return;
        }

        self.velocity_y -= config.gravity * delta;
        self.y += self.velocity_y * delta;

        if self.y <= config.ground_y && self.velocity_y <= 0.0 {
            self.y = config.ground_y;
            self.velocity_y = 0.0;
            self.jump_state = JumpState::Grounded;
        }
    }
}
