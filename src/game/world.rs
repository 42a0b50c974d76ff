// Game struct and the per-frame simulation step
//
// The Game owns every piece of mutable simulation state: the player, the
// animation clock, the fly swarm and the seeded RNG. The host calls
// `Game::new` once, `step` every frame, and `shutdown` when the window closes.
// Nothing in here touches SDL, so the whole loop runs in unit tests.

use crate::animation::{AnimationClock, LoopingAnimation};
use crate::config::GameConfig;
use crate::fly::FlySwarm;
use crate::input_system::FrameInput;
use crate::player::Player;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{SessionSummary, Viewport};

pub struct Game {
    config: GameConfig,
    pub player: Player,
    pub clock: AnimationClock,
    pub flies: FlySwarm,
    rng: Pcg32,
    seed: u64,
    frames: u64,
    jumps: u64,
}

impl Game {
    /// Create a fresh game with the player standing on the ground
    ///
    /// # Arguments
    /// * `config` - Tuning constants, already validated
    /// * `viewport` - Initial window size, used to place the player
    /// * `seed` - RNG seed; the same seed and inputs replay the same flies
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64) -> Self {
        let start_x = config.start_x.resolve(viewport.width);
        let player = Player::new(start_x, config.ground_y);

        log::debug!(
            "Game created: {:?} variant, player at ({}, {}), seed {}",
            config.variant,
            start_x,
            config.ground_y,
            seed
        );

        Game {
            config,
            player,
            clock: AnimationClock::new(),
            flies: FlySwarm::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            frames: 0,
            jumps: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Advance the simulation by one frame
    ///
    /// Game loop pattern: Input → Kinematics → Spawn/Move/Cull.
    /// Rendering reads the result afterwards through `render::build_draw_list`.
    ///
    /// # Arguments
    /// * `delta` - Seconds since the previous frame (must be >= 0)
    /// * `input` - This frame's logical input
    /// * `viewport` - Current drawing surface size
    pub fn step(&mut self, delta: f32, input: &FrameInput, viewport: Viewport) {
        debug_assert!(delta >= 0.0, "negative frame delta {}", delta);

        self.clock.advance(delta);

        if self.player.handle_input(input, delta, &self.config) {
            self.jumps += 1;
        }
        self.player.update_jump(delta, &self.config);

        if self.config.flies_enabled {
            self.flies.update(
                &mut self.rng,
                &self.config.spawn,
                delta,
                viewport.width,
                viewport.height,
            );
        }

        self.frames += 1;
    }

    /// Which frame of `animation` the player shows right now
    ///
    /// The attack pose overrides the walk cycle for the frames it is held.
    pub fn player_frame(&self, animation: &LoopingAnimation) -> usize {
        animation.frame_for_state(self.player.animation_state(), &self.clock)
    }

    /// Which frame of `animation` every fly shows right now (they flap in sync)
    pub fn fly_frame(&self, animation: &LoopingAnimation) -> usize {
        animation.key_frame_index(self.clock.elapsed())
    }

    /// Consume the game and report what happened
    ///
    /// Textures live with the host, not here, so there is nothing to free;
    /// dropping `self` is the whole teardown.
    pub fn shutdown(self) -> SessionSummary {
        if !self.flies.is_empty() {
            log::debug!("{} flies still on screen at shutdown", self.flies.len());
        }

        SessionSummary {
            seed: self.seed,
            frames: self.frames,
            simulated_seconds: self.clock.elapsed(),
            jumps: self.jumps,
            flies_spawned: self.flies.spawned(),
            flies_culled: self.flies.culled(),
        }
    }
}
