// Flies: decorative obstacles that drift across the screen
//
// Flies spawn at the left edge with a random size, speed and height, move
// right at a constant speed, and are dropped as soon as they pass the right
// edge. They never interact with the player.

use crate::config::SpawnConfig;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Fly {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

impl Fly {
    pub fn new(x: f32, y: f32, size: f32, speed: f32) -> Self {
        Fly { x, y, size, speed }
    }
}

/// Roll the per-frame spawn check: uniform integer in `0..roll_range`,
/// spawn if it lands below `threshold`
pub fn should_spawn<R: Rng + ?Sized>(rng: &mut R, spawn: &SpawnConfig) -> bool {
    rng.random_range(0..spawn.roll_range) < spawn.threshold
}

/// Build a fly at the left edge with random size, speed and height
///
/// The height range is `[margin, viewport_height - size - margin]`. On a
/// viewport too short for that band the fly sits at `margin`.
pub fn random_fly<R: Rng + ?Sized>(rng: &mut R, spawn: &SpawnConfig, viewport_height: f32) -> Fly {
    let size = rng.random_range(spawn.size.min..=spawn.size.max);
    let speed = rng.random_range(spawn.speed.min..=spawn.speed.max);
    debug_assert!(spawn.size.contains(size) && spawn.speed.contains(speed));

    let lowest = spawn.margin;
    let highest = viewport_height - size - spawn.margin;
    let y = if highest > lowest {
        rng.random_range(lowest..=highest)
    } else {
        lowest
    };

    Fly::new(0.0, y, size, speed)
}

/// The live fly collection plus lifetime counters
#[derive(Debug, Default)]
pub struct FlySwarm {
    flies: Vec<Fly>,
    spawned: u64,
    culled: u64,
}

impl FlySwarm {
    pub fn new() -> Self {
        FlySwarm {
            flies: Vec::new(),
            spawned: 0,
            culled: 0,
        }
    }

    pub fn flies(&self) -> &[Fly] {
        &self.flies
    }

    pub fn len(&self) -> usize {
        self.flies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flies.is_empty()
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn culled(&self) -> u64 {
        self.culled
    }

    pub fn push(&mut self, fly: Fly) {
        self.flies.push(fly);
        self.spawned += 1;
    }

    /// Move every fly right by `speed * delta` and drop the ones past the edge
    ///
    /// Rust Learning: `retain_mut` visits each element exactly once and
    /// compacts the Vec in place, so moving and culling happen in one pass
    /// without index juggling or skipped elements.
    ///
    /// # Returns
    /// How many flies were removed this frame
    pub fn advance(&mut self, delta: f32, viewport_width: f32) -> usize {
        let before = self.flies.len();

        self.flies.retain_mut(|fly| {
            fly.x += fly.speed * delta;
            fly.x <= viewport_width
        });

        let removed = before - self.flies.len();
        self.culled += removed as u64;
        removed
    }

    /// One frame of the fly lifecycle: maybe spawn, then move and cull
    ///
    /// A fresh fly moves in the same frame it spawns, so it is first drawn at
    /// `speed * delta` rather than at x = 0.
    ///
    /// # Returns
    /// True if a fly was spawned this frame
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        spawn: &SpawnConfig,
        delta: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> bool {
        let spawned = should_spawn(rng, spawn);
        if spawned {
            let fly = random_fly(rng, spawn, viewport_height);
            log::trace!(
                "Fly spawned at y={:.1} (size {:.1}, speed {:.1})",
                fly.y,
                fly.size,
                fly.speed
            );
            self.push(fly);
        }

        self.advance(delta, viewport_width);
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FloatRange;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_fly_within_configured_ranges() {
        let spawn = SpawnConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..1000 {
            let fly = random_fly(&mut rng, &spawn, 480.0);
            assert_eq!(fly.x, 0.0);
            assert!(spawn.size.contains(fly.size));
            assert!(spawn.speed.contains(fly.speed));
            assert!(fly.y >= spawn.margin);
            assert!(fly.y <= 480.0 - fly.size - spawn.margin);
        }
    }

    #[test]
    fn test_short_viewport_pins_fly_to_margin() {
        let spawn = SpawnConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);

        let fly = random_fly(&mut rng, &spawn, 100.0);
        assert_eq!(fly.y, spawn.margin);
    }

    #[test]
    fn test_advance_moves_by_speed_times_delta() {
        let mut swarm = FlySwarm::new();
        swarm.push(Fly::new(0.0, 100.0, 40.0, 200.0));
        swarm.push(Fly::new(10.0, 200.0, 40.0, 150.0));

        swarm.advance(0.5, 640.0);

        assert_eq!(swarm.flies()[0].x, 100.0);
        assert_eq!(swarm.flies()[1].x, 85.0);
    }

    #[test]
    fn test_cull_removes_only_flies_past_edge() {
        let mut swarm = FlySwarm::new();
        swarm.push(Fly::new(630.0, 100.0, 40.0, 100.0)); // -> 640, stays (not past)
        swarm.push(Fly::new(635.0, 100.0, 40.0, 100.0)); // -> 645, culled
        swarm.push(Fly::new(700.0, 100.0, 40.0, 100.0)); // already past, culled
        swarm.push(Fly::new(0.0, 100.0, 40.0, 100.0)); // -> 10, stays

        let removed = swarm.advance(0.1, 640.0);

        assert_eq!(removed, 2);
        assert_eq!(swarm.culled(), 2);
        let xs: Vec<f32> = swarm.flies().iter().map(|fly| fly.x).collect();
        assert_eq!(xs, vec![640.0, 10.0]);
    }

    #[test]
    fn test_consecutive_culls_do_not_skip_elements() {
        let mut swarm = FlySwarm::new();
        for _ in 0..5 {
            swarm.push(Fly::new(639.0, 0.0, 30.0, 1000.0));
        }
        swarm.push(Fly::new(0.0, 0.0, 30.0, 1000.0));

        swarm.advance(0.01, 640.0);
        assert_eq!(swarm.len(), 1);
        assert_eq!(swarm.flies()[0].x, 10.0);
    }

    #[test]
    fn test_spawn_rate_converges() {
        let spawn = SpawnConfig::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let frames = 100_000u32;

        let spawns = (0..frames).filter(|_| should_spawn(&mut rng, &spawn)).count() as f64;

        let p = spawn.probability();
        let expected = frames as f64 * p;
        let std_dev = (frames as f64 * p * (1.0 - p)).sqrt();
        assert!(
            (spawns - expected).abs() < 5.0 * std_dev,
            "spawned {} flies, expected {} +/- {}",
            spawns,
            expected,
            5.0 * std_dev
        );
    }

    #[test]
    fn test_zero_threshold_never_spawns() {
        let spawn = SpawnConfig {
            threshold: 0,
            ..SpawnConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!((0..10_000).all(|_| !should_spawn(&mut rng, &spawn)));
    }

    #[test]
    fn test_full_threshold_always_spawns() {
        let spawn = SpawnConfig {
            threshold: 100,
            size: FloatRange::new(40.0, 40.0),
            ..SpawnConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut swarm = FlySwarm::new();

        for _ in 0..10 {
            assert!(swarm.update(&mut rng, &spawn, 0.0, 640.0, 480.0));
        }
        assert_eq!(swarm.len(), 10);
        assert!(swarm.flies().iter().all(|fly| fly.size == 40.0));
    }

    #[test]
    fn test_new_fly_moves_on_its_spawn_frame() {
        let spawn = SpawnConfig {
            threshold: 100,
            speed: FloatRange::new(200.0, 200.0),
            ..SpawnConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut swarm = FlySwarm::new();

        swarm.update(&mut rng, &spawn, 0.1, 640.0, 480.0);
        assert_eq!(swarm.flies()[0].x, 20.0);
    }
}
