//! Tuning constants and asset locations
//!
//! Everything the simulation reads as a "constant" lives in [`GameConfig`]:
//! movement speed, jump launch velocity, gravity, spawn odds and so on. Two
//! presets exist, one per game variant, and a JSON file can override any
//! subset of fields on top of the preset named by its `variant` key.
//!
//! # Lookup order
//!
//! 1. The file named by the `LIZARDS_REACH_CONFIG` environment variable
//! 2. `<config_dir>/lizards-reach/config.json`
//! 3. The built-in [`GameConfig::extended`] preset

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "LIZARDS_REACH_CONFIG";

/// Which of the two game screens to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Static player sprite, walk and jump only
    Classic,
    /// Animated lizard with attack pose and spawning flies
    #[default]
    Extended,
}

/// How the background image is fitted to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundFit {
    /// Scale preserving aspect ratio until both viewport dimensions are covered
    Cover,
    /// Draw at the texture's own pixel size
    Native,
}

/// What counts as a jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpTrigger {
    /// Only the frame the key goes down
    Press,
    /// Any frame the key is down, so holding it re-launches on landing
    Held,
}

/// Where the player starts horizontally
///
/// Internally tagged so a JSON override can switch kinds:
/// `{"kind": "fixed", "x": 100.0}` or `{"kind": "centered", "offset": -75.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartX {
    Fixed { x: f32 },
    /// Offset from the horizontal center of the viewport
    Centered { offset: f32 },
}

impl StartX {
    pub fn resolve(&self, viewport_width: f32) -> f32 {
        match *self {
            StartX::Fixed { x } => x,
            StartX::Centered { offset } => viewport_width / 2.0 + offset,
        }
    }
}

/// Inclusive float range used for random fly parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        FloatRange { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Fly spawn odds and parameter ranges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// A roll below this value spawns a fly
    pub threshold: u32,
    /// Rolls are drawn uniformly from `0..roll_range`
    pub roll_range: u32,
    pub size: FloatRange,
    pub speed: FloatRange,
    /// Vertical keep-out band at the top and bottom of the viewport
    pub margin: f32,
}

impl SpawnConfig {
    /// Per-frame spawn probability
    pub fn probability(&self) -> f64 {
        self.threshold as f64 / self.roll_range as f64
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            threshold: 2,
            roll_range: 100,
            size: FloatRange::new(30.0, 70.0),
            speed: FloatRange::new(150.0, 300.0),
            margin: 50.0,
        }
    }
}

/// Texture and sprite sheet description paths
///
/// A missing sheet description means the whole texture is a single frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPaths {
    pub background: String,
    pub player_texture: String,
    pub player_sheet: Option<String>,
    pub fly_texture: String,
    pub fly_sheet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Lizard's Reach".to_string(),
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,

    // === Player kinematics (pixels, seconds, y-up) ===
    pub move_speed: f32,
    pub launch_velocity: f32,
    pub gravity: f32,
    pub ground_y: f32,
    pub start_x: StartX,
    pub jump_trigger: JumpTrigger,
    pub attack_enabled: bool,

    // === Presentation ===
    pub player_scale: u32,
    pub frame_duration: f32,
    pub background_fit: BackgroundFit,

    // === Flies ===
    pub flies_enabled: bool,
    pub spawn: SpawnConfig,

    /// Fixed RNG seed; `None` picks a fresh one each run
    pub seed: Option<u64>,
    pub window: WindowConfig,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::extended()
    }
}

/// Where the active configuration came from (for the startup log)
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Env(PathBuf),
    UserDir(PathBuf),
    Builtin,
}

impl GameConfig {
    /// The lizard screen: animated sprite at 3x, flies, attack pose
    pub fn extended() -> Self {
        GameConfig {
            variant: Variant::Extended,
            move_speed: 200.0,
            launch_velocity: 600.0,
            gravity: 1200.0,
            ground_y: 50.0,
            start_x: StartX::Centered { offset: -75.0 },
            jump_trigger: JumpTrigger::Press,
            attack_enabled: true,
            player_scale: 3,
            frame_duration: 0.1,
            background_fit: BackgroundFit::Cover,
            flies_enabled: true,
            spawn: SpawnConfig::default(),
            seed: None,
            window: WindowConfig::default(),
            assets: AssetPaths {
                background: "assets/backgrounds/cityBackground.png".to_string(),
                player_texture: "assets/sprites/LizardSprite.png".to_string(),
                player_sheet: Some("assets/config/lizard_animations.json".to_string()),
                fly_texture: "assets/sprites/FlySprite.png".to_string(),
                fly_sheet: Some("assets/config/fly_animations.json".to_string()),
            },
        }
    }

    /// The first prototype: static sprite, no flies, no attack
    ///
    /// Its movement was tuned in pixels per frame at 60 FPS (5 px walk,
    /// 10 px launch, 0.5 px gravity); these are the same numbers per second.
    pub fn classic() -> Self {
        GameConfig {
            variant: Variant::Classic,
            move_speed: 300.0,
            launch_velocity: 600.0,
            gravity: 1800.0,
            ground_y: 0.0,
            start_x: StartX::Fixed { x: 100.0 },
            jump_trigger: JumpTrigger::Held,
            attack_enabled: false,
            player_scale: 1,
            frame_duration: 0.1,
            background_fit: BackgroundFit::Native,
            flies_enabled: false,
            spawn: SpawnConfig::default(),
            seed: None,
            window: WindowConfig::default(),
            assets: AssetPaths {
                background: "assets/backgrounds/background.png".to_string(),
                player_texture: "assets/sprites/player.png".to_string(),
                player_sheet: None,
                fly_texture: "assets/sprites/FlySprite.png".to_string(),
                fly_sheet: Some("assets/config/fly_animations.json".to_string()),
            },
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => GameConfig::classic(),
            Variant::Extended => GameConfig::extended(),
        }
    }

    /// Parse a JSON document as overrides on top of its variant's preset
    ///
    /// `{"variant": "classic", "gravity": 900.0}` yields the classic preset
    /// with only gravity changed. Nested objects merge key by key.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: Value = serde_json::from_str(json)?;
        let variant = match overrides.get("variant") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Variant::default(),
        };

        let mut merged = serde_json::to_value(GameConfig::for_variant(variant))?;
        merge_json(&mut merged, overrides);
        serde_json::from_value(merged)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = GameConfig::from_json_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the active configuration using the lookup order above
    ///
    /// Missing files fall through to the next source; a file that exists
    /// but fails to parse or validate is fatal. The returned config has
    /// always been validated.
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
            if path.exists() {
                let config = GameConfig::load_from_file(&path)?;
                return Ok((config, ConfigSource::Env(path)));
            }
            log::warn!(
                "{} points at {}, which does not exist; ignoring",
                CONFIG_ENV_VAR,
                path.display()
            );
        }

        if let Some(path) = user_config_path() {
            if path.exists() {
                let config = GameConfig::load_from_file(&path)?;
                return Ok((config, ConfigSource::UserDir(path)));
            }
        }

        Ok((GameConfig::default(), ConfigSource::Builtin))
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(reason.to_string()))
        };

        if !(self.frame_duration > 0.0 && self.frame_duration.is_finite()) {
            return invalid("frame_duration must be a positive number of seconds");
        }
        let spawn = &self.spawn;
        let finite = [
            self.move_speed,
            self.launch_velocity,
            self.gravity,
            self.ground_y,
            spawn.size.min,
            spawn.size.max,
            spawn.speed.min,
            spawn.speed.max,
            spawn.margin,
        ];
        // JSON numbers past f32::MAX parse as infinity
        if finite.iter().any(|value| !value.is_finite()) {
            return invalid("kinematics and spawn ranges must be finite numbers");
        }
        let start_offset = match self.start_x {
            StartX::Fixed { x } => x,
            StartX::Centered { offset } => offset,
        };
        if !start_offset.is_finite() {
            return invalid("start_x must be a finite number");
        }

        if self.player_scale == 0 {
            return invalid("player_scale must be at least 1");
        }
        if self.move_speed < 0.0 || self.gravity < 0.0 {
            return invalid("move_speed and gravity must not be negative");
        }
        if self.launch_velocity <= 0.0 {
            return invalid("launch_velocity must be positive");
        }

        if spawn.roll_range == 0 {
            return invalid("spawn.roll_range must be at least 1");
        }
        if spawn.threshold > spawn.roll_range {
            return invalid("spawn.threshold cannot exceed spawn.roll_range");
        }
        if spawn.size.min <= 0.0 || spawn.size.min > spawn.size.max {
            return invalid("spawn.size must be a positive range with min <= max");
        }
        // Negative speeds would walk flies off the left edge, where nothing culls them
        if spawn.speed.min < 0.0 || spawn.speed.min > spawn.speed.max {
            return invalid("spawn.speed must be a non-negative range with min <= max");
        }
        if spawn.margin < 0.0 {
            return invalid("spawn.margin must not be negative");
        }

        Ok(())
    }
}

/// `<config_dir>/lizards-reach/config.json`, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lizards-reach").join("config.json"))
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                merge_json(base_map.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_extended_preset() {
        let config = GameConfig::default();
        assert_eq!(config.variant, Variant::Extended);
        assert_eq!(config.launch_velocity, 600.0);
        assert_eq!(config.gravity, 1200.0);
        assert_eq!(config.ground_y, 50.0);
        assert_eq!(config.player_scale, 3);
        assert!(config.flies_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_classic_preset_is_valid() {
        let config = GameConfig::classic();
        assert_eq!(config.jump_trigger, JumpTrigger::Held);
        assert_eq!(config.background_fit, BackgroundFit::Native);
        assert!(!config.flies_enabled);
        assert!(!config.attack_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_start_x_resolution() {
        assert_eq!(StartX::Centered { offset: -75.0 }.resolve(640.0), 245.0);
        assert_eq!(StartX::Fixed { x: 100.0 }.resolve(640.0), 100.0);
    }

    #[test]
    fn test_empty_json_yields_default() {
        let config = GameConfig::from_json_str("{}").unwrap();
        assert_eq!(config.variant, Variant::Extended);
        assert_eq!(config.move_speed, 200.0);
    }

    #[test]
    fn test_overrides_apply_on_top_of_variant_preset() {
        let json = r#"{ "variant": "classic", "gravity": 900.0, "spawn": { "threshold": 5 } }"#;
        let config = GameConfig::from_json_str(json).unwrap();

        assert_eq!(config.variant, Variant::Classic);
        assert_eq!(config.gravity, 900.0);
        // Untouched classic values survive
        assert_eq!(config.move_speed, 300.0);
        assert_eq!(config.ground_y, 0.0);
        // Nested objects merge field by field
        assert_eq!(config.spawn.threshold, 5);
        assert_eq!(config.spawn.roll_range, 100);
    }

    #[test]
    fn test_start_x_kind_can_be_switched() {
        let json = r#"{ "variant": "classic", "start_x": { "kind": "centered", "offset": -20.0 } }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.start_x, StartX::Centered { offset: -20.0 });
    }

    #[test]
    fn test_seed_override() {
        let config = GameConfig::from_json_str(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        assert!(GameConfig::from_json_str(r#"{ "variant": "arcade" }"#).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_frame_duration() {
        let mut config = GameConfig::extended();
        config.frame_duration = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let mut config = GameConfig::extended();
        config.spawn.size = FloatRange::new(70.0, 30.0);
        assert!(config.validate().is_err());

        let mut config = GameConfig::extended();
        config.spawn.speed = FloatRange::new(-10.0, 300.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_numbers() {
        let json = r#"{ "spawn": { "threshold": 100, "size": { "min": 30.0, "max": 1e39 } } }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.spawn.size.max, f32::INFINITY);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        for json in [
            r#"{ "gravity": 1e39 }"#,
            r#"{ "move_speed": 1e39 }"#,
            r#"{ "launch_velocity": 1e39 }"#,
            r#"{ "ground_y": -1e39 }"#,
            r#"{ "spawn": { "speed": { "min": 150.0, "max": 1e39 } } }"#,
            r#"{ "spawn": { "margin": 1e39 } }"#,
            r#"{ "start_x": { "kind": "fixed", "x": 1e39 } }"#,
        ] {
            let config = GameConfig::from_json_str(json).unwrap();
            assert!(config.validate().is_err(), "accepted {}", json);
        }
    }

    #[test]
    fn test_validate_rejects_threshold_above_range() {
        let mut config = GameConfig::extended();
        config.spawn.threshold = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_spawn_probability() {
        assert!((SpawnConfig::default().probability() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_shipped_classic_config_loads() {
        let config = GameConfig::load_from_file(Path::new("assets/config/classic.json")).unwrap();
        assert_eq!(config.variant, Variant::Classic);
        assert_eq!(config.gravity, 1800.0);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let path = std::env::temp_dir().join(format!(
            "lizards-reach-invalid-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "frame_duration": 0.0 }"#).unwrap();

        let result = GameConfig::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let result = GameConfig::load_from_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
